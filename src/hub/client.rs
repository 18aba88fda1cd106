use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::hub::DatasetBundle;

const DEFAULT_ENDPOINT: &str = "https://huggingface.co";

/// Configuration for the hosted dataset hub client
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Hub endpoint (override for testing against a local stub)
    pub endpoint: String,
    /// Target dataset repository, e.g. "username/coraal"
    pub repo_id: String,
    /// Access token (from HF_TOKEN env var)
    pub token: String,
    /// Whether to create the repository as private
    pub private: bool,
}

impl HubConfig {
    /// Create config from the environment; the token is supplied externally,
    /// never generated here.
    pub fn from_env(repo_id: String, private: bool) -> Result<Self> {
        let token =
            std::env::var("HF_TOKEN").context("HF_TOKEN environment variable not set")?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            repo_id,
            token,
            private,
        })
    }
}

/// Hosted dataset hub client. Each component bundle is pushed as an
/// independent config in one commit.
pub struct HubClient {
    client: Client,
    config: HubConfig,
}

#[derive(Debug, Serialize)]
struct CreateRepoRequest<'a> {
    #[serde(rename = "type")]
    repo_type: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization: Option<&'a str>,
    private: bool,
}

#[derive(Debug, Serialize)]
struct CommitLine<'a> {
    key: &'a str,
    value: serde_json::Value,
}

impl HubClient {
    pub fn new(config: HubConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Create the dataset repository if it does not already exist.
    pub async fn create_repo(&self) -> Result<()> {
        let (organization, name) = match self.config.repo_id.split_once('/') {
            Some((org, name)) => (Some(org), name),
            None => (None, self.config.repo_id.as_str()),
        };

        let request = CreateRepoRequest {
            repo_type: "dataset",
            name,
            organization,
            private: self.config.private,
        };

        let response = self
            .client
            .post(format!("{}/api/repos/create", self.config.endpoint))
            .bearer_auth(&self.config.token)
            .json(&request)
            .send()
            .await
            .context("Failed to send repo create request to hub")?;

        match response.status() {
            status if status.is_success() => {
                info!("Created dataset repository {}", self.config.repo_id);
                Ok(())
            }
            StatusCode::CONFLICT => {
                debug!("Repository {} already exists", self.config.repo_id);
                Ok(())
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!("Hub repo create error: {} - {}", status, body);
            }
        }
    }

    /// Push one component bundle: the split data file plus its audio files,
    /// committed to the main branch in a single commit. An unreadable audio
    /// file is logged and skipped; its row still carries the repo path.
    pub async fn push_component(&self, bundle: &DatasetBundle) -> Result<()> {
        let mut lines = Vec::new();
        lines.push(CommitLine {
            key: "header",
            value: serde_json::json!({
                "summary": format!("Add {} config ({} samples)", bundle.component, bundle.len()),
            }),
        });

        lines.push(file_line(
            &bundle.split_repo_path(),
            bundle.split_jsonl().as_bytes(),
        ));

        for (path, repo_path) in bundle.audio_files() {
            match std::fs::read(path) {
                Ok(bytes) => lines.push(file_line(&repo_path, &bytes)),
                Err(e) => {
                    warn!("Error reading {}: {}, skipping upload", path.display(), e);
                }
            }
        }

        let body = lines
            .iter()
            .map(|line| serde_json::to_string(line).context("Failed to serialize commit line"))
            .collect::<Result<Vec<_>>>()?
            .join("\n");

        let response = self
            .client
            .post(format!(
                "{}/api/datasets/{}/commit/main",
                self.config.endpoint, self.config.repo_id
            ))
            .bearer_auth(&self.config.token)
            .header("content-type", "application/x-ndjson")
            .body(body)
            .send()
            .await
            .context("Failed to send commit request to hub")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Hub commit error: {} - {}", status, body);
        }

        info!(
            "Pushed config '{}' ({} samples)",
            bundle.component,
            bundle.len()
        );
        Ok(())
    }
}

fn file_line(repo_path: &str, bytes: &[u8]) -> CommitLine<'static> {
    CommitLine {
        key: "file",
        value: serde_json::json!({
            "path": repo_path,
            "content": BASE64.encode(bytes),
            "encoding": "base64",
        }),
    }
}
