use std::path::Path;

use serde_json::{Map, Value};

use crate::models::Sample;

/// Fixed columns present in every bundle, ahead of the metadata columns.
const FIXED_COLUMNS: [&str; 3] = ["audio", "text", "file_id"];

/// One component's samples prepared for upload as an independent dataset
/// config with a single split.
#[derive(Debug, Clone)]
pub struct DatasetBundle {
    pub component: String,
    columns: Vec<String>,
    samples: Vec<Sample>,
}

impl DatasetBundle {
    /// Build a bundle, materializing the column set as the union of all
    /// observed metadata keys. The schema is open-ended per component, so it
    /// can only be fixed once every row is known.
    pub fn from_samples(component: &str, samples: Vec<Sample>) -> Self {
        let mut metadata_columns: Vec<String> = samples
            .iter()
            .flat_map(|s| s.metadata.keys().cloned())
            .collect();
        metadata_columns.sort();
        metadata_columns.dedup();

        let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(metadata_columns);

        Self {
            component: component.to_string(),
            columns,
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All columns, fixed ones first, metadata columns sorted.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Repo-relative path for a sample's audio file.
    pub fn audio_repo_path(&self, sample: &Sample) -> String {
        let name = sample
            .audio
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&sample.file_id);
        format!("{}/audio/{}", self.component, name)
    }

    /// Repo-relative path for the split data file.
    pub fn split_repo_path(&self) -> String {
        format!("{}/test.jsonl", self.component)
    }

    /// Render the split as JSONL, one record per sample. Every column is
    /// present in every record; samples without a metadata value get an
    /// empty string, keeping the schema uniform across the config.
    pub fn split_jsonl(&self) -> String {
        let mut out = String::new();
        for sample in &self.samples {
            let mut record = Map::new();
            record.insert(
                "audio".to_string(),
                Value::String(self.audio_repo_path(sample)),
            );
            record.insert("text".to_string(), Value::String(sample.text.clone()));
            record.insert(
                "file_id".to_string(),
                Value::String(sample.file_id.clone()),
            );
            for column in &self.columns[FIXED_COLUMNS.len()..] {
                let value = sample.metadata.get(column).cloned().unwrap_or_default();
                record.insert(column.clone(), Value::String(value));
            }
            out.push_str(&Value::Object(record).to_string());
            out.push('\n');
        }
        out
    }

    /// Audio files referenced by this bundle, paired with their repo paths.
    pub fn audio_files(&self) -> impl Iterator<Item = (&Path, String)> {
        self.samples
            .iter()
            .map(|s| (s.audio.as_path(), self.audio_repo_path(s)))
    }
}
