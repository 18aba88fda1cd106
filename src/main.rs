use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use coraalprep::{
    analyze_corpus, collect_samples, render_report, CorpusSpec, DatasetBundle, HubClient,
    HubConfig,
};

#[derive(Parser)]
#[command(name = "coraalprep")]
#[command(author, version, about = "CORAAL corpus preparation toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect audio, transcripts, and metadata into dataset bundles and
    /// push them to a hosted dataset repository
    Push {
        /// Base directory containing the component folders
        #[arg(short, long, default_value = ".")]
        base_dir: PathBuf,

        /// Target dataset repository (e.g. "username/coraal")
        #[arg(short, long)]
        repo_id: String,

        /// Create the repository as private
        #[arg(long)]
        private: bool,

        /// Maximum audio files per component (smoke testing)
        #[arg(long)]
        limit: Option<usize>,

        /// Collect and summarize without contacting the hub
        #[arg(long)]
        dry_run: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Recompute corpus word counts and durations and compare them against
    /// the published statistics
    Verify {
        /// Base directory containing the component folders
        #[arg(short, long, default_value = ".")]
        base_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Push {
            base_dir,
            repo_id,
            private,
            limit,
            dry_run,
            verbose,
        } => {
            setup_logging(verbose);
            push_corpus(base_dir, repo_id, private, limit, dry_run).await
        }
        Commands::Verify { base_dir, verbose } => {
            setup_logging(verbose);
            verify_corpus(base_dir)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn push_corpus(
    base_dir: PathBuf,
    repo_id: String,
    private: bool,
    limit: Option<usize>,
    dry_run: bool,
) -> Result<()> {
    let spec = CorpusSpec::coraal();

    info!("Collecting audio files and transcripts from {:?}", base_dir);
    let all_samples = collect_samples(&base_dir, &spec, limit);

    if all_samples.is_empty() {
        anyhow::bail!("No samples collected. Check that audio and txt files exist.");
    }

    let total: usize = all_samples.iter().map(|c| c.samples.len()).sum();
    info!(
        "Collected {} samples across {} components",
        total,
        all_samples.len()
    );

    let bundles: Vec<DatasetBundle> = all_samples
        .into_iter()
        .map(|c| DatasetBundle::from_samples(&c.component, c.samples))
        .collect();

    for bundle in &bundles {
        let first = &bundle.samples()[0];
        let preview: String = first.text.chars().take(60).collect();
        info!(
            "Config '{}': {} samples, {} columns (first: {}, text: {:?})",
            bundle.component,
            bundle.len(),
            bundle.columns().len(),
            first.file_id,
            preview
        );
    }

    if dry_run {
        info!("Dry run, not pushing to {}", repo_id);
        return Ok(());
    }

    let config = HubConfig::from_env(repo_id, private)?;
    let client = HubClient::new(config);

    info!("Pushing {} configs", bundles.len());
    client.create_repo().await?;
    for bundle in &bundles {
        client.push_component(bundle).await?;
    }

    info!("All configs pushed");
    Ok(())
}

fn verify_corpus(base_dir: PathBuf) -> Result<()> {
    let spec = CorpusSpec::coraal();

    info!("Analyzing CORAAL corpus at {:?}", base_dir);
    let reports = analyze_corpus(&base_dir, &spec);

    print!("{}", render_report(&reports, &spec));
    Ok(())
}
