use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::corpus::metadata::{is_metadata_file, MetadataTable};
use crate::corpus::textgrid::duration_seconds;
use crate::corpus::transcript::{count_words, extract_text};
use crate::models::{
    file_id, ComponentReport, ComponentSamples, ComponentStats, CorpusSpec, Sample,
};

/// Collect audio/transcript/metadata sample triples for every component of
/// the corpus, in component order. `limit` caps audio files per component
/// (smoke testing); the cap is reported alongside the true total.
///
/// Every failure below the run level degrades and continues: a missing
/// component directory, a missing transcript sibling, and a missing or
/// unreadable metadata table each cost only the affected unit.
pub fn collect_samples(
    base: &Path,
    spec: &CorpusSpec,
    limit: Option<usize>,
) -> Vec<ComponentSamples> {
    let mut all_samples = Vec::new();

    for component in &spec.components {
        let dir = base.join(&component.name);
        if !dir.is_dir() {
            warn!("{} directory not found, skipping", component.name);
            continue;
        }

        let table = match MetadataTable::load(&dir, &component.name, &spec.id_column) {
            Ok(table) => table,
            Err(e) => {
                error!("{e}");
                MetadataTable::empty()
            }
        };
        if table.is_empty() {
            warn!(
                "No metadata loaded for {}, samples will have no metadata columns",
                component.name
            );
        } else {
            info!("Loaded {} metadata entries for {}", table.len(), component.name);
        }

        let mut wav_files = files_with_extension(&dir, "wav");
        let total = wav_files.len();
        if let Some(limit) = limit {
            wav_files.truncate(limit);
        }
        if wav_files.len() < total {
            info!(
                "Processing {}: {} audio files (limited from {})",
                component.name,
                wav_files.len(),
                total
            );
        } else {
            info!("Processing {}: {} audio files", component.name, total);
        }

        let mut samples = Vec::new();
        for wav in wav_files {
            let txt = wav.with_extension("txt");
            if !txt.exists() {
                warn!(
                    "No transcript found for {}",
                    wav.file_name().and_then(|n| n.to_str()).unwrap_or("?")
                );
                continue;
            }

            let text = extract_text(&txt);
            let stem = wav
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            let id = file_id(stem).to_string();

            let metadata = match table.get(&id) {
                Some(row) => row.clone(),
                None => {
                    if !table.is_empty() {
                        warn!(
                            "No metadata found for {} (sample keys: {:?})",
                            id,
                            table.sample_keys(3)
                        );
                    }
                    Default::default()
                }
            };

            samples.push(Sample {
                audio: wav,
                file_id: id,
                text,
                metadata,
            });
        }

        if !samples.is_empty() {
            all_samples.push(ComponentSamples {
                component: component.name.clone(),
                samples,
            });
        }
    }

    all_samples
}

/// Recompute word counts and durations for every component of the corpus,
/// in component order. Transcript and alignment-grid files are aggregated
/// independently; no pairing is required between the two.
pub fn analyze_corpus(base: &Path, spec: &CorpusSpec) -> Vec<ComponentReport> {
    let mut reports = Vec::new();

    for component in &spec.components {
        let dir = base.join(&component.name);
        if !dir.is_dir() {
            warn!("{} directory not found", component.name);
            continue;
        }

        // The metadata table is a .txt file too, but it is not a transcript.
        let txt_files: Vec<PathBuf> = files_with_extension(&dir, "txt")
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_none_or(|n| !is_metadata_file(n, &component.name))
            })
            .collect();
        let grid_files = files_with_extension(&dir, "TextGrid");

        let mut stats = ComponentStats {
            transcript_files: txt_files.len(),
            grid_files: grid_files.len(),
            ..Default::default()
        };
        for txt in &txt_files {
            stats.words += count_words(txt);
        }
        for grid in &grid_files {
            stats.seconds += duration_seconds(grid);
        }

        info!(
            "{}: {} words, {:.2} hours ({} txt files, {} TextGrid files)",
            component.name,
            stats.words,
            stats.hours(),
            stats.transcript_files,
            stats.grid_files
        );

        reports.push(ComponentReport {
            component: component.name.clone(),
            stats,
        });
    }

    reports
}

/// All files in `dir` with the given extension (exact match), sorted
/// lexicographically for deterministic enumeration.
fn files_with_extension(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == ext))
            .collect(),
        Err(e) => {
            warn!("Error listing {}: {}", dir.display(), e);
            Vec::new()
        }
    };
    files.sort();
    files
}
