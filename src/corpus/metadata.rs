use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("no metadata file matching {component}_metadata_*.txt in {}", .dir.display())]
    NotFound { component: String, dir: PathBuf },
    #[error("failed to open metadata file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse metadata file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A component's metadata table, keyed by file identifier for exact-match
/// lookup. One table per component directory.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    rows: HashMap<String, BTreeMap<String, String>>,
}

/// Whether a filename is a component metadata table
/// (`<COMPONENT>_metadata_*.txt`). Used both to locate the table and to keep
/// it out of transcript enumeration.
pub fn is_metadata_file(name: &str, component: &str) -> bool {
    name.starts_with(&format!("{component}_metadata_")) && name.ends_with(".txt")
}

impl MetadataTable {
    /// A table with no rows; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Locate and parse the component's metadata table.
    ///
    /// Candidates are sorted lexicographically before selection so a
    /// collision resolves deterministically; more than one candidate is
    /// logged as an ambiguity and the first is used. Rows whose `id_column`
    /// value is missing or empty are skipped.
    pub fn load(dir: &Path, component: &str, id_column: &str) -> Result<Self, MetadataError> {
        let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|source| MetadataError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| is_metadata_file(n, component))
            })
            .collect();
        candidates.sort();

        let path = match candidates.as_slice() {
            [] => {
                return Err(MetadataError::NotFound {
                    component: component.to_string(),
                    dir: dir.to_path_buf(),
                });
            }
            [only] => only.clone(),
            [first, rest @ ..] => {
                warn!(
                    "Ambiguous metadata for {}: {} candidates, using {} (ignoring {})",
                    component,
                    candidates.len(),
                    first.display(),
                    rest.iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                first.clone()
            }
        };

        info!("Found metadata: {}", path.display());
        Self::parse(&path, id_column)
    }

    fn parse(path: &Path, id_column: &str) -> Result<Self, MetadataError> {
        let file = File::open(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(|source| MetadataError::Parse {
                path: path.to_path_buf(),
                source,
            })?
            .clone();

        let mut rows = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(|source| MetadataError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

            let mut file_id = None;
            let mut row = BTreeMap::new();
            for (column, value) in headers.iter().zip(record.iter()) {
                if column == id_column {
                    file_id = Some(value.to_string());
                } else {
                    row.insert(column.to_string(), value.to_string());
                }
            }

            match file_id {
                Some(id) if !id.is_empty() => {
                    rows.insert(id, row);
                }
                _ => {} // no join key, row is unusable
            }
        }

        Ok(Self { rows })
    }

    /// Exact-match lookup by file identifier.
    pub fn get(&self, file_id: &str) -> Option<&BTreeMap<String, String>> {
        self.rows.get(file_id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A few known keys, for diagnosing failed lookups.
    pub fn sample_keys(&self, n: usize) -> Vec<&str> {
        let mut keys: Vec<&str> = self.rows.keys().map(String::as_str).collect();
        keys.sort();
        keys.truncate(n);
        keys
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        write!(file, "{contents}").unwrap();
    }

    #[test]
    fn test_lookup_hit_and_miss() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "ATL_metadata_2020.05.txt",
            "CORAAL.File\tAge\tGender\nATL_se0_ag1_f_01\t19\tf\n",
        );

        let table = MetadataTable::load(dir.path(), "ATL", "CORAAL.File").unwrap();
        assert_eq!(table.len(), 1);

        let row = table.get("ATL_se0_ag1_f_01").unwrap();
        assert_eq!(row.get("Age").map(String::as_str), Some("19"));
        assert_eq!(row.get("Gender").map(String::as_str), Some("f"));
        assert!(!row.contains_key("CORAAL.File"));

        assert!(table.get("ATL_se0_ag1_f_02").is_none());
    }

    #[test]
    fn test_missing_file_is_hard_error() {
        let dir = TempDir::new().unwrap();
        let err = MetadataTable::load(dir.path(), "ATL", "CORAAL.File").unwrap_err();
        assert!(matches!(err, MetadataError::NotFound { .. }));
    }

    #[test]
    fn test_ambiguity_resolves_lexicographically() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "ATL_metadata_2020.05.txt",
            "CORAAL.File\tAge\nATL_se0_ag1_f_01\t19\n",
        );
        write_file(
            dir.path(),
            "ATL_metadata_2018.10.txt",
            "CORAAL.File\tAge\nATL_se0_ag1_f_01\t17\n",
        );

        let table = MetadataTable::load(dir.path(), "ATL", "CORAAL.File").unwrap();
        let row = table.get("ATL_se0_ag1_f_01").unwrap();
        assert_eq!(row.get("Age").map(String::as_str), Some("17"));
    }

    #[test]
    fn test_rows_without_id_skipped() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "ATL_metadata_2020.05.txt",
            "CORAAL.File\tAge\n\t44\nATL_se0_ag1_f_01\t19\n",
        );

        let table = MetadataTable::load(dir.path(), "ATL", "CORAAL.File").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_is_metadata_file() {
        assert!(is_metadata_file("ATL_metadata_2020.05.txt", "ATL"));
        assert!(!is_metadata_file("ATL_se0_ag1_f_01_1.txt", "ATL"));
        assert!(!is_metadata_file("DCA_metadata_2018.txt", "ATL"));
    }

    #[test]
    fn test_sample_keys() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "ATL_metadata_2020.05.txt",
            "CORAAL.File\tAge\nb\t1\na\t2\nc\t3\n",
        );

        let table = MetadataTable::load(dir.path(), "ATL", "CORAAL.File").unwrap();
        assert_eq!(table.sample_keys(2), vec!["a", "b"]);
    }
}
