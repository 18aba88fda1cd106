use std::path::Path;

use tracing::warn;

use crate::cleaning::{clean_utterance, tokenize_utterance};

/// Content is the 4th tab-separated field of a transcript line.
const CONTENT_FIELD: usize = 3;

/// Extract and concatenate all cleaned utterance text from a transcript
/// file. Returns an empty string if every line is skipped or the file cannot
/// be read; a read failure is logged, not propagated.
pub fn extract_text(path: &Path) -> String {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Error reading {}: {}", path.display(), e);
            return String::new();
        }
    };

    let mut texts = Vec::new();
    for line in data_lines(&raw) {
        if let Some(content) = content_field(line) {
            if let Some(cleaned) = clean_utterance(content) {
                if !cleaned.is_empty() {
                    texts.push(cleaned);
                }
            }
        }
    }

    texts.join(" ")
}

/// Count cleaned words across a transcript file. Returns 0 if every line is
/// skipped or the file cannot be read; a read failure is logged, not
/// propagated.
pub fn count_words(path: &Path) -> u64 {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Error reading {}: {}", path.display(), e);
            return 0;
        }
    };

    data_lines(&raw)
        .filter_map(content_field)
        .map(|content| tokenize_utterance(content).len() as u64)
        .sum()
}

/// Transcript files carry a header row; skip it.
fn data_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().skip(1)
}

fn content_field(line: &str) -> Option<&str> {
    let fields: Vec<&str> = line.trim().split('\t').collect();
    if fields.len() >= 4 {
        Some(fields[CONTENT_FIELD])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const HEADER: &str = "Line\tSpkr\tStTime\tContent\tEnTime\n";

    fn transcript(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{HEADER}").unwrap();
        for (i, content) in lines.iter().enumerate() {
            writeln!(file, "{}\tATL_int_01\t{}.0\t{}\t{}.5", i + 1, i, content, i).unwrap();
        }
        file
    }

    #[test]
    fn test_extract_text_joins_cleaned_lines() {
        let file = transcript(&["[he] <laugh> said", "(pause 0.3)", "/RD-NAME-1/ hello"]);
        assert_eq!(extract_text(file.path()), "he said hello");
    }

    #[test]
    fn test_count_words() {
        let file = transcript(&["he said hello", "(pause 1.2)", "and <cough> goodbye"]);
        assert_eq!(count_words(file.path()), 5);
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let file = transcript(&[]);
        assert_eq!(extract_text(file.path()), "");
        assert_eq!(count_words(file.path()), 0);
    }

    #[test]
    fn test_short_lines_skipped() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{HEADER}1\tATL_int_01\tno content field\n").unwrap();
        assert_eq!(count_words(file.path()), 0);
    }

    #[test]
    fn test_unreadable_file_is_empty() {
        let path = Path::new("/nonexistent/ATL_se0_ag1_f_01_1.txt");
        assert_eq!(extract_text(path), "");
        assert_eq!(count_words(path), 0);
    }
}
