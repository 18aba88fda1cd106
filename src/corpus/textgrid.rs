use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

lazy_static! {
    static ref XMAX: Regex = Regex::new(r"xmax\s*=\s*([\d.]+)").unwrap();
}

/// Read a recording's total duration in seconds from its alignment-grid
/// file: the first line whose trimmed form starts with `xmax =` carries the
/// file-level closing timestamp. Returns 0.0 if no such line exists or the
/// file cannot be read; a read failure is logged, not propagated.
pub fn duration_seconds(path: &Path) -> f64 {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Error reading {}: {}", path.display(), e);
            return 0.0;
        }
    };

    for line in raw.lines() {
        if line.trim().starts_with("xmax =") {
            if let Some(caps) = XMAX.captures(line) {
                if let Ok(value) = caps[1].parse::<f64>() {
                    return value;
                }
            }
        }
    }

    0.0
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_reads_file_level_xmax() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "File type = \"ooTextFile\"\nxmin = 0 \nxmax = 125.430000 \ntiers? <exists> \n"
        )
        .unwrap();
        assert_eq!(duration_seconds(file.path()), 125.43);
    }

    #[test]
    fn test_first_xmax_wins() {
        // Interval tiers repeat xmax; only the first (file-level) one counts.
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "xmax = 90.5\n    xmax = 3.2\n").unwrap();
        assert_eq!(duration_seconds(file.path()), 90.5);
    }

    #[test]
    fn test_no_xmax_is_zero() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "File type = \"ooTextFile\"\nxmin = 0\n").unwrap();
        assert_eq!(duration_seconds(file.path()), 0.0);
    }

    #[test]
    fn test_unreadable_file_is_zero() {
        assert_eq!(duration_seconds(Path::new("/nonexistent/a.TextGrid")), 0.0);
    }
}
