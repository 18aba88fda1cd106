use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// One candidate unit of upload work: an audio file, its concatenated
/// transcript text, and whatever metadata attributes joined against it.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    /// Path to the audio file on disk
    pub audio: PathBuf,
    /// File identifier: filename stem minus the trailing session segment
    pub file_id: String,
    /// Cleaned, concatenated transcript text
    pub text: String,
    /// Open-ended metadata attributes; empty when no metadata row matched
    pub metadata: BTreeMap<String, String>,
}

/// All samples collected for one component, in enumeration order.
#[derive(Debug, Clone)]
pub struct ComponentSamples {
    pub component: String,
    pub samples: Vec<Sample>,
}

/// Derive the file identifier from a filename stem by removing the trailing
/// `_<session>` segment, e.g. `ATL_se0_ag1_f_01_1` -> `ATL_se0_ag1_f_01`.
/// A stem with no underscore is used as-is.
pub fn file_id(stem: &str) -> &str {
    match stem.rsplit_once('_') {
        Some((id, _session)) => id,
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_strips_session() {
        assert_eq!(file_id("ATL_se0_ag1_f_01_1"), "ATL_se0_ag1_f_01");
        assert_eq!(file_id("DCB_se1_ag2_m_02_4"), "DCB_se1_ag2_m_02");
    }

    #[test]
    fn test_file_id_without_underscore() {
        assert_eq!(file_id("interview"), "interview");
    }
}
