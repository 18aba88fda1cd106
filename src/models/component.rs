use serde::{Deserialize, Serialize};

/// Published aggregate statistics for one component, used as the reference
/// side of the verification report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExpectedStats {
    /// Total recording duration in hours
    pub hours: f64,
    /// Total word count
    pub words: u64,
}

/// One named partition of the corpus, owning a directory of audio,
/// transcripts, alignment grids, and a metadata table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Component name, also the directory name (e.g. "ATL")
    pub name: String,
    /// Published statistics this component is verified against
    pub expected: ExpectedStats,
}

/// The corpus layout: the ordered component list and the metadata join
/// column. Injectable so the pipelines are testable against fixture corpora.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSpec {
    /// Components in report order
    pub components: Vec<ComponentSpec>,
    /// Metadata column holding the file identifier
    pub id_column: String,
}

impl CorpusSpec {
    /// The 2021 CORAAL release: eight components, expected values from the
    /// published corpus documentation.
    pub fn coraal() -> Self {
        let components = [
            ("ATL", 8.62, 93_525),
            ("DCA", 34.02, 333_537),
            ("DCB", 46.04, 515_189),
            ("DTA", 25.12, 240_767),
            ("LES", 8.44, 102_171),
            ("PRV", 13.95, 156_176),
            ("ROC", 11.80, 126_140),
            ("VLD", 11.49, 111_973),
        ]
        .into_iter()
        .map(|(name, hours, words)| ComponentSpec {
            name: name.to_string(),
            expected: ExpectedStats { hours, words },
        })
        .collect();

        Self {
            components,
            id_column: "CORAAL.File".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coraal_spec() {
        let spec = CorpusSpec::coraal();
        assert_eq!(spec.components.len(), 8);
        assert_eq!(spec.components[0].name, "ATL");
        assert_eq!(spec.components[7].name, "VLD");
        assert_eq!(spec.id_column, "CORAAL.File");
    }
}
