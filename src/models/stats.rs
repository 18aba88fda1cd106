use serde::Serialize;

/// Recomputed aggregate statistics for one component.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ComponentStats {
    /// Total word count across transcript files
    pub words: u64,
    /// Total recording duration in seconds across alignment-grid files
    pub seconds: f64,
    /// Number of transcript files processed
    pub transcript_files: usize,
    /// Number of alignment-grid files processed
    pub grid_files: usize,
}

impl ComponentStats {
    /// Total duration in hours
    pub fn hours(&self) -> f64 {
        self.seconds / 3600.0
    }
}

/// Stats for one component, paired with its name for report order.
#[derive(Debug, Clone)]
pub struct ComponentReport {
    pub component: String,
    pub stats: ComponentStats,
}
