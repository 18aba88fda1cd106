pub mod metadata;
pub mod textgrid;
pub mod transcript;
pub mod walker;

pub use metadata::{MetadataError, MetadataTable};
pub use textgrid::duration_seconds;
pub use transcript::{count_words, extract_text};
pub use walker::{analyze_corpus, collect_samples};
