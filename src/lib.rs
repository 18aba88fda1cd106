pub mod cleaning;
pub mod corpus;
pub mod hub;
pub mod models;
pub mod report;

pub use cleaning::{clean_utterance, tokenize_utterance};
pub use corpus::{
    analyze_corpus, collect_samples, count_words, duration_seconds, extract_text, MetadataError,
    MetadataTable,
};
pub use hub::{DatasetBundle, HubClient, HubConfig};
pub use models::{
    file_id, ComponentReport, ComponentSamples, ComponentSpec, ComponentStats, CorpusSpec,
    ExpectedStats, Sample,
};
pub use report::render_report;
