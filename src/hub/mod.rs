pub mod client;
pub mod dataset;

pub use client::{HubClient, HubConfig};
pub use dataset::DatasetBundle;
