pub mod component;
pub mod sample;
pub mod stats;

pub use component::*;
pub use sample::*;
pub use stats::*;
