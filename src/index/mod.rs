pub mod build;
pub mod inverted;
pub mod stats;
pub mod types;

pub use build::IndexBuilder;
pub use inverted::InvertedIndex;
pub use stats::IndexStats;
pub use types::*;
