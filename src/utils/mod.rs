//! Utility functions shared by indexing and querying.
//!
//! ## Modules
//!
//! - [`normalize`] - The term normalization capability (Snowball stemming)
//! - [`tokenizer`] - Word splitting and term extraction for record text
//! - [`progress`] - Terminal spinner for long-running CLI steps
//!
//! ## Key Functions
//!
//! ```no_run
//! use boolsearch::utils::{extract_terms, Language, SnowballNormalizer};
//!
//! let normalizer = SnowballNormalizer::new(Language::English);
//! let terms = extract_terms("Cats were running.", &normalizer);
//! // Returns: {"cat", "were", "run"}
//! ```

pub mod normalize;
pub mod progress;
pub mod tokenizer;

pub use normalize::*;
pub use progress::*;
pub use tokenizer::*;
