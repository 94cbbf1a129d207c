//! # boolsearch - Boolean keyword search over an in-memory inverted index
//!
//! Records are `id<TAB>text` lines. Each record's words are lower-cased,
//! stemmed and stored as postings; queries combine words with implicit AND
//! (whitespace), `|` for OR and parentheses for grouping.
//!
//! ## Architecture
//!
//! - [`index`] - Record parsing, index building and statistics
//! - [`query`] - Query tokenizing, parsing and set evaluation
//! - [`utils`] - Term normalization, word splitting, progress spinner
//! - [`corpus`] - Readers for the corpus, queries and objects files
//! - [`judge`] - The batch relevance-judging pipeline
//! - [`output`] - Submission CSV, results JSON and terminal output
//! - [`config`] - JSON-loadable search configuration
//! - [`error`] - Error types
//!
//! ## Quick Start
//!
//! ```
//! use boolsearch::index::InvertedIndex;
//! use boolsearch::utils::{Language, SnowballNormalizer};
//! use std::sync::Arc;
//!
//! let index = InvertedIndex::from_records(
//!     [("1", "The cat sat"), ("2", "A dog ran"), ("3", "cat and dog")],
//!     Arc::new(SnowballNormalizer::new(Language::English)),
//! );
//!
//! let matches = index.evaluate("cat | dog ran").unwrap();
//! assert_eq!(matches.sorted_ids(), vec!["1", "2", "3"]);
//!
//! let both = index.evaluate("cats dogs").unwrap();
//! assert_eq!(both.sorted_ids(), vec!["3"]);
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod judge;
pub mod output;
pub mod query;
pub mod utils;

pub use config::SearchConfig;
pub use error::{Error, FormatError, Result, SyntaxError};
pub use index::{IndexBuilder, InvertedIndex};
pub use query::{evaluate, parse_query, MatchSet, Query};
