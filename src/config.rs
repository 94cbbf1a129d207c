use crate::error::Result;
use crate::utils::normalize::{shared_normalizer, Language, SharedNormalizer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default bound on parenthesis nesting in a query
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

/// What the index builder does with a corpus line it cannot parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Abort the build with the first `FormatError`
    #[default]
    Reject,
    /// Log a warning, count the line and continue
    Skip,
}

/// What a query batch does with a query that fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryErrorPolicy {
    /// Abort the batch with the first `SyntaxError`
    #[default]
    Fail,
    /// Log a warning and treat the query as matching nothing
    Empty,
}

/// Search configuration, loadable from JSON.
/// Missing fields fall back to [`SearchConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub language: Language,
    /// Disable to index and query raw lower-cased words
    pub stem: bool,
    pub malformed_policy: MalformedPolicy,
    pub query_error_policy: QueryErrorPolicy,
    pub max_nesting_depth: usize,
    /// Number of terms listed by `stats`
    pub top_terms: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            language: Language::Russian,
            stem: true,
            malformed_policy: MalformedPolicy::Reject,
            query_error_policy: QueryErrorPolicy::Fail,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            top_terms: 15,
        }
    }
}

impl SearchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn normalizer(&self) -> SharedNormalizer {
        shared_normalizer(self.language, self.stem)
    }
}
