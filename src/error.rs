//! Error types for the index builder, the query compiler and the task-file
//! readers.
//!
//! [`FormatError`] and [`SyntaxError`] are the two failures of the core: the
//! first rejects a single malformed input line, the second a single query.
//! Neither one touches an index that has already been built.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A numbered query from a batch failed to parse
    #[error("query {qid}: {source}")]
    Query {
        qid: u32,
        #[source]
        source: SyntaxError,
    },

    /// An objects row points at a query id that was never loaded
    #[error("query {qid} is referenced by the objects file but was never loaded")]
    UnknownQuery { qid: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A malformed line in the corpus, queries or objects file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct FormatError {
    /// 1-based line number in the source file
    pub line: usize,
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub fn new(line: usize, kind: FormatErrorKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatErrorKind {
    #[error("blank line")]
    BlankLine,

    #[error("missing tab between identifier and text")]
    MissingSeparator,

    #[error("empty identifier")]
    EmptyId,

    #[error("expected {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },

    #[error("invalid query id `{0}`")]
    InvalidQueryId(String),
}

/// A query that does not conform to the boolean grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// Character offset into the query where the problem was detected
    pub offset: usize,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("empty query")]
    EmptyQuery,

    #[error("unmatched `(`")]
    UnmatchedOpenParen,

    #[error("unmatched `)`")]
    UnmatchedCloseParen,

    #[error("query ends where a term or `(` was expected")]
    UnexpectedEnd,

    #[error("unexpected {0}")]
    UnexpectedToken(String),

    #[error("parentheses nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let err = FormatError::new(7, FormatErrorKind::MissingSeparator);
        assert_eq!(err.to_string(), "line 7: missing tab between identifier and text");
    }

    #[test]
    fn test_syntax_error_display() {
        let err = SyntaxError::new(SyntaxErrorKind::UnmatchedOpenParen, 3);
        assert_eq!(err.to_string(), "unmatched `(` at offset 3");
    }

    #[test]
    fn test_wrapped_errors_are_transparent() {
        let err: Error = SyntaxError::new(SyntaxErrorKind::EmptyQuery, 0).into();
        assert_eq!(err.to_string(), "empty query at offset 0");
    }
}
