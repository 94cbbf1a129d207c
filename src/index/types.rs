use crate::error::{FormatError, FormatErrorKind};
use serde::Serialize;

/// Dense internal number assigned to each distinct record identifier
pub type DocId = u32;

/// A corpus record: an opaque identifier plus the raw text to index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub text: String,
}

impl Record {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Parse a raw corpus line of the form `id<TAB>text`.
    ///
    /// The identifier is the first field and is never indexed; everything
    /// after the first tab is the record text.
    pub fn parse_line(line_no: usize, line: &str) -> Result<Self, FormatError> {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            return Err(FormatError::new(line_no, FormatErrorKind::BlankLine));
        }

        let (id, text) = line
            .split_once('\t')
            .ok_or_else(|| FormatError::new(line_no, FormatErrorKind::MissingSeparator))?;

        let id = id.trim();
        if id.is_empty() {
            return Err(FormatError::new(line_no, FormatErrorKind::EmptyId));
        }

        Ok(Self::new(id, text))
    }
}

/// Counters collected while building an index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Records added, including repeated identifiers
    pub records: usize,
    /// Records whose identifier had already been seen
    pub duplicate_ids: usize,
    /// Corpus lines dropped under `MalformedPolicy::Skip`
    pub skipped_lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let record = Record::parse_line(1, "d1\tThe cat sat.").unwrap();
        assert_eq!(record, Record::new("d1", "The cat sat."));
    }

    #[test]
    fn test_parse_line_keeps_later_tabs_in_text() {
        let record = Record::parse_line(1, "d1\ttitle\tbody text\r\n").unwrap();
        assert_eq!(record.id, "d1");
        assert_eq!(record.text, "title\tbody text");
    }

    #[test]
    fn test_parse_line_allows_empty_text() {
        let record = Record::parse_line(1, "d1\t").unwrap();
        assert_eq!(record.text, "");
    }

    #[test]
    fn test_parse_line_missing_tab() {
        let err = Record::parse_line(4, "d1 the cat").unwrap_err();
        assert_eq!(err.line, 4);
        assert_eq!(err.kind, FormatErrorKind::MissingSeparator);
    }

    #[test]
    fn test_parse_line_blank() {
        let err = Record::parse_line(2, "   ").unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::BlankLine);
    }

    #[test]
    fn test_parse_line_empty_id() {
        let err = Record::parse_line(3, " \tsome text").unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::EmptyId);
    }
}
