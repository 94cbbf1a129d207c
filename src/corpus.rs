//! Readers for the task files: the record corpus, the numbered queries and
//! the objects to judge.

use crate::config::SearchConfig;
use crate::error::{FormatError, FormatErrorKind, Result};
use crate::index::{IndexBuilder, InvertedIndex};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// One line of the queries file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLine {
    pub qid: u32,
    pub text: String,
}

/// One row of the objects file: is `doc_id` relevant to query `qid`?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLine {
    pub object_id: String,
    pub qid: u32,
    pub doc_id: String,
}

/// Build an index from a corpus file using the configured normalizer and
/// malformed-line policy
pub fn load_index(path: &Path, config: &SearchConfig) -> Result<InvertedIndex> {
    let reader = BufReader::new(File::open(path)?);
    let mut builder = IndexBuilder::new(config.normalizer()).with_policy(config.malformed_policy);
    builder.add_lines(reader)?;
    let index = builder.build();

    info!(
        path = %path.display(),
        records = index.record_count(),
        terms = index.term_count(),
        skipped = index.build_stats().skipped_lines,
        "corpus indexed"
    );

    Ok(index)
}

/// Parse `qid<TAB>query`; fields after a second tab are ignored
pub fn parse_query_line(line_no: usize, line: &str) -> std::result::Result<QueryLine, FormatError> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() {
        return Err(FormatError::new(line_no, FormatErrorKind::BlankLine));
    }

    let (qid, rest) = line
        .split_once('\t')
        .ok_or_else(|| FormatError::new(line_no, FormatErrorKind::MissingSeparator))?;
    let qid = parse_qid(line_no, qid)?;
    let text = rest.split('\t').next().unwrap_or_default();

    Ok(QueryLine {
        qid,
        text: text.to_string(),
    })
}

pub fn read_queries<R: BufRead>(reader: R) -> Result<Vec<QueryLine>> {
    let mut queries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        queries.push(parse_query_line(idx + 1, &line?)?);
    }
    Ok(queries)
}

pub fn load_queries(path: &Path) -> Result<Vec<QueryLine>> {
    read_queries(BufReader::new(File::open(path)?))
}

/// Parse a CSV row `ObjectId,QueryId,DocumentId`
pub fn parse_object_line(line_no: usize, line: &str) -> std::result::Result<ObjectLine, FormatError> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() < 3 {
        return Err(FormatError::new(
            line_no,
            FormatErrorKind::MissingFields {
                expected: 3,
                found: fields.len(),
            },
        ));
    }

    Ok(ObjectLine {
        object_id: fields[0].to_string(),
        qid: parse_qid(line_no, fields[1])?,
        doc_id: fields[2].to_string(),
    })
}

/// Read the objects CSV, skipping its header line
pub fn read_objects<R: BufRead>(reader: R) -> Result<Vec<ObjectLine>> {
    let mut objects = Vec::new();
    for (idx, line) in reader.lines().enumerate().skip(1) {
        objects.push(parse_object_line(idx + 1, &line?)?);
    }
    Ok(objects)
}

pub fn load_objects(path: &Path) -> Result<Vec<ObjectLine>> {
    read_objects(BufReader::new(File::open(path)?))
}

fn parse_qid(line_no: usize, field: &str) -> std::result::Result<u32, FormatError> {
    let field = field.trim();
    field
        .parse()
        .map_err(|_| FormatError::new(line_no, FormatErrorKind::InvalidQueryId(field.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    #[test]
    fn test_parse_query_line() {
        let q = parse_query_line(1, "12\tcat (dog | bird)\n").unwrap();
        assert_eq!(q.qid, 12);
        assert_eq!(q.text, "cat (dog | bird)");
    }

    #[test]
    fn test_parse_query_line_ignores_extra_fields() {
        let q = parse_query_line(1, "3\tcat\tignored").unwrap();
        assert_eq!(q.text, "cat");
    }

    #[test]
    fn test_parse_query_line_errors() {
        assert_eq!(
            parse_query_line(2, "cat dog").unwrap_err().kind,
            FormatErrorKind::MissingSeparator
        );
        assert_eq!(
            parse_query_line(2, "x\tcat").unwrap_err().kind,
            FormatErrorKind::InvalidQueryId("x".to_string())
        );
    }

    #[test]
    fn test_read_queries() {
        let queries = read_queries(Cursor::new("1\tcat\n2\tdog | cat\r\n")).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].text, "dog | cat");
    }

    #[test]
    fn test_read_objects_skips_header() {
        let objects = read_objects(Cursor::new("ObjectId,QueryId,DocumentId\n1,1,d1\n2,1,d2\n")).unwrap();
        assert_eq!(
            objects,
            vec![
                ObjectLine {
                    object_id: "1".to_string(),
                    qid: 1,
                    doc_id: "d1".to_string()
                },
                ObjectLine {
                    object_id: "2".to_string(),
                    qid: 1,
                    doc_id: "d2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_read_objects_short_row() {
        let err = read_objects(Cursor::new("header\n1,1\n")).unwrap_err();
        match err {
            Error::Format(err) => {
                assert_eq!(err.line, 2);
                assert_eq!(
                    err.kind,
                    FormatErrorKind::MissingFields {
                        expected: 3,
                        found: 2
                    }
                );
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_index_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.tsv");
        std::fs::write(&path, "d1\tThe cats sat.\nd2\tA dog ran\n").unwrap();

        let config = SearchConfig {
            language: crate::utils::normalize::Language::English,
            ..SearchConfig::default()
        };
        let index = load_index(&path, &config).unwrap();
        assert_eq!(index.record_count(), 2);
        assert!(index.evaluate("cat").unwrap().contains("d1"));
    }

    #[test]
    fn test_load_index_missing_file() {
        let err = load_index(Path::new("/nonexistent/docs.tsv"), &SearchConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
