//! Output formatting: the relevance submission, the per-query results dump
//! and coloured terminal listings.

use crate::corpus::ObjectLine;
use crate::error::{Error, Result};
use crate::query::MatchSet;
use std::collections::BTreeMap;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Write the submission CSV (`ObjectId,Relevance`), one row per object in
/// input order. Returns how many objects were judged relevant.
pub fn write_submission<W: Write>(
    mut out: W,
    objects: &[ObjectLine],
    results: &BTreeMap<u32, MatchSet<'_>>,
) -> Result<usize> {
    let mut relevant = 0;

    writeln!(out, "ObjectId,Relevance")?;
    for object in objects {
        let matches = results
            .get(&object.qid)
            .ok_or(Error::UnknownQuery { qid: object.qid })?;
        let hit = matches.contains(&object.doc_id);
        if hit {
            relevant += 1;
        }
        writeln!(out, "{},{}", object.object_id, u8::from(hit))?;
    }
    out.flush()?;

    Ok(relevant)
}

/// Dump every query's matching ids as a JSON object keyed by query id
pub fn write_results_json<W: Write>(out: W, results: &BTreeMap<u32, MatchSet<'_>>) -> Result<()> {
    let dump: BTreeMap<u32, Vec<&str>> = results
        .iter()
        .map(|(qid, matches)| (*qid, matches.sorted_ids()))
        .collect();
    serde_json::to_writer_pretty(out, &dump)?;
    Ok(())
}

/// Print the ids matching one query, preceded by a header line
pub fn print_matches(query: &str, matches: &MatchSet<'_>, color: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color);

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    write!(stdout, "{}", query)?;
    stdout.reset()?;

    let count_color = if matches.is_empty() { Color::Red } else { Color::Green };
    stdout.set_color(ColorSpec::new().set_fg(Some(count_color)))?;
    writeln!(stdout, " ({} matches)", matches.len())?;
    stdout.reset()?;

    for id in matches.sorted_ids() {
        writeln!(stdout, "{}", id)?;
    }

    Ok(())
}

/// Print a query error with a caret under the offending character
pub fn print_query_error(query: &str, offset: usize, message: &str, color: ColorChoice) -> io::Result<()> {
    let mut stderr = StandardStream::stderr(color);

    writeln!(stderr, "{}", query)?;
    stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    writeln!(stderr, "{}^ {}", " ".repeat(offset), message)?;
    stderr.reset()?;

    Ok(())
}
