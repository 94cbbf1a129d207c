//! The relevance-judging pipeline: index the corpus, run every numbered
//! query, mark each object relevant or not and write the submission.

use crate::config::{QueryErrorPolicy, SearchConfig};
use crate::corpus::{load_index, load_objects, load_queries, QueryLine};
use crate::error::Error;
use crate::index::InvertedIndex;
use crate::output::{write_results_json, write_submission};
use crate::query::{evaluate_batch, MatchSet};
use crate::utils::progress::Spinner;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Input and output files of a judging run
#[derive(Debug, Clone)]
pub struct JudgePaths {
    pub docs_file: PathBuf,
    pub queries_file: PathBuf,
    pub objects_file: PathBuf,
    pub submission_file: PathBuf,
    pub results_json: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JudgeSummary {
    pub records: usize,
    pub queries: usize,
    /// Queries judged empty under `QueryErrorPolicy::Empty`
    pub failed_queries: usize,
    pub objects: usize,
    pub relevant: usize,
}

/// Evaluate numbered queries in parallel, keyed by query id.
///
/// A query that fails to parse either aborts the batch or matches nothing,
/// depending on the configured policy. Returns the results and the number
/// of failed queries.
pub fn run_queries<'a>(
    queries: &[QueryLine],
    index: &'a InvertedIndex,
    config: &SearchConfig,
) -> crate::error::Result<(BTreeMap<u32, MatchSet<'a>>, usize)> {
    let texts: Vec<&str> = queries.iter().map(|q| q.text.as_str()).collect();
    let evaluated = evaluate_batch(&texts, index, config.max_nesting_depth);

    let mut results = BTreeMap::new();
    let mut failed = 0;

    for (query, outcome) in queries.iter().zip(evaluated) {
        let matches = match outcome {
            Ok(matches) => matches,
            Err(source) => match config.query_error_policy {
                QueryErrorPolicy::Fail => {
                    return Err(Error::Query {
                        qid: query.qid,
                        source,
                    });
                }
                QueryErrorPolicy::Empty => {
                    warn!(qid = query.qid, error = %source, "query failed to parse, judging it as matching nothing");
                    failed += 1;
                    MatchSet::empty(index)
                }
            },
        };

        debug!(qid = query.qid, query = %query.text, matches = matches.len(), "query evaluated");
        if results.insert(query.qid, matches).is_some() {
            warn!(qid = query.qid, "duplicate query id, keeping the later query");
        }
    }

    Ok((results, failed))
}

/// Run the whole pipeline and write the submission file
pub fn run_judge(paths: &JudgePaths, config: &SearchConfig, silent: bool) -> Result<JudgeSummary> {
    let spinner = (!silent).then(|| Spinner::start(format!("Indexing {}...", paths.docs_file.display())));
    let index = load_index(&paths.docs_file, config)
        .with_context(|| format!("Failed to index {}", paths.docs_file.display()))?;
    if let Some(spinner) = spinner {
        spinner.finish(format!(
            "Indexed {} records ({} terms)",
            index.record_count(),
            index.term_count()
        ));
    }

    let queries = load_queries(&paths.queries_file)
        .with_context(|| format!("Failed to read {}", paths.queries_file.display()))?;
    let objects = load_objects(&paths.objects_file)
        .with_context(|| format!("Failed to read {}", paths.objects_file.display()))?;

    let (results, failed_queries) = run_queries(&queries, &index, config)
        .with_context(|| format!("Failed to evaluate {}", paths.queries_file.display()))?;

    let submission = File::create(&paths.submission_file)
        .with_context(|| format!("Failed to create {}", paths.submission_file.display()))?;
    let relevant = write_submission(BufWriter::new(submission), &objects, &results)
        .with_context(|| format!("Failed to write {}", paths.submission_file.display()))?;

    if let Some(path) = &paths.results_json {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_results_json(BufWriter::new(file), &results)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let summary = JudgeSummary {
        records: index.record_count(),
        queries: queries.len(),
        failed_queries,
        objects: objects.len(),
        relevant,
    };
    info!(
        queries = summary.queries,
        failed = summary.failed_queries,
        objects = summary.objects,
        relevant = summary.relevant,
        "submission written"
    );

    Ok(summary)
}
