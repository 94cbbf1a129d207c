use crate::config::MalformedPolicy;
use crate::error::{FormatError, Result};
use crate::index::inverted::InvertedIndex;
use crate::index::types::{BuildStats, DocId, Record};
use crate::utils::normalize::SharedNormalizer;
use crate::utils::tokenizer::extract_terms;
use rayon::prelude::*;
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;
use std::io::BufRead;
use tracing::{debug, warn};

/// Number of corpus lines analyzed together in one parallel pass
const LINE_BATCH_SIZE: usize = 8192;

/// Accumulates records into an [`InvertedIndex`].
///
/// Term extraction runs in parallel per batch; merging into the posting
/// map is sequential, so the result does not depend on thread scheduling.
pub struct IndexBuilder {
    normalizer: SharedNormalizer,
    policy: MalformedPolicy,
    postings: FxHashMap<String, RoaringBitmap>,
    record_ids: Vec<String>,
    id_lookup: FxHashMap<String, DocId>,
    stats: BuildStats,
}

impl IndexBuilder {
    pub fn new(normalizer: SharedNormalizer) -> Self {
        Self {
            normalizer,
            policy: MalformedPolicy::default(),
            postings: FxHashMap::default(),
            record_ids: Vec::new(),
            id_lookup: FxHashMap::default(),
            stats: BuildStats::default(),
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Index a single record
    pub fn add_record(&mut self, id: &str, text: &str) {
        let terms = extract_terms(text, self.normalizer.as_ref());
        self.insert(id, terms);
    }

    /// Index a batch of records, extracting terms in parallel
    pub fn add_records(&mut self, records: &[Record]) {
        let normalizer = self.normalizer.as_ref();
        let extracted: Vec<_> = records
            .par_iter()
            .map(|record| extract_terms(&record.text, normalizer))
            .collect();

        for (record, terms) in records.iter().zip(extracted) {
            self.insert(&record.id, terms);
        }
    }

    /// Parse and index one raw corpus line, applying the malformed-line policy
    pub fn add_line(&mut self, line_no: usize, line: &str) -> std::result::Result<(), FormatError> {
        if let Some(record) = self.parse_line(line_no, line)? {
            self.add_record(&record.id, &record.text);
        }
        Ok(())
    }

    /// Index every line of a corpus reader
    pub fn add_lines<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut batch = Vec::with_capacity(LINE_BATCH_SIZE);

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(record) = self.parse_line(idx + 1, &line)? {
                batch.push(record);
            }

            if batch.len() == LINE_BATCH_SIZE {
                self.add_records(&batch);
                batch.clear();
            }
        }

        self.add_records(&batch);
        Ok(())
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn build(self) -> InvertedIndex {
        debug!(
            records = self.stats.records,
            distinct_ids = self.record_ids.len(),
            terms = self.postings.len(),
            "index built"
        );

        InvertedIndex {
            postings: self.postings,
            record_ids: self.record_ids,
            id_lookup: self.id_lookup,
            normalizer: self.normalizer,
            stats: self.stats,
        }
    }

    fn parse_line(
        &mut self,
        line_no: usize,
        line: &str,
    ) -> std::result::Result<Option<Record>, FormatError> {
        match Record::parse_line(line_no, line) {
            Ok(record) => Ok(Some(record)),
            Err(err) => match self.policy {
                MalformedPolicy::Reject => Err(err),
                MalformedPolicy::Skip => {
                    warn!(line = err.line, reason = %err.kind, "skipping malformed corpus line");
                    self.stats.skipped_lines += 1;
                    Ok(None)
                }
            },
        }
    }

    fn insert<I>(&mut self, id: &str, terms: I)
    where
        I: IntoIterator<Item = String>,
    {
        let doc_id = self.intern(id);
        for term in terms {
            self.postings.entry(term).or_default().insert(doc_id);
        }
        self.stats.records += 1;
    }

    fn intern(&mut self, id: &str) -> DocId {
        if let Some(&doc_id) = self.id_lookup.get(id) {
            self.stats.duplicate_ids += 1;
            return doc_id;
        }

        let doc_id = self.record_ids.len() as DocId;
        self.record_ids.push(id.to_string());
        self.id_lookup.insert(id.to_string(), doc_id);
        doc_id
    }
}
