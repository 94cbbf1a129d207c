use crate::error::SyntaxError;
use crate::index::types::{BuildStats, DocId, Record};
use crate::index::IndexBuilder;
use crate::query::executor::{evaluate, MatchSet};
use crate::utils::normalize::{Normalizer, SharedNormalizer};
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::fmt;

/// In-memory inverted index: normalized term -> set of records.
///
/// Immutable once built. It is `Send + Sync`, so any number of threads may
/// evaluate queries against one shared instance without locking.
pub struct InvertedIndex {
    pub(crate) postings: FxHashMap<String, RoaringBitmap>,
    pub(crate) record_ids: Vec<String>,
    pub(crate) id_lookup: FxHashMap<String, DocId>,
    pub(crate) normalizer: SharedNormalizer,
    pub(crate) stats: BuildStats,
}

impl InvertedIndex {
    /// Build an index from `(id, text)` pairs
    pub fn from_records<I, S, T>(records: I, normalizer: SharedNormalizer) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let records: Vec<Record> = records
            .into_iter()
            .map(|(id, text)| Record::new(id, text))
            .collect();

        let mut builder = IndexBuilder::new(normalizer);
        builder.add_records(&records);
        builder.build()
    }

    /// The normalizer the index was built with
    pub fn normalizer(&self) -> &dyn Normalizer {
        self.normalizer.as_ref()
    }

    /// Posting set of an already normalized term
    pub fn postings(&self, term: &str) -> Option<&RoaringBitmap> {
        self.postings.get(term)
    }

    /// Posting set of a lower-cased query word, normalized the same way
    /// record words were at build time
    pub fn postings_for_word(&self, word: &str) -> Option<&RoaringBitmap> {
        self.postings.get(&self.normalizer.normalize(word))
    }

    pub fn record_id(&self, doc_id: DocId) -> Option<&str> {
        self.record_ids.get(doc_id as usize).map(String::as_str)
    }

    pub fn doc_id(&self, record_id: &str) -> Option<DocId> {
        self.id_lookup.get(record_id).copied()
    }

    /// Record identifiers stored under a normalized term, sorted
    pub fn term_records(&self, term: &str) -> BTreeSet<&str> {
        self.postings(term)
            .map(|docs| docs.iter().filter_map(|doc| self.record_id(doc)).collect())
            .unwrap_or_default()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &RoaringBitmap)> {
        self.postings.iter().map(|(term, docs)| (term.as_str(), docs))
    }

    /// Number of distinct record identifiers
    pub fn record_count(&self) -> usize {
        self.record_ids.len()
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Total number of (term, record) pairs
    pub fn posting_count(&self) -> u64 {
        self.postings.values().map(RoaringBitmap::len).sum()
    }

    pub fn build_stats(&self) -> BuildStats {
        self.stats
    }

    /// Parse and evaluate a boolean query against this index
    pub fn evaluate(&self, query: &str) -> Result<MatchSet<'_>, SyntaxError> {
        evaluate(query, self)
    }
}

impl fmt::Debug for InvertedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvertedIndex")
            .field("records", &self.record_count())
            .field("terms", &self.term_count())
            .field("normalizer", &self.normalizer.name())
            .finish()
    }
}
