use crate::error::SyntaxError;
use crate::index::inverted::InvertedIndex;
use crate::query::parser::{parse_query, parse_query_with_limit, Query, QueryNode};
use rayon::prelude::*;
use roaring::RoaringBitmap;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

/// Evaluates parsed queries against one index.
///
/// Holds nothing but a shared reference, so one executor can be used from
/// many threads at once.
#[derive(Clone, Copy)]
pub struct QueryExecutor<'a> {
    index: &'a InvertedIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    /// Execute a query and return the matching records
    pub fn execute(&self, query: &Query) -> MatchSet<'a> {
        MatchSet {
            index: self.index,
            docs: self.eval(&query.root).into_owned(),
        }
    }

    fn eval(&self, node: &QueryNode) -> Cow<'a, RoaringBitmap> {
        match node {
            // Unknown terms match nothing
            QueryNode::Term(word) => match self.index.postings_for_word(word) {
                Some(docs) => Cow::Borrowed(docs),
                None => Cow::Owned(RoaringBitmap::new()),
            },
            QueryNode::Group(inner) => self.eval(inner),
            QueryNode::And(operands) => {
                let mut acc = Cow::Owned(RoaringBitmap::new());
                for (i, operand) in operands.iter().enumerate() {
                    let docs = self.eval(operand);
                    if i == 0 {
                        acc = docs;
                    } else {
                        *acc.to_mut() &= &*docs;
                    }
                    if acc.is_empty() {
                        break;
                    }
                }
                acc
            }
            QueryNode::Or(operands) => {
                let mut acc = RoaringBitmap::new();
                for operand in operands {
                    acc |= &*self.eval(operand);
                }
                Cow::Owned(acc)
            }
        }
    }
}

/// Records matching a query, tied to the index that produced them
#[derive(Clone)]
pub struct MatchSet<'a> {
    index: &'a InvertedIndex,
    docs: RoaringBitmap,
}

impl<'a> MatchSet<'a> {
    /// An empty result against `index`
    pub fn empty(index: &'a InvertedIndex) -> Self {
        Self {
            index,
            docs: RoaringBitmap::new(),
        }
    }

    /// Membership test by record identifier
    pub fn contains(&self, record_id: &str) -> bool {
        self.index
            .doc_id(record_id)
            .is_some_and(|doc_id| self.docs.contains(doc_id))
    }

    pub fn len(&self) -> usize {
        self.docs.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Matching record identifiers, in internal document order
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        let index = self.index;
        self.docs.iter().filter_map(move |doc_id| index.record_id(doc_id))
    }

    pub fn to_id_set(&self) -> BTreeSet<String> {
        self.ids().map(String::from).collect()
    }

    /// Matching identifiers sorted lexicographically
    pub fn sorted_ids(&self) -> Vec<&'a str> {
        let mut ids: Vec<_> = self.ids().collect();
        ids.sort_unstable();
        ids
    }
}

impl fmt::Debug for MatchSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.sorted_ids()).finish()
    }
}

/// Parse `query` and evaluate it against `index`
pub fn evaluate<'a>(query: &str, index: &'a InvertedIndex) -> Result<MatchSet<'a>, SyntaxError> {
    let query = parse_query(query)?;
    Ok(QueryExecutor::new(index).execute(&query))
}

/// Evaluate many queries in parallel over one shared index.
/// Results come back in input order.
pub fn evaluate_batch<'a, S>(
    queries: &[S],
    index: &'a InvertedIndex,
    max_depth: usize,
) -> Vec<Result<MatchSet<'a>, SyntaxError>>
where
    S: AsRef<str> + Sync,
{
    let executor = QueryExecutor::new(index);
    queries
        .par_iter()
        .map(|query| {
            let query = parse_query_with_limit(query.as_ref(), max_depth)?;
            Ok(executor.execute(&query))
        })
        .collect()
}
