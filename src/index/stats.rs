use crate::index::inverted::InvertedIndex;
use serde::Serialize;

/// Summary of a built index
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub records: usize,
    pub distinct_ids: usize,
    pub duplicate_ids: usize,
    pub skipped_lines: usize,
    pub terms: usize,
    pub postings: u64,
    pub normalizer: String,
    /// Most frequent terms by document frequency, ties broken alphabetically
    pub top_terms: Vec<(String, u64)>,
}

impl IndexStats {
    pub fn collect(index: &InvertedIndex, top: usize) -> Self {
        let mut by_freq: Vec<(&str, u64)> = index.terms().map(|(term, docs)| (term, docs.len())).collect();
        by_freq.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let build = index.build_stats();
        Self {
            records: build.records,
            distinct_ids: index.record_count(),
            duplicate_ids: build.duplicate_ids,
            skipped_lines: build.skipped_lines,
            terms: index.term_count(),
            postings: index.posting_count(),
            normalizer: index.normalizer().name().to_string(),
            top_terms: by_freq
                .into_iter()
                .take(top)
                .map(|(term, freq)| (term.to_string(), freq))
                .collect(),
        }
    }

    /// Average number of distinct terms per record
    pub fn avg_terms_per_record(&self) -> f64 {
        if self.distinct_ids == 0 {
            0.0
        } else {
            self.postings as f64 / self.distinct_ids as f64
        }
    }
}

/// Display index statistics
pub fn show_stats(stats: &IndexStats) {
    println!("Index Statistics");
    println!("================");
    println!();
    println!("Records read:     {}", stats.records);
    println!("Distinct ids:     {}", stats.distinct_ids);
    println!("Duplicate ids:    {}", stats.duplicate_ids);
    println!("Skipped lines:    {}", stats.skipped_lines);
    println!("Terms:            {}", stats.terms);
    println!("Postings:         {}", stats.postings);
    println!("Terms per record: {:.1}", stats.avg_terms_per_record());
    println!("Normalizer:       {}", stats.normalizer);

    if !stats.top_terms.is_empty() {
        println!();
        println!("Top terms by document frequency:");
        for (term, freq) in &stats.top_terms {
            println!("  {:20} {}", term, freq);
        }
    }

    if stats.terms > stats.top_terms.len() && !stats.top_terms.is_empty() {
        println!("  ... and {} more", stats.terms - stats.top_terms.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::normalize::IdentityNormalizer;
    use std::sync::Arc;

    #[test]
    fn test_collect() {
        let index = InvertedIndex::from_records(
            [
                ("d1", "the cat sat"),
                ("d2", "the dog ran"),
                ("d3", "cat and dog"),
                ("d1", "the end"),
            ],
            Arc::new(IdentityNormalizer),
        );

        let stats = IndexStats::collect(&index, 3);
        assert_eq!(stats.records, 4);
        assert_eq!(stats.distinct_ids, 3);
        assert_eq!(stats.duplicate_ids, 1);
        assert_eq!(stats.terms, 7);
        assert_eq!(stats.normalizer, "identity");
        assert_eq!(
            stats.top_terms,
            vec![
                ("cat".to_string(), 2),
                ("dog".to_string(), 2),
                ("the".to_string(), 2),
            ]
        );
        assert!((stats.avg_terms_per_record() - 10.0 / 3.0).abs() < 1e-9);
    }
}
