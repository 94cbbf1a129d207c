#![no_main]

use boolsearch::index::InvertedIndex;
use boolsearch::query::{parse_query, tokenize, QueryExecutor};
use boolsearch::utils::IdentityNormalizer;
use libfuzzer_sys::fuzz_target;
use std::sync::{Arc, OnceLock};

static INDEX: OnceLock<InvertedIndex> = OnceLock::new();

fuzz_target!(|data: &str| {
    let index = INDEX.get_or_init(|| {
        InvertedIndex::from_records([("1", "a b c"), ("2", "b c d"), ("3", "c d e")], Arc::new(IdentityNormalizer))
    });

    // Tokenizing, parsing and evaluating arbitrary input must never panic
    let tokens = tokenize(data);
    assert!(!tokens.is_empty());

    if let Ok(query) = parse_query(data) {
        let reparsed = parse_query(&query.to_string()).expect("canonical form must reparse");
        assert_eq!(reparsed, query);
        let _ = QueryExecutor::new(index).execute(&query);
    }
});
