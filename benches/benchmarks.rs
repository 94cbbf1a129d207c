//! Performance benchmarks for boolsearch
//!
//! Run with: cargo bench

use boolsearch::index::{IndexBuilder, InvertedIndex};
use boolsearch::utils::{shared_normalizer, Language};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io::Cursor;

const WORDS: &[&str] = &[
    "search", "index", "record", "query", "cat", "dog", "running", "engine", "boolean", "term",
    "parser", "token", "stemming", "language", "corpus", "document", "relevance", "fast", "slow", "tree",
];

/// Synthetic corpus in `id<TAB>text` form
fn corpus(records: usize) -> String {
    let mut out = String::new();
    for i in 0..records {
        let words: Vec<&str> = (0..12).map(|j| WORDS[(i * 7 + j * 13 + i / 3) % WORDS.len()]).collect();
        out.push_str(&format!("doc{}\t{}.\n", i, words.join(" ")));
    }
    out
}

fn build(text: &str) -> InvertedIndex {
    let mut builder = IndexBuilder::new(shared_normalizer(Language::English, true));
    builder.add_lines(Cursor::new(text)).expect("Failed to index corpus");
    builder.build()
}

fn bench_query_parsing(c: &mut Criterion) {
    let queries = vec![
        "simple",
        "two words",
        "cat | dog",
        "search (index | record) query",
        "((a | b) (c | d)) | (e f g)",
    ];

    let mut group = c.benchmark_group("query_parsing");
    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, &q| {
            b.iter(|| boolsearch::query::parse_query(black_box(q)))
        });
    }
    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    group.sample_size(20);

    for records in [1_000, 10_000] {
        let text = corpus(records);
        group.bench_with_input(BenchmarkId::from_parameter(records), &text, |b, text| {
            b.iter(|| build(black_box(text)))
        });
    }
    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let index = build(&corpus(10_000));

    let mut group = c.benchmark_group("evaluation");
    for query in ["cat", "cat dog", "cat | dog", "running (engine | parser) term", "missing | cat missing"] {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, &q| {
            b.iter(|| index.evaluate(black_box(q)))
        });
    }
    group.finish();
}

fn bench_batch_evaluation(c: &mut Criterion) {
    let index = build(&corpus(10_000));
    let queries: Vec<String> = (0..256)
        .map(|i| format!("{} ({} | {})", WORDS[i % WORDS.len()], WORDS[(i + 3) % WORDS.len()], WORDS[(i + 9) % WORDS.len()]))
        .collect();

    c.bench_function("evaluate_batch_256", |b| {
        b.iter(|| boolsearch::query::evaluate_batch(black_box(&queries), &index, 128))
    });
}

criterion_group!(
    benches,
    bench_query_parsing,
    bench_index_build,
    bench_evaluation,
    bench_batch_evaluation,
);

criterion_main!(benches);
