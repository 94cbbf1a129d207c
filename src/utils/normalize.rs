//! Term normalization shared by the index builder and the query evaluator.
//!
//! Both sides must reduce a word to the same term, so the index owns a
//! single [`SharedNormalizer`] handle and the evaluator always borrows it
//! from the index instead of building its own.

use clap::ValueEnum;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Reduces an already lower-cased word to its indexing form.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, word: &str) -> String;

    fn name(&self) -> &str {
        "custom"
    }
}

/// Handle passed to both the index builder and the evaluator
pub type SharedNormalizer = Arc<dyn Normalizer>;

impl<F> Normalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, word: &str) -> String {
        self(word)
    }
}

/// Snowball languages available for stemming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    Danish,
    Dutch,
    English,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Romanian,
    #[default]
    Russian,
    Spanish,
    Swedish,
    Tamil,
    Turkish,
}

impl Language {
    pub fn algorithm(self) -> Algorithm {
        match self {
            Language::Arabic => Algorithm::Arabic,
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Greek => Algorithm::Greek,
            Language::Hungarian => Algorithm::Hungarian,
            Language::Italian => Algorithm::Italian,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Romanian => Algorithm::Romanian,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
            Language::Tamil => Algorithm::Tamil,
            Language::Turkish => Algorithm::Turkish,
        }
    }
}

/// Snowball stemmer backed normalizer
pub struct SnowballNormalizer {
    stemmer: Stemmer,
}

impl SnowballNormalizer {
    pub fn new(language: Language) -> Self {
        Self {
            stemmer: Stemmer::create(language.algorithm()),
        }
    }
}

impl Normalizer for SnowballNormalizer {
    fn normalize(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }

    fn name(&self) -> &str {
        "snowball"
    }
}

/// Leaves words untouched; terms must then match exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl Normalizer for IdentityNormalizer {
    fn normalize(&self, word: &str) -> String {
        word.to_string()
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Build the shared handle for a language, or an identity one when stemming is off
pub fn shared_normalizer(language: Language, stem: bool) -> SharedNormalizer {
    if stem {
        Arc::new(SnowballNormalizer::new(language))
    } else {
        Arc::new(IdentityNormalizer)
    }
}
