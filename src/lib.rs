pub mod config;
pub mod grams;
pub mod normalize;
pub mod search;
pub mod store;

pub use config::{GramSource, IndexConfig};
pub use search::edit::{edit_similarity, levenshtein};
pub use search::Match;

use anyhow::Result;
use crate::normalize::normalize;
use crate::search::SearchEngine;
use crate::store::GramStore;
use std::collections::HashMap;
use tracing::{debug, trace};

/// In-memory fuzzy string index.
///
/// Values are indexed once per configured gram size; queries try an exact
/// lookup on the normalized value first and otherwise rank indexed values by
/// gram-vector cosine similarity, optionally re-scored by edit distance.
/// Not internally synchronized: wrap it in a lock to share across threads.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    config: IndexConfig,
    /// One store per gram size, at offset `gram_size - gram_size_lower`.
    stores: Vec<GramStore>,
    /// Normalized value to the original value first inserted for it.
    exact_set: HashMap<String, String>,
}

impl FuzzyIndex {
    pub fn new<I, S>(
        values: I,
        use_levenshtein: bool,
        gram_size_lower: usize,
        gram_size_upper: usize,
        min_score: f64,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let config = IndexConfig::new(use_levenshtein, gram_size_lower, gram_size_upper, min_score);
        Self::with_config(config, values)
    }

    pub fn with_config<I, S>(config: IndexConfig, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        config.validate()?;
        let stores = config.gram_sizes().map(GramStore::new).collect();
        let mut index = Self {
            config,
            stores,
            exact_set: HashMap::new(),
        };
        index.extend(values);

        debug!(
            gram_size_lower = index.config.gram_size_lower,
            gram_size_upper = index.config.gram_size_upper,
            use_levenshtein = index.config.use_levenshtein,
            min_score = index.config.min_score,
            values = index.len(),
            "Fuzzy index built"
        );
        Ok(index)
    }

    pub fn from_json_config<I, S>(json: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(IndexConfig::from_json(json)?, values)
    }

    /// Adds `value` at every gram size. A value whose normalized form is
    /// already present is ignored, and the first original is kept.
    pub fn insert(&mut self, value: &str) {
        let normalized = normalize(value);
        if self.exact_set.contains_key(&normalized) {
            trace!(value = %value, "Skipping duplicate value");
            return;
        }

        let counted_from = match self.config.gram_source {
            GramSource::Raw => value,
            GramSource::Normalized => normalized.as_str(),
        };
        for store in &mut self.stores {
            store.insert(normalized.clone(), counted_from);
        }

        self.exact_set.insert(normalized, value.to_string());
    }

    /// Indexed values ranked by similarity to `value`, best first, none below
    /// the configured minimum score. An exact (case-insensitive) hit returns
    /// only the stored original with score 1.0.
    pub fn query(&self, value: &str) -> Vec<Match> {
        let normalized = normalize(value);
        if let Some(original) = self.exact_set.get(&normalized) {
            trace!(value = %value, "Exact match");
            return vec![Match::new(original.clone(), 1.0)];
        }

        SearchEngine::new(&self.stores, &self.config).search(&normalized)
    }

    pub fn query_top(&self, value: &str, limit: usize) -> Vec<Match> {
        let mut results = self.query(value);
        results.truncate(limit);
        results
    }

    /// Original value stored for `value`'s normalized form.
    pub fn get_exact(&self, value: &str) -> Option<&str> {
        self.exact_set.get(&normalize(value)).map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.exact_set.contains_key(&normalize(value))
    }

    /// Number of distinct normalized values.
    pub fn len(&self) -> usize {
        self.exact_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact_set.is_empty()
    }

    /// Stored originals, in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.exact_set.values().map(String::as_str)
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn use_levenshtein(&self) -> bool {
        self.config.use_levenshtein
    }

    pub fn set_use_levenshtein(&mut self, enabled: bool) {
        self.config.use_levenshtein = enabled;
    }

    pub fn set_min_score(&mut self, min_score: f64) -> Result<()> {
        config::validate_min_score(min_score)?;
        self.config.min_score = min_score;
        Ok(())
    }

    /// Index store for one gram size, if that size is configured.
    pub fn store(&self, gram_size: usize) -> Option<&GramStore> {
        let offset = gram_size.checked_sub(self.config.gram_size_lower)?;
        self.stores.get(offset)
    }
}

impl<S: AsRef<str>> Extend<S> for FuzzyIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, values: I) {
        for value in values {
            self.insert(value.as_ref());
        }
    }
}
