pub mod cosine;
pub mod edit;

use crate::config::IndexConfig;
use crate::store::GramStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub word: String,
    pub score: f64,
}

impl Match {
    pub fn new(word: impl Into<String>, score: f64) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// Stable sort, highest score first.
pub fn sort_by_score(matches: &mut [Match]) {
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Fuzzy stage of a query: runs after the exact-set lookup has missed.
///
/// Gram sizes are tried from the largest down; the first one whose inverted
/// index produces any candidate decides the result, even if the score filter
/// then removes every candidate.
pub struct SearchEngine<'a> {
    stores: &'a [GramStore],
    config: &'a IndexConfig,
}

impl<'a> SearchEngine<'a> {
    pub fn new(stores: &'a [GramStore], config: &'a IndexConfig) -> Self {
        Self { stores, config }
    }

    pub fn search(&self, normalized_query: &str) -> Vec<Match> {
        for store in self.stores.iter().rev() {
            let candidates = self.rank_candidates(store, normalized_query);
            if candidates.is_empty() {
                trace!(gram_size = store.gram_size(), "No candidates, falling back");
                continue;
            }

            let found = candidates.len();
            let results = self.apply_min_score(candidates);
            debug!(
                gram_size = store.gram_size(),
                candidates = found,
                kept = results.len(),
                "Fuzzy query resolved"
            );
            return results;
        }

        debug!("Fuzzy query found no overlapping grams");
        Vec::new()
    }

    /// Scored and sorted candidates for one gram size, before the score filter.
    fn rank_candidates(&self, store: &GramStore, normalized_query: &str) -> Vec<Match> {
        let mut candidates = cosine::cosine_candidates(store, normalized_query);
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.item.cmp(&b.item))
        });

        let matches: Vec<Match> = candidates
            .into_iter()
            .filter_map(|c| {
                store
                    .item(c.item)
                    .map(|item| Match::new(item.normalized_value.clone(), c.score))
            })
            .collect();

        if self.config.use_levenshtein {
            edit::rerank(matches, normalized_query)
        } else {
            matches
        }
    }

    fn apply_min_score(&self, matches: Vec<Match>) -> Vec<Match> {
        matches
            .into_iter()
            .filter(|m| m.score >= self.config.min_score)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stores_of(config: &IndexConfig, values: &[&str]) -> Vec<GramStore> {
        config
            .gram_sizes()
            .map(|gram_size| {
                let mut store = GramStore::new(gram_size);
                for value in values {
                    store.insert(value.to_lowercase(), value);
                }
                store
            })
            .collect()
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut matches = vec![
            Match::new("a", 0.5),
            Match::new("b", 0.9),
            Match::new("c", 0.5),
        ];
        sort_by_score(&mut matches);
        let words: Vec<&str> = matches.iter().map(|m| m.word.as_str()).collect();
        assert_eq!(words, vec!["b", "a", "c"]);
    }

    #[test]
    fn cosine_results_use_normalized_labels() {
        let config = IndexConfig::new(false, 3, 3, 0.0);
        let stores = stores_of(&config, &["Hello", "Hell"]);
        let results = SearchEngine::new(&stores, &config).search("helo");
        assert_eq!(results[0].word, "hello");
        assert_eq!(results[1].word, "hell");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn falls_back_to_smaller_grams() {
        let config = IndexConfig::new(false, 1, 3, 0.0);
        let stores = stores_of(&config, &["abc"]);
        // no shared trigram or bigram with "-ca-", but unigrams overlap
        let results = SearchEngine::new(&stores, &config).search("ca");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].word, "abc");
    }

    #[test]
    fn larger_grams_win_when_they_match() {
        let config = IndexConfig::new(false, 1, 3, 0.0);
        let stores = stores_of(&config, &["hello", "xyz"]);
        let results = SearchEngine::new(&stores, &config).search("help");
        // "xyz" shares the unigram "-" but no trigram, so it never appears
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].word, "hello");
    }

    #[test]
    fn filtered_out_candidates_do_not_trigger_fallback() {
        let config = IndexConfig::new(false, 2, 3, 0.99);
        let stores = stores_of(&config, &["hello"]);
        assert!(SearchEngine::new(&stores, &config).search("help").is_empty());
    }

    #[test]
    fn levenshtein_scores_replace_cosine() {
        let config = IndexConfig::new(true, 3, 3, 0.0);
        let stores = stores_of(&config, &["Hello", "Hell"]);
        let results = SearchEngine::new(&stores, &config).search("helo");
        assert_eq!(results[0].word, "hello");
        assert!((results[0].score - 0.8).abs() < 1e-12);
        assert_eq!(results[1], Match::new("hell", 0.75));
    }

    #[test]
    fn min_score_is_inclusive() {
        let config = IndexConfig::new(true, 3, 3, 0.75);
        let stores = stores_of(&config, &["Hello", "Hell"]);
        let results = SearchEngine::new(&stores, &config).search("helo");
        assert_eq!(results.len(), 2);

        let config = IndexConfig::new(true, 3, 3, 0.76);
        let results = SearchEngine::new(&stores, &config).search("helo");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn nothing_indexed_yields_empty() {
        let config = IndexConfig::default();
        let stores = stores_of(&config, &[]);
        assert!(SearchEngine::new(&stores, &config).search("anything").is_empty());
    }
}
