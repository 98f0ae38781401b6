use crate::grams::{gram_counts, vector_norm};
use crate::store::GramStore;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub item: usize,
    pub score: f64,
}

/// Cosine similarity between `normalized_query` and every item in `store` that
/// shares at least one gram with it. Unsorted; empty when nothing overlaps.
pub fn cosine_candidates(store: &GramStore, normalized_query: &str) -> Vec<Candidate> {
    let query_counts = gram_counts(normalized_query, store.gram_size());
    let mut dot_products: HashMap<usize, usize> = HashMap::new();

    for (gram, &query_count) in &query_counts {
        for posting in store.postings(gram) {
            *dot_products.entry(posting.item).or_insert(0) += query_count * posting.count;
        }
    }

    if dot_products.is_empty() {
        return Vec::new();
    }

    let query_norm = vector_norm(&query_counts);

    dot_products
        .into_iter()
        .filter(|&(_, dot)| dot > 0)
        .filter_map(|(item, dot)| {
            let item_norm = store.item(item)?.vector_norm;
            let denominator = query_norm * item_norm;
            if denominator <= 0.0 {
                return None;
            }
            Some(Candidate {
                item,
                score: (dot as f64 / denominator).min(1.0),
            })
        })
        .collect()
}
