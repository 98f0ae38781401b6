use crate::grams::{gram_counts, vector_norm};
use std::collections::HashMap;

/// One indexed value at one gram resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub normalized_value: String,
    pub vector_norm: f64,
}

/// Entry in a gram's posting list. `item` is the position of the item in its
/// store and stays valid for the life of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub item: usize,
    pub count: usize,
}

/// Append-only item arena plus inverted index for a single gram size.
#[derive(Debug, Clone)]
pub struct GramStore {
    gram_size: usize,
    items: Vec<Item>,
    postings: HashMap<String, Vec<Posting>>,
}

impl GramStore {
    pub fn new(gram_size: usize) -> Self {
        Self {
            gram_size,
            items: Vec::new(),
            postings: HashMap::new(),
        }
    }

    pub fn gram_size(&self) -> usize {
        self.gram_size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn postings(&self, gram: &str) -> &[Posting] {
        self.postings.get(gram).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct grams seen at this resolution.
    pub fn gram_count(&self) -> usize {
        self.postings.len()
    }

    /// Appends a new item labelled `normalized_value` whose gram vector is
    /// counted from `counted_from`. Returns the item's position.
    pub fn insert(&mut self, normalized_value: String, counted_from: &str) -> usize {
        let index = self.items.len();
        let counts = gram_counts(counted_from, self.gram_size);
        let vector_norm = vector_norm(&counts);

        for (gram, count) in counts {
            self.postings
                .entry(gram)
                .or_default()
                .push(Posting { item: index, count });
        }

        self.items.push(Item {
            normalized_value,
            vector_norm,
        });
        index
    }
}
