use crate::normalize::simplify;
use std::collections::HashMap;

const PAD: char = '-';

/// Gram string to number of occurrences within one value.
pub type GramCounts = HashMap<String, usize>;

/// All contiguous grams of `gram_size` chars over the dash-padded, simplified
/// form of `value`. Values shorter than the gram size are right-padded so that
/// exactly one gram comes back.
pub fn iterate_grams(value: &str, gram_size: usize) -> Vec<String> {
    debug_assert!(gram_size >= 1);

    let mut padded: Vec<char> = Vec::with_capacity(value.len() + 2);
    padded.push(PAD);
    padded.extend(simplify(value).chars());
    padded.push(PAD);

    if padded.len() < gram_size {
        padded.resize(gram_size, PAD);
    }

    padded
        .windows(gram_size)
        .map(|window| window.iter().collect())
        .collect()
}

pub fn gram_counts(value: &str, gram_size: usize) -> GramCounts {
    let mut counts = GramCounts::new();
    for gram in iterate_grams(value, gram_size) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// Euclidean norm of a gram-count vector.
pub fn vector_norm(counts: &GramCounts) -> f64 {
    counts
        .values()
        .map(|&count| (count * count) as f64)
        .sum::<f64>()
        .sqrt()
}
