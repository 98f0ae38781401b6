use super::{sort_by_score, Match};

/// Levenshtein distance counted in chars; insertions, deletions and
/// substitutions each cost one.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// `1 - distance / longer length`, in `[0, 1]`. Zero when either side is
/// empty, including when both are.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let distance = levenshtein(a, b);
    let longest = a.chars().count().max(b.chars().count());
    1.0 - distance as f64 / longest as f64
}

/// Replaces every score with its edit similarity to `normalized_query` and
/// re-sorts. The previous scores are discarded, not blended.
pub fn rerank(matches: Vec<Match>, normalized_query: &str) -> Vec<Match> {
    let mut reranked: Vec<Match> = matches
        .into_iter()
        .map(|m| Match {
            score: edit_similarity(&m.word, normalized_query),
            word: m.word,
        })
        .collect();
    sort_by_score(&mut reranked);
    reranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_distances() {
        assert_eq!(levenshtein("hello", "hello"), 0);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("sit", "sitting"), 4);
        assert_eq!(levenshtein("hello", "goodbye"), 7);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }

    #[test]
    fn triangle_inequality_holds() {
        let words = ["kitten", "sitting", "mitten", "flaw", "lawn", "", "a"];
        for a in words {
            for b in words {
                for c in words {
                    assert!(levenshtein(a, c) <= levenshtein(a, b) + levenshtein(b, c));
                }
            }
        }
    }

    #[test]
    fn similarity_of_identical_non_empty_is_one() {
        assert_eq!(edit_similarity("mississippi", "mississippi"), 1.0);
        assert_eq!(edit_similarity("é", "é"), 1.0);
    }

    #[test]
    fn similarity_with_empty_is_zero() {
        assert_eq!(edit_similarity("", "anything"), 0.0);
        assert_eq!(edit_similarity("anything", ""), 0.0);
        assert_eq!(edit_similarity("", ""), 0.0);
    }

    #[test]
    fn similarity_is_symmetric_and_bounded() {
        let pairs = [("kitten", "sitting"), ("hello", "goodbye"), ("flaw", "lawn"), ("a", "abc")];
        for (a, b) in pairs {
            let forward = edit_similarity(a, b);
            assert_eq!(forward, edit_similarity(b, a));
            assert!((0.0..=1.0).contains(&forward));
        }
        assert_eq!(edit_similarity("hello", "goodbye"), 0.0);
    }

    #[test]
    fn similarity_normalizes_by_longer_length() {
        assert!((edit_similarity("kitten", "sitting") - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
    }

    #[test]
    fn lengths_count_chars_not_bytes() {
        // one substitution over four chars, though "ü" is two bytes
        assert!((edit_similarity("über", "uber") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn rerank_replaces_scores_and_resorts() {
        let matches = vec![
            Match::new("hell", 0.9),
            Match::new("hello", 0.2),
        ];
        let reranked = rerank(matches, "helo");
        assert_eq!(reranked[0].word, "hello");
        assert!((reranked[0].score - 0.8).abs() < 1e-12);
        assert_eq!(reranked[1].word, "hell");
        assert!((reranked[1].score - 0.75).abs() < 1e-12);
    }
}
