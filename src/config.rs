use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

const DEFAULT_GRAM_SIZE_LOWER: usize = 2;
const DEFAULT_GRAM_SIZE_UPPER: usize = 3;
const DEFAULT_MIN_SCORE: f64 = 0.33;

/// Which form of an inserted value its gram vector is counted from.
///
/// Queries always count grams from the normalized query. Insertion has
/// historically counted from the value as given; `Normalized` makes both
/// paths use the same text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GramSource {
    #[default]
    Raw,
    Normalized,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndexConfig {
    pub gram_size_lower: usize,
    pub gram_size_upper: usize,
    pub use_levenshtein: bool,
    /// Results scoring strictly below this are dropped. When `use_levenshtein`
    /// is on it applies to the edit-distance score, otherwise to the cosine score.
    pub min_score: f64,
    pub gram_source: GramSource,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            gram_size_lower: DEFAULT_GRAM_SIZE_LOWER,
            gram_size_upper: DEFAULT_GRAM_SIZE_UPPER,
            use_levenshtein: true,
            min_score: DEFAULT_MIN_SCORE,
            gram_source: GramSource::Raw,
        }
    }
}

impl IndexConfig {
    pub fn new(
        use_levenshtein: bool,
        gram_size_lower: usize,
        gram_size_upper: usize,
        min_score: f64,
    ) -> Self {
        Self {
            gram_size_lower,
            gram_size_upper,
            use_levenshtein,
            min_score,
            gram_source: GramSource::Raw,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("Failed to parse index configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_gram_sizes(mut self, lower: usize, upper: usize) -> Self {
        self.gram_size_lower = lower;
        self.gram_size_upper = upper;
        self
    }

    pub fn with_levenshtein(mut self, enabled: bool) -> Self {
        self.use_levenshtein = enabled;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_gram_source(mut self, source: GramSource) -> Self {
        self.gram_source = source;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.gram_size_lower == 0 {
            bail!("gram_size_lower must be at least 1");
        }
        if self.gram_size_lower > self.gram_size_upper {
            bail!(
                "gram_size_lower ({}) exceeds gram_size_upper ({})",
                self.gram_size_lower,
                self.gram_size_upper
            );
        }
        validate_min_score(self.min_score)
    }

    pub fn gram_sizes(&self) -> RangeInclusive<usize> {
        self.gram_size_lower..=self.gram_size_upper
    }

    /// Number of gram resolutions this config indexes.
    pub fn resolution_count(&self) -> usize {
        self.gram_size_upper - self.gram_size_lower + 1
    }
}

pub(crate) fn validate_min_score(min_score: f64) -> Result<()> {
    if !min_score.is_finite() || !(0.0..=1.0).contains(&min_score) {
        bail!("min_score must be within [0, 1], got {min_score}");
    }
    Ok(())
}
