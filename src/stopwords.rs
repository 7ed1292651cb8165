//! Stopword selection.
//!
//! Candidates come from a frequency table filtered by a coverage threshold;
//! a [`StopwordSet`] is built either from those candidates or from a list the
//! caller supplies. Nothing here touches a corpus.

use std::collections::HashSet;

use crate::error::{validate_threshold, Result};
use crate::stats::FrequencyEntry;

pub const DEFAULT_MIN_THRESHOLD: f64 = 0.1;

/// Returns the entries whose coverage is at least `min_threshold`, keeping
/// the order of `table`.
pub fn identify_candidates(table: &[FrequencyEntry], min_threshold: f64) -> Result<Vec<FrequencyEntry>> {
    let min_threshold = validate_threshold(min_threshold)?;

    Ok(table
        .iter()
        .filter(|entry| entry.coverage >= min_threshold)
        .cloned()
        .collect())
}

/// A set of lowercase tokens to drop from records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopwordSet {
    stopwords: HashSet<String>,
}

impl StopwordSet {
    pub fn new() -> StopwordSet {
        StopwordSet::default()
    }

    /// Builds a set from user-supplied tokens. Each token is trimmed and
    /// lowercased; duplicates collapse and blank tokens are ignored.
    pub fn from_user_list<I, S>(tokens: I) -> StopwordSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = tokens
            .into_iter()
            .map(|token| token.as_ref().trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect();
        StopwordSet { stopwords }
    }

    pub fn from_candidates(candidates: &[FrequencyEntry]) -> StopwordSet {
        StopwordSet::from_user_list(candidates.iter().map(|entry| entry.token.as_str()))
    }

    // contains matches case-insensitively
    pub fn contains(&self, token: &str) -> bool {
        self.stopwords.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stopwords.iter().map(String::as_str)
    }
}
