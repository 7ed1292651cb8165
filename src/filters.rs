use log::debug;

use crate::error::{validate_threshold, Result};
use crate::par::map_records;
use crate::stats::{analyze, tokenize, FrequencyEntry};
use crate::stopwords::{identify_candidates, StopwordSet, DEFAULT_MIN_THRESHOLD};

pub const DEFAULT_PUNCTUATION: &[char] = &['!','(',')','-','[',']','{','}',';',':','\'','"','\\',',','<','>','.','/','?','@','#','$','%','^','&','*','_','~'];

// lowercase converts every record into its lowercase counterpart
pub fn lowercase(corpus: &[String]) -> Vec<String> {
    map_records(corpus, str::to_lowercase)
}

// strip_punctuation removes the given punctuation characters from every record
pub fn strip_punctuation(corpus: &[String], punctuation: &[char]) -> Vec<String> {
    if punctuation.is_empty() {
        return corpus.to_vec();
    }
    map_records(corpus, |record| record.replace(punctuation, ""))
}

// remove_record_stopwords drops stopword tokens from a single record
fn remove_record_stopwords(record: &str, stopwords: &StopwordSet) -> String {
    tokenize(record)
        .into_iter()
        .filter(|token| !stopwords.contains(token))
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Removes whole-token stopwords from every record.
///
/// Records keep their position. Surviving tokens are rejoined with a single
/// space and a record made only of stopwords becomes an empty string.
pub fn remove_stopwords(corpus: &[String], stopwords: &StopwordSet) -> Vec<String> {
    if stopwords.is_empty() {
        return corpus.to_vec();
    }
    map_records(corpus, |record| remove_record_stopwords(record, stopwords))
}

/// Result of [`remove_stopwords_automatically`].
#[derive(Debug, Clone)]
pub struct AutomaticRemoval {
    pub corpus: Vec<String>,
    pub stopwords: StopwordSet,
}

/// Removes the most prevalent tokens without supervision.
///
/// When `use_cache` is set and `cached` holds candidates, those are applied
/// and `min_threshold` plays no part in the selection. Otherwise the corpus
/// is analyzed afresh and every token with coverage of at least
/// `min_threshold` (default [`DEFAULT_MIN_THRESHOLD`]) is removed.
pub fn remove_stopwords_automatically(corpus: &[String], use_cache: bool, cached: Option<&[FrequencyEntry]>, min_threshold: Option<f64>) -> Result<AutomaticRemoval> {
    let min_threshold = validate_threshold(min_threshold.unwrap_or(DEFAULT_MIN_THRESHOLD))?;

    let candidates = match cached {
        Some(cached) if use_cache => {
            debug!("remove_stopwords_automatically: using {} cached candidates", cached.len());
            cached.to_vec()
        },
        _ => {
            debug!("remove_stopwords_automatically: analyzing {} records", corpus.len());
            identify_candidates(&analyze(corpus), min_threshold)?
        },
    };

    let stopwords = StopwordSet::from_candidates(&candidates);
    let corpus = remove_stopwords(corpus, &stopwords);

    Ok(AutomaticRemoval {
        corpus,
        stopwords,
    })
}
