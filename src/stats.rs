use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::par::map_records;

type Token = String;

/// A token and the share of records it appears in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub token: Token,
    /// Number of records containing the token at least once.
    pub records: usize,
    /// `records` divided by the corpus length, always within [0, 1].
    pub coverage: f64,
}

#[derive(Clone)]
struct TermStat {
    token: Token,
    document_count: usize,
}

impl TermStat {
    fn new(token: Token) -> TermStat {
        TermStat {
            token,
            document_count: 0,
        }
    }
}

// tokenize splits a record into its whitespace-separated tokens
pub fn tokenize(record: &str) -> Vec<&str> {
    record.split_whitespace().collect()
}

// distinct_tokens returns the tokens of a record once each, in first-seen order
fn distinct_tokens(record: &str) -> Vec<Token> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    for token in tokenize(record) {
        if seen.insert(token) {
            tokens.push(token.to_string());
        }
    }

    tokens
}

/// Computes the document frequency of every token in the corpus.
///
/// The table is ordered by descending coverage. Tokens with equal coverage
/// stay in the order they were first encountered while scanning the corpus
/// record by record.
pub fn analyze(corpus: &[String]) -> Vec<FrequencyEntry> {
    if corpus.is_empty() {
        return Vec::new();
    }

    let per_record = map_records(corpus, distinct_tokens);
    let mut term_stats: Vec<TermStat> = Vec::new();
    let mut positions: HashMap<Token, usize> = HashMap::new();

    for tokens in per_record {
        for token in tokens {
            let position = match positions.get(&token) {
                Some(position) => *position,
                None => {
                    positions.insert(token.clone(), term_stats.len());
                    term_stats.push(TermStat::new(token));
                    term_stats.len() - 1
                },
            };
            term_stats[position].document_count += 1;
        }
    }

    // sort_by is stable, so ties keep first-encountered order
    term_stats.sort_by(|a, b| b.document_count.cmp(&a.document_count));

    let total = corpus.len() as f64;
    term_stats
        .into_iter()
        .map(|stat| FrequencyEntry {
            coverage: stat.document_count as f64 / total,
            records: stat.document_count,
            token: stat.token,
        })
        .collect()
}
