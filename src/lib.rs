use std::fmt;
use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde_json::Value;

mod error;
mod filters;
mod loader;
mod par;
mod stats;
mod stopwords;

pub use error::{Error, Result};
pub use filters::{lowercase, remove_stopwords, remove_stopwords_automatically, strip_punctuation, AutomaticRemoval, DEFAULT_PUNCTUATION};
pub use loader::{read_first_column, ColumnSource, DEFAULT_SEPARATOR};
pub use stats::{analyze, tokenize, FrequencyEntry};
pub use stopwords::{identify_candidates, StopwordSet, DEFAULT_MIN_THRESHOLD};

use error::validate_threshold;

/// A column of string data prepared for fuzzy matching.
///
/// The working copy is transformed in place by the cleaning methods while
/// the data the column was built from is kept untouched for reference.
pub struct StringColumn {
    data: Vec<String>,
    original_data: Vec<String>,
    potential_stopwords: Option<Vec<FrequencyEntry>>,
    applied_stopwords: Option<StopwordSet>,
}

#[derive(Debug, Clone)]
pub struct CleaningOptions<'a> {
    pub punctuation: &'a [char], // Characters stripped from every record
    pub min_threshold: f64,      // Minimum coverage of a potential stopword
}

pub const DEFAULT_CLEANING_OPTIONS: CleaningOptions<'static> = CleaningOptions {
    punctuation: DEFAULT_PUNCTUATION,
    min_threshold: DEFAULT_MIN_THRESHOLD,
};

impl Default for CleaningOptions<'static> {
    fn default() -> Self {
        DEFAULT_CLEANING_OPTIONS
    }
}

impl StringColumn {
    fn with_data(data: Vec<String>) -> StringColumn {
        StringColumn {
            original_data: data.clone(),
            data,
            potential_stopwords: None,
            applied_stopwords: None,
        }
    }

    /// Builds a column from exactly one of in-memory data or a file.
    pub fn load(source: ColumnSource) -> Result<StringColumn> {
        let column = StringColumn::with_data(source.read()?);
        info!("column ready with {} records", column.len());
        Ok(column)
    }

    pub fn from_strings<I, S>(data: I) -> StringColumn
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StringColumn::with_data(data.into_iter().map(Into::into).collect())
    }

    /// Builds a column from JSON scalars, rendering numbers and booleans as
    /// strings.
    pub fn from_values(values: Vec<Value>) -> Result<StringColumn> {
        Ok(StringColumn::with_data(loader::coerce_values(values)?))
    }

    /// Builds a column from a JSON array of scalars.
    pub fn from_json(value: Value) -> Result<StringColumn> {
        Ok(StringColumn::with_data(loader::coerce_json(value)?))
    }

    pub fn from_csv<P: AsRef<Path>>(path: P, separator: u8) -> Result<StringColumn> {
        StringColumn::load(ColumnSource::new().path(path).separator(separator))
    }

    pub fn from_reader<T: Read>(r: T, separator: u8) -> Result<StringColumn> {
        Ok(StringColumn::with_data(read_first_column(r, separator)?))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&str> {
        self.data
            .get(index)
            .map(String::as_str)
            .ok_or(Error::IndexOutOfRange { index, len: self.data.len() })
    }

    pub fn data(&self) -> &[String] {
        &self.data
    }

    pub fn original_data(&self) -> &[String] {
        &self.original_data
    }

    /// Candidates from the last identification, if the data has not changed
    /// since.
    pub fn potential_stopwords(&self) -> Option<&[FrequencyEntry]> {
        self.potential_stopwords.as_deref()
    }

    /// The stopwords most recently removed from the data.
    pub fn applied_stopwords(&self) -> Option<&StopwordSet> {
        self.applied_stopwords.as_ref()
    }

    fn replace_data(&mut self, data: Vec<String>) {
        debug_assert_eq!(data.len(), self.original_data.len());
        self.data = data;
        self.potential_stopwords = None;
    }

    pub fn lowercase(&mut self) {
        debug!("lowercase: {} records", self.len());
        let data = filters::lowercase(&self.data);
        self.replace_data(data);
    }

    /// Strips `punctuation`, or [`DEFAULT_PUNCTUATION`] when `None`.
    pub fn strip_punctuation(&mut self, punctuation: Option<&[char]>) {
        let punctuation = punctuation.unwrap_or(DEFAULT_PUNCTUATION);
        debug!("strip_punctuation: {} records, {} characters", self.len(), punctuation.len());
        let data = filters::strip_punctuation(&self.data, punctuation);
        self.replace_data(data);
    }

    /// Lowercases and strips punctuation.
    pub fn normalize(&mut self, opts: &CleaningOptions) {
        self.lowercase();
        self.strip_punctuation(Some(opts.punctuation));
    }

    /// Finds tokens present in at least `min_threshold` of the records and
    /// keeps them as the column's potential stopwords, most prevalent first.
    pub fn identify_potential_stopwords(&mut self, min_threshold: f64) -> Result<&[FrequencyEntry]> {
        let min_threshold = validate_threshold(min_threshold)?;
        let candidates = identify_candidates(&analyze(&self.data), min_threshold)?;
        info!("identified {} potential stopwords at threshold {}", candidates.len(), min_threshold);
        let candidates = self.potential_stopwords.insert(candidates);
        Ok(candidates.as_slice())
    }

    /// Normalizes the data and identifies potential stopwords in one go.
    pub fn prepare(&mut self, opts: &CleaningOptions) -> Result<&[FrequencyEntry]> {
        validate_threshold(opts.min_threshold)?;
        self.normalize(opts);
        self.identify_potential_stopwords(opts.min_threshold)
    }

    /// Removes the given stopwords, matched as whole tokens regardless of
    /// case.
    pub fn remove_stopwords<I, S>(&mut self, stopwords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = StopwordSet::from_user_list(stopwords);
        info!("removing {} user stopwords", stopwords.len());
        let data = filters::remove_stopwords(&self.data, &stopwords);
        self.replace_data(data);
        self.applied_stopwords = Some(stopwords);
    }

    /// Removes prevalent tokens without supervision.
    ///
    /// With `use_cache`, previously identified potential stopwords are
    /// applied as they are and `min_threshold` does not affect the selection.
    /// The cache is cleared afterwards since the statistics it describes no
    /// longer hold.
    pub fn remove_stopwords_automatically(&mut self, use_cache: bool, min_threshold: Option<f64>) -> Result<&StopwordSet> {
        let removal = filters::remove_stopwords_automatically(&self.data, use_cache, self.potential_stopwords.as_deref(), min_threshold)?;
        info!("removed {} stopwords automatically", removal.stopwords.len());
        self.replace_data(removal.corpus);
        let applied = self.applied_stopwords.insert(removal.stopwords);
        Ok(&*applied)
    }
}

impl fmt::Display for StringColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.data {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

impl fmt::Debug for StringColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringColumn")
            .field("len", &self.data.len())
            .field("potential_stopwords", &self.potential_stopwords.as_ref().map(Vec::len))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> StringColumn {
        StringColumn::from_strings(vec!["ACME Inc.", "Acme INC", "Beta Corp"])
    }

    #[test]
    fn normalizes_business_names() {
        let mut column = sample();
        column.lowercase();
        column.strip_punctuation(None);
        assert_eq!(column.data(), &["acme inc", "acme inc", "beta corp"]);
        assert_eq!(column.original_data(), &["ACME Inc.", "Acme INC", "Beta Corp"]);
    }

    #[test]
    fn identification_caches_candidates() {
        let mut column = sample();
        column.normalize(&DEFAULT_CLEANING_OPTIONS);
        let tokens: Vec<String> = column.identify_potential_stopwords(0.5).unwrap().iter().map(|e| e.token.clone()).collect();
        assert_eq!(tokens, vec!["acme", "inc"]);
        let cached = column.potential_stopwords().unwrap();
        assert!((cached[0].coverage - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn identification_replaces_stale_cache() {
        let mut column = sample();
        column.normalize(&DEFAULT_CLEANING_OPTIONS);
        column.identify_potential_stopwords(0.5).unwrap();
        assert_eq!(column.identify_potential_stopwords(0.0).unwrap().len(), 4);
        assert_eq!(column.potential_stopwords().unwrap().len(), 4);
    }

    #[test]
    fn every_mutation_clears_the_cache() {
        let mut column = sample();
        let mutations: Vec<Box<dyn Fn(&mut StringColumn)>> = vec![
            Box::new(|c: &mut StringColumn| c.lowercase()),
            Box::new(|c: &mut StringColumn| c.strip_punctuation(Some(&['.'][..]))),
            Box::new(|c: &mut StringColumn| c.remove_stopwords(vec!["corp"])),
            Box::new(|c: &mut StringColumn| {
                c.remove_stopwords_automatically(true, None).unwrap();
            }),
        ];

        for mutate in mutations {
            column.identify_potential_stopwords(0.1).unwrap();
            assert!(column.potential_stopwords().is_some());
            mutate(&mut column);
            assert!(column.potential_stopwords().is_none());
        }
    }

    #[test]
    fn automatic_removal_uses_cached_candidates() {
        let mut column = sample();
        column.normalize(&DEFAULT_CLEANING_OPTIONS);
        column.identify_potential_stopwords(0.5).unwrap();
        let applied = column.remove_stopwords_automatically(true, Some(0.0)).unwrap();
        assert_eq!(applied.len(), 2);
        assert_eq!(column.data(), &["", "", "beta corp"]);
    }

    #[test]
    fn user_stopwords_are_recorded() {
        let mut column = sample();
        column.normalize(&DEFAULT_CLEANING_OPTIONS);
        column.remove_stopwords(vec!["INC"]);
        assert_eq!(column.data(), &["acme", "acme", "beta corp"]);
        assert!(column.applied_stopwords().unwrap().contains("inc"));
    }

    #[test]
    fn failed_calls_leave_data_untouched() {
        let mut column = sample();
        column.identify_potential_stopwords(0.1).unwrap();
        assert!(column.identify_potential_stopwords(1.2).is_err());
        assert!(column.remove_stopwords_automatically(false, Some(-1.0)).is_err());
        assert!(matches!(column.remove_stopwords_automatically(true, Some(1.5)), Err(Error::InvalidParameter(_))));
        assert!(column.prepare(&CleaningOptions { punctuation: &[], min_threshold: 3.0 }).is_err());
        assert_eq!(column.data(), column.original_data());
        assert!(column.potential_stopwords().is_some());
    }

    #[test]
    fn get_checks_bounds() {
        let column = sample();
        assert_eq!(column.get(2).unwrap(), "Beta Corp");
        assert!(matches!(column.get(3), Err(Error::IndexOutOfRange { index: 3, len: 3 })));
    }

    #[test]
    fn empty_column_supports_every_operation() {
        let mut column = StringColumn::from_strings(Vec::<String>::new());
        assert_eq!(column.len(), 0);
        assert!(column.is_empty());
        column.normalize(&DEFAULT_CLEANING_OPTIONS);
        assert!(column.identify_potential_stopwords(0.1).unwrap().is_empty());
        column.remove_stopwords(vec!["a"]);
        assert!(column.remove_stopwords_automatically(false, None).unwrap().is_empty());
        assert!(matches!(column.get(0), Err(Error::IndexOutOfRange { .. })));
    }

    #[test]
    fn json_input_is_coerced() {
        let column = StringColumn::from_json(json!(["acme", 7, false])).unwrap();
        assert_eq!(column.data(), &["acme", "7", "false"]);
    }

    #[test]
    fn display_prints_one_record_per_line() {
        assert_eq!(sample().to_string(), "ACME Inc.\nAcme INC\nBeta Corp\n");
    }
}
