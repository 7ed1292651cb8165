use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use log::info;
use serde_json::Value;

use crate::error::{Error, Result};

pub const DEFAULT_SEPARATOR: u8 = b',';

/// Where a column comes from. Exactly one of `data` or `path` must be set.
#[derive(Debug, Clone)]
pub struct ColumnSource {
    data: Option<Vec<Value>>,
    path: Option<PathBuf>,
    separator: u8,
}

impl Default for ColumnSource {
    fn default() -> Self {
        Self {
            data: None,
            path: None,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl ColumnSource {
    pub fn new() -> ColumnSource {
        ColumnSource::default()
    }

    pub fn data<I, V>(mut self, data: I) -> ColumnSource
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.data = Some(data.into_iter().map(Into::into).collect());
        self
    }

    pub fn path<P: AsRef<Path>>(mut self, path: P) -> ColumnSource {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    // separator only applies to files
    pub fn separator(mut self, separator: u8) -> ColumnSource {
        self.separator = separator;
        self
    }

    pub(crate) fn read(self) -> Result<Vec<String>> {
        match (self.data, self.path) {
            (Some(data), None) => coerce_values(data),
            (None, Some(path)) => read_first_column_from_path(&path, self.separator),
            (Some(_), Some(_)) => Err(Error::InvalidConfiguration("both data and path were supplied, expected exactly one".to_string())),
            (None, None) => Err(Error::InvalidConfiguration("neither data nor path was supplied".to_string())),
        }
    }
}

// coerce_value renders a scalar as a string; nested values are a shape error
fn coerce_value(index: usize, value: Value) -> Result<String> {
    match value {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        Value::Bool(value) => Ok(value.to_string()),
        Value::Null => Err(Error::TypeCoercionFailure {
            index,
            reason: "null has no string form".to_string(),
        }),
        Value::Array(_) | Value::Object(_) => Err(Error::InvalidShape(format!("element {} is not a scalar, input must be a single column", index))),
    }
}

pub(crate) fn coerce_values(values: Vec<Value>) -> Result<Vec<String>> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| coerce_value(i, value))
        .collect()
}

// coerce_json accepts a JSON array of scalars
pub(crate) fn coerce_json(value: Value) -> Result<Vec<String>> {
    match value {
        Value::Array(values) => coerce_values(values),
        _ => Err(Error::InvalidShape("expected an array of values".to_string())),
    }
}

fn read_first_column_from_path(path: &Path, separator: u8) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;
    let column = read_first_column(file, separator)?;
    info!("loaded {} records from {}", column.len(), path.display());
    Ok(column)
}

/// Reads the first column of delimited text with a header row.
pub fn read_first_column<T: Read>(r: T, separator: u8) -> Result<Vec<String>> {
    let mut csvr = ReaderBuilder::new()
        .delimiter(separator)
        .has_headers(true)
        .from_reader(r);
    let mut column = Vec::new();

    for result in csvr.records() {
        let record = result?;
        column.push(record.get(0).unwrap_or_default().to_string());
    }

    Ok(column)
}
