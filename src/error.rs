use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("index {index} out of range for column of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot coerce element {index} to a string: {reason}")]
    TypeCoercionFailure { index: usize, reason: String },
}

// validate_threshold rejects thresholds outside [0, 1], NaN included
pub(crate) fn validate_threshold(threshold: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(Error::InvalidParameter(format!("threshold {} is not within [0, 1]", threshold)))
    }
}
