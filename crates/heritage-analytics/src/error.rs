//! Error type for `heritage-analytics`.
//!
//! Scoring and aggregation are total functions; only the CSV writer can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("csv buffer could not be flushed: {0}")]
  Flush(String),

  #[error("csv output is not valid UTF-8: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
