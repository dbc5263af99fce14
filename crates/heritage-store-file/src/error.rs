//! Error type for `heritage-store-file`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid snapshot: {0}")]
  Invalid(#[from] heritage_core::Error),

  #[error("failed to read snapshot {path:?}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("snapshot {path:?} is not valid JSON: {source}")]
  Json {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
