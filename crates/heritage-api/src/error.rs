//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("snapshot source error: {0}")]
  Source(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("export failed: {0}")]
  Export(#[from] heritage_analytics::Error),
}

impl From<heritage_core::Error> for ApiError {
  fn from(e: heritage_core::Error) -> Self {
    match e {
      heritage_core::Error::SiteNotFound(_)
      | heritage_core::Error::RouteNotFound(_) => {
        ApiError::NotFound(e.to_string())
      }
      other => ApiError::BadRequest(other.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Source(e) => {
        tracing::error!(error = %e, "snapshot source failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
      ApiError::Export(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
