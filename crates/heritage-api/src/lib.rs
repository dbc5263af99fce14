//! JSON REST API for the heritage analytics core.
//!
//! Exposes an axum [`Router`] backed by any
//! [`heritage_core::store::SnapshotSource`]. Every request takes a fresh
//! snapshot and derives its response from it; nothing is cached between
//! requests. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", heritage_api::api_router(state))
//! ```

pub mod error;
pub mod priorities;
pub mod reports;
pub mod routes;
pub mod sites;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use heritage_core::{snapshot::Snapshot, store::SnapshotSource};

pub use error::ApiError;

// ─── State ────────────────────────────────────────────────────────────────────

/// Fallbacks for query parameters the caller leaves out.
#[derive(Debug, Clone, Copy)]
pub struct ApiDefaults {
  pub buffer_radius_m: f64,
  pub growth_months:   u32,
  pub priority_limit:  usize,
}

impl Default for ApiDefaults {
  fn default() -> Self {
    Self {
      buffer_radius_m: 500.0,
      growth_months:   6,
      priority_limit:  10,
    }
  }
}

/// Shared state threaded through all API handlers.
pub struct ApiState<S> {
  pub source:   Arc<S>,
  pub defaults: ApiDefaults,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      source:   Arc::clone(&self.source),
      defaults: self.defaults,
    }
  }
}

impl<S> ApiState<S>
where
  S: SnapshotSource,
{
  pub fn new(source: Arc<S>, defaults: ApiDefaults) -> Self {
    Self { source, defaults }
  }

  /// Fetch the snapshot for one request.
  pub(crate) async fn snapshot(&self) -> Result<Snapshot, ApiError> {
    self
      .source
      .snapshot()
      .await
      .map_err(|e| ApiError::Source(Box::new(e)))
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: SnapshotSource + 'static,
{
  Router::new()
    // Map
    .route("/sites", get(sites::list::<S>))
    .route("/zones", get(sites::zones::<S>))
    .route("/zones/{site_id}/nearby", get(sites::nearby::<S>))
    .route("/overlays", get(sites::overlays))
    // Routes
    .route("/routes", get(routes::list::<S>))
    .route("/routes/generate", post(routes::generate))
    .route("/routes/{id}/stats", get(routes::stats::<S>))
    .route("/routes/{id}/line", get(routes::line::<S>))
    // Priorities
    .route("/priorities", get(priorities::list::<S>))
    .route("/priorities/top", get(priorities::top::<S>))
    .route("/priorities/stats", get(priorities::stats::<S>))
    .route("/priorities/export", get(priorities::export::<S>))
    // Dashboard
    .route("/reports/categories", get(reports::categories::<S>))
    .route("/reports/growth", get(reports::growth::<S>))
    .route("/reports/heatmap", get(reports::heatmap::<S>))
    .route("/reports/summary", get(reports::summary::<S>))
    .route("/reports/preservation", get(reports::preservation::<S>))
    .with_state(state)
}

/// Split a comma-separated query value, dropping blanks.
pub(crate) fn split_list(raw: &str) -> impl Iterator<Item = &str> {
  raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}
