//! HTTP server wiring for the heritage analytics API.
//!
//! Nests [`heritage_api::api_router`] under `/api`, adds a health probe, and
//! traces every request.

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::get,
};
use heritage_api::{ApiDefaults, ApiState, api_router};
use heritage_core::store::SnapshotSource;
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `HERITAGE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                    String,
  #[serde(default = "default_port")]
  pub port:                    u16,
  /// JSON export of the data store, re-read on every request.
  pub snapshot_path:           PathBuf,
  #[serde(default = "default_buffer_radius_m")]
  pub default_buffer_radius_m: f64,
  #[serde(default = "default_growth_months")]
  pub default_growth_months:   u32,
  #[serde(default = "default_priority_limit")]
  pub default_priority_limit:  usize,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_buffer_radius_m() -> f64 { ApiDefaults::default().buffer_radius_m }
fn default_growth_months() -> u32 { ApiDefaults::default().growth_months }
fn default_priority_limit() -> usize { ApiDefaults::default().priority_limit }

impl ServerConfig {
  pub fn api_defaults(&self) -> ApiDefaults {
    ApiDefaults {
      buffer_radius_m: self.default_buffer_radius_m,
      growth_months:   self.default_growth_months,
      priority_limit:  self.default_priority_limit,
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the server's own handlers.
pub struct AppState<S> {
  pub source: Arc<S>,
  pub config: Arc<ServerConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      source: Arc::clone(&self.source),
      config: Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: SnapshotSource + 'static,
{
  let api = api_router(ApiState::new(
    Arc::clone(&state.source),
    state.config.api_defaults(),
  ));
  Router::new()
    .route("/health", get(health::<S>))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

/// `GET /health` — 200 when the snapshot loads, 503 otherwise.
async fn health<S>(State(state): State<AppState<S>>) -> Response
where
  S: SnapshotSource,
{
  match state.source.snapshot().await {
    Ok(snapshot) => Json(json!({
      "status": "ok",
      "sites": snapshot.sites.len(),
      "routes": snapshot.routes.len(),
    }))
    .into_response(),
    Err(e) => {
      tracing::warn!(error = %e, "health check failed to load snapshot");
      (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "status": "unavailable", "error": e.to_string() })),
      )
        .into_response()
    }
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
