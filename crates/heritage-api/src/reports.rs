//! Handlers for the dashboard charts under `/reports`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/reports/categories` | Active sites per category |
//! | `GET`  | `/reports/growth` | `?months=6\|12[&as_of=<rfc3339>]` |
//! | `GET`  | `/reports/heatmap` | Active sites only |
//! | `GET`  | `/reports/summary` | Dashboard counters |
//! | `GET`  | `/reports/preservation` | Sites per preservation status |

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, Utc};
use heritage_analytics::report::{
  self, CategoryData, DashboardSummary, HeatmapPoint, StatusCount,
  TimeSeriesPoint,
};
use heritage_core::{site::Site, store::SnapshotSource};
use serde::Deserialize;

use crate::{ApiError, ApiState};

/// Series lengths the growth chart offers.
pub const GROWTH_WINDOWS: [u32; 2] = [6, 12];

/// `GET /reports/categories`
pub async fn categories<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<CategoryData>>, ApiError>
where
  S: SnapshotSource,
{
  let snapshot = state.snapshot().await?;
  Ok(Json(report::category_distribution(
    &snapshot.sites,
    &snapshot.categories,
  )))
}

#[derive(Debug, Deserialize)]
pub struct GrowthParams {
  pub months: Option<u32>,
  /// End of the series; defaults to now.
  pub as_of:  Option<DateTime<Utc>>,
}

/// `GET /reports/growth[?months=12][&as_of=2025-06-30T00:00:00Z]`
pub async fn growth<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<GrowthParams>,
) -> Result<Json<Vec<TimeSeriesPoint>>, ApiError>
where
  S: SnapshotSource,
{
  let months = params.months.unwrap_or(state.defaults.growth_months);
  if !GROWTH_WINDOWS.contains(&months) {
    return Err(ApiError::BadRequest(format!(
      "months must be one of {GROWTH_WINDOWS:?}, got {months}"
    )));
  }
  let snapshot = state.snapshot().await?;
  let as_of = params.as_of.unwrap_or_else(Utc::now);
  Ok(Json(report::monthly_growth(&snapshot.sites, months, as_of)))
}

/// `GET /reports/heatmap`
pub async fn heatmap<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<HeatmapPoint>>, ApiError>
where
  S: SnapshotSource,
{
  let snapshot = state.snapshot().await?;
  let active: Vec<Site> =
    snapshot.sites.into_iter().filter(|s| s.is_active).collect();
  Ok(Json(report::heatmap_points(&active)))
}

/// `GET /reports/summary`
pub async fn summary<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<DashboardSummary>, ApiError>
where
  S: SnapshotSource,
{
  let snapshot = state.snapshot().await?;
  Ok(Json(report::dashboard_summary(&snapshot)))
}

/// `GET /reports/preservation`
pub async fn preservation<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<StatusCount>>, ApiError>
where
  S: SnapshotSource,
{
  let snapshot = state.snapshot().await?;
  Ok(Json(report::preservation_breakdown(&snapshot.sites)))
}
