//! Handlers for `/priorities` endpoints.
//!
//! Priorities are rescored from the snapshot on every request. `year`
//! overrides the reference year used for site age; it defaults to the
//! current UTC year.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/priorities` | Optional `tier`, `limit`, `year` |
//! | `GET`  | `/priorities/top` | Optional `limit`, `year` |
//! | `GET`  | `/priorities/stats` | Tier counts and mean score |
//! | `GET`  | `/priorities/export` | `text/csv` attachment |

use axum::{
  Json,
  extract::{Query, State},
  http::header,
  response::IntoResponse,
};
use chrono::{Datelike, Utc};
use heritage_analytics::{
  export::{export_file_name, priorities_csv},
  priority::{
    PreservationPriority, PriorityScorer, PriorityTier, RecommendationStats,
    recommendation_stats, sites_by_priority, top_priority_sites,
  },
};
use heritage_core::store::SnapshotSource;
use serde::Deserialize;

use crate::{ApiError, ApiState};

/// Accepted range for the `year` override.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

#[derive(Debug, Deserialize, Default)]
pub struct PriorityParams {
  pub tier:  Option<PriorityTier>,
  pub limit: Option<usize>,
  pub year:  Option<i32>,
}

async fn score<S>(
  state: &ApiState<S>,
  year: Option<i32>,
) -> Result<Vec<PreservationPriority>, ApiError>
where
  S: SnapshotSource,
{
  let year = match year {
    Some(y) if !YEAR_RANGE.contains(&y) => {
      return Err(ApiError::BadRequest(format!(
        "year must be within [{}, {}], got {y}",
        YEAR_RANGE.start(),
        YEAR_RANGE.end()
      )));
    }
    Some(y) => y,
    None => Utc::now().year(),
  };
  let snapshot = state.snapshot().await?;
  let scorer = PriorityScorer::new(year);
  Ok(scorer.score_all(&snapshot.sites))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /priorities[?tier=critical][&limit=10][&year=2025]`
///
/// With `tier`, returns that tier's sites by descending score (limit defaults
/// to the configured value). Without it, every site in snapshot order,
/// truncated only if `limit` is given.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<PriorityParams>,
) -> Result<Json<Vec<PreservationPriority>>, ApiError>
where
  S: SnapshotSource,
{
  let mut priorities = score(&state, params.year).await?;
  if let Some(tier) = params.tier {
    let limit = params.limit.unwrap_or(state.defaults.priority_limit);
    let picked = sites_by_priority(&priorities, tier, limit)
      .into_iter()
      .cloned()
      .collect();
    return Ok(Json(picked));
  }
  if let Some(limit) = params.limit {
    priorities.truncate(limit);
  }
  Ok(Json(priorities))
}

/// `GET /priorities/top[?limit=10][&year=2025]`
pub async fn top<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<PriorityParams>,
) -> Result<Json<Vec<PreservationPriority>>, ApiError>
where
  S: SnapshotSource,
{
  let priorities = score(&state, params.year).await?;
  let limit = params.limit.unwrap_or(state.defaults.priority_limit);
  Ok(Json(
    top_priority_sites(&priorities, limit)
      .into_iter()
      .cloned()
      .collect(),
  ))
}

// ─── Stats ────────────────────────────────────────────────────────────────────

/// `GET /priorities/stats[?year=2025]`
pub async fn stats<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<PriorityParams>,
) -> Result<Json<RecommendationStats>, ApiError>
where
  S: SnapshotSource,
{
  let priorities = score(&state, params.year).await?;
  Ok(Json(recommendation_stats(&priorities)))
}

// ─── Export ───────────────────────────────────────────────────────────────────

/// `GET /priorities/export[?year=2025]` — every site, in snapshot order.
pub async fn export<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<PriorityParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SnapshotSource,
{
  let priorities = score(&state, params.year).await?;
  let body = priorities_csv(&priorities)?;
  let disposition = format!(
    "attachment; filename=\"{}\"",
    export_file_name(Utc::now().date_naive())
  );
  tracing::debug!(rows = priorities.len(), "exported priorities");
  Ok((
    [
      (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    body,
  ))
}
