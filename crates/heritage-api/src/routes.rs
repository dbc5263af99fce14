//! Handlers for `/routes` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/routes` | Every route with its statistics |
//! | `POST` | `/routes/generate` | Body: `{"points":[{"lat":..,"lng":..}]}` |
//! | `GET`  | `/routes/:id/stats` | 404 if not found |
//! | `GET`  | `/routes/:id/line` | GeoJSON `LineString`, or `null` for an empty route |

use axum::{
  Json,
  extract::{Path, State},
};
use heritage_analytics::route::{
  RouteStats, generate_route, render_line, route_stats,
};
use heritage_core::{
  geometry::{Coordinate, LineString, Position},
  store::SnapshotSource,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiError, ApiState};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RouteSummary {
  pub id:        Uuid,
  pub name:      String,
  pub is_active: bool,
  pub stats:     RouteStats,
}

/// `GET /routes`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<RouteSummary>>, ApiError>
where
  S: SnapshotSource,
{
  let snapshot = state.snapshot().await?;
  let summaries = snapshot
    .routes
    .iter()
    .map(|r| RouteSummary {
      id:        r.id,
      name:      r.name.clone(),
      is_active: r.is_active,
      stats:     route_stats(r),
    })
    .collect();
  Ok(Json(summaries))
}

// ─── One route ────────────────────────────────────────────────────────────────

/// `GET /routes/:id/stats`
pub async fn stats<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<RouteStats>, ApiError>
where
  S: SnapshotSource,
{
  let snapshot = state.snapshot().await?;
  Ok(Json(route_stats(snapshot.route(id)?)))
}

/// `GET /routes/:id/line` — the authored path if the route has one, otherwise
/// the line through its waypoints in sequence order.
pub async fn line<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Option<LineString>>, ApiError>
where
  S: SnapshotSource,
{
  let snapshot = state.snapshot().await?;
  Ok(Json(render_line(snapshot.route(id)?)))
}

// ─── Generate ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
  pub points: Vec<Coordinate>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedRoute {
  pub coordinates: Vec<Position>,
}

/// `POST /routes/generate` — positions in the order the points were added.
pub async fn generate(
  Json(body): Json<GenerateBody>,
) -> Result<Json<GeneratedRoute>, ApiError> {
  for p in &body.points {
    Coordinate::new(p.lat, p.lng)?;
  }
  Ok(Json(GeneratedRoute {
    coordinates: generate_route(&body.points),
  }))
}
