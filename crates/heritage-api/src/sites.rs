//! Handlers for the map screen.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/sites` | Every site in the snapshot |
//! | `GET`  | `/zones` | `?site_ids=a,b[&radius_m=][&ring_segments=]` |
//! | `GET`  | `/zones/:site_id/nearby` | Sites inside the zone; optional `radius_m` |
//! | `GET`  | `/overlays` | Default context layers |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use heritage_analytics::{
  buffer::{
    self, BufferZone, MAX_BUFFER_RADIUS_M, MAX_RING_SEGMENTS,
    MIN_BUFFER_RADIUS_M, MIN_RING_SEGMENTS, radius_in_bounds,
    ring_segments_in_bounds,
  },
  overlay::{SpatialOverlay, default_overlays},
};
use heritage_core::{geometry::Polygon, site::Site, store::SnapshotSource};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiError, ApiState, split_list};

fn checked_radius(radius_m: Option<f64>, default: f64) -> Result<f64, ApiError> {
  let radius = radius_m.unwrap_or(default);
  if radius_in_bounds(radius) {
    Ok(radius)
  } else {
    Err(ApiError::BadRequest(format!(
      "radius_m must be within [{MIN_BUFFER_RADIUS_M}, {MAX_BUFFER_RADIUS_M}], \
       got {radius}"
    )))
  }
}

fn checked_segments(segments: Option<usize>) -> Result<Option<usize>, ApiError> {
  match segments {
    Some(n) if !ring_segments_in_bounds(n) => Err(ApiError::BadRequest(format!(
      "ring_segments must be within [{MIN_RING_SEGMENTS}, {MAX_RING_SEGMENTS}], \
       got {n}"
    ))),
    other => Ok(other),
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /sites`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Site>>, ApiError>
where
  S: SnapshotSource,
{
  Ok(Json(state.snapshot().await?.sites))
}

// ─── Buffer zones ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ZoneParams {
  /// Comma-separated site ids, in selection order.
  pub site_ids:      String,
  pub radius_m:      Option<f64>,
  /// If set, also return a polygon approximation with this many vertices.
  pub ring_segments: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ZoneView {
  #[serde(flatten)]
  pub zone: BufferZone,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ring: Option<Polygon>,
}

/// `GET /zones?site_ids=<id>,<id>[&radius_m=500][&ring_segments=32]`
pub async fn zones<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ZoneParams>,
) -> Result<Json<Vec<ZoneView>>, ApiError>
where
  S: SnapshotSource,
{
  let radius = checked_radius(params.radius_m, state.defaults.buffer_radius_m)?;
  let segments = checked_segments(params.ring_segments)?;
  let ids = split_list(&params.site_ids)
    .map(|raw| {
      Uuid::parse_str(raw)
        .map_err(|e| ApiError::BadRequest(format!("site id {raw:?}: {e}")))
    })
    .collect::<Result<Vec<_>, _>>()?;

  let snapshot = state.snapshot().await?;
  let selected = snapshot.select_sites(&ids)?;
  tracing::debug!(sites = selected.len(), radius, "building buffer zones");

  let views = buffer::buffer_zones(&selected, radius)
    .into_iter()
    .map(|zone| ZoneView {
      ring: segments.map(|n| zone.ring(n)),
      zone,
    })
    .collect();
  Ok(Json(views))
}

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
  pub radius_m: Option<f64>,
}

/// `GET /zones/:site_id/nearby[?radius_m=500]`
pub async fn nearby<S>(
  State(state): State<ApiState<S>>,
  Path(site_id): Path<Uuid>,
  Query(params): Query<NearbyParams>,
) -> Result<Json<Vec<Site>>, ApiError>
where
  S: SnapshotSource,
{
  let radius = checked_radius(params.radius_m, state.defaults.buffer_radius_m)?;
  let snapshot = state.snapshot().await?;
  let center = snapshot.site(site_id)?.clone();

  let zones = buffer::buffer_zones(std::slice::from_ref(&center), radius);
  let inside = zones
    .first()
    .map(|zone| buffer::sites_within(zone, &snapshot.sites))
    .unwrap_or_default();
  Ok(Json(inside.into_iter().cloned().collect()))
}

// ─── Overlays ─────────────────────────────────────────────────────────────────

/// `GET /overlays`
pub async fn overlays() -> Json<Vec<SpatialOverlay>> { Json(default_overlays()) }
