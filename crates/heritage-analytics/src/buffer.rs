//! Fixed-radius proximity zones drawn around selected sites.
//!
//! A zone is a display circle, not a true spatial buffer: there is no polygon
//! clipping or union, and overlapping zones are drawn independently.

use heritage_core::{
  geometry::{Coordinate, Polygon},
  site::Site,
};
use serde::Serialize;
use uuid::Uuid;

use crate::geo::{destination, distance_between};

pub const MIN_BUFFER_RADIUS_M: f64 = 100.0;
pub const MAX_BUFFER_RADIUS_M: f64 = 2000.0;

/// Vertex bounds for [`BufferZone::ring`].
pub const MIN_RING_SEGMENTS: usize = 3;
pub const MAX_RING_SEGMENTS: usize = 360;

/// Colours assigned to zones in selection order, wrapping around.
pub const ZONE_PALETTE: [&str; 6] =
  ["#ef4444", "#3b82f6", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BufferZone {
  pub site_id:   Uuid,
  pub site_name: String,
  pub center:    Coordinate,
  pub radius_m:  f64,
  pub color:     &'static str,
}

impl BufferZone {
  /// Approximate the circle with a closed ring of `segments` vertices,
  /// clamped to [`MIN_RING_SEGMENTS`, `MAX_RING_SEGMENTS`], for renderers
  /// that cannot draw native circles.
  pub fn ring(&self, segments: usize) -> Polygon {
    let segments = segments.clamp(MIN_RING_SEGMENTS, MAX_RING_SEGMENTS);
    let step = 360.0 / segments as f64;
    let ring = (0..segments)
      .map(|i| {
        destination(self.center, i as f64 * step, self.radius_m).to_position()
      })
      .collect();
    Polygon::from_exterior(ring)
  }

  pub fn contains(&self, point: Coordinate) -> bool {
    distance_between(self.center, point) * 1000.0 <= self.radius_m
  }
}

pub fn radius_in_bounds(radius_m: f64) -> bool {
  (MIN_BUFFER_RADIUS_M..=MAX_BUFFER_RADIUS_M).contains(&radius_m)
}

pub fn ring_segments_in_bounds(segments: usize) -> bool {
  (MIN_RING_SEGMENTS..=MAX_RING_SEGMENTS).contains(&segments)
}

/// One zone per selected site, in selection order. Duplicated selections
/// produce duplicated zones.
pub fn buffer_zones(selected: &[Site], radius_m: f64) -> Vec<BufferZone> {
  selected
    .iter()
    .enumerate()
    .map(|(i, site)| BufferZone {
      site_id:   site.id,
      site_name: site.name.clone(),
      center:    site.coordinate(),
      radius_m,
      color:     ZONE_PALETTE[i % ZONE_PALETTE.len()],
    })
    .collect()
}

/// Sites whose location falls inside `zone`, excluding the zone's own site,
/// nearest first.
pub fn sites_within<'a>(zone: &BufferZone, sites: &'a [Site]) -> Vec<&'a Site> {
  let mut inside: Vec<(f64, &Site)> = sites
    .iter()
    .filter(|s| s.id != zone.site_id)
    .map(|s| (distance_between(zone.center, s.coordinate()), s))
    .filter(|(d, _)| d * 1000.0 <= zone.radius_m)
    .collect();
  inside.sort_by(|a, b| a.0.total_cmp(&b.0));
  inside.into_iter().map(|(_, s)| s).collect()
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::geo::distance_km;

  fn site(name: &str, lat: f64, lng: f64) -> Site {
    Site::new(Uuid::new_v4(), name, lat, lng, Utc::now())
  }

  #[test]
  fn one_zone_per_selection_with_rotating_colours() {
    let sites: Vec<Site> = (0..8)
      .map(|i| site(&format!("s{i}"), -8.6, 116.0 + i as f64 * 0.01))
      .collect();
    let zones = buffer_zones(&sites, 500.0);
    assert_eq!(zones.len(), sites.len());
    assert!(zones.iter().all(|z| z.radius_m == 500.0));
    assert_eq!(zones[0].color, ZONE_PALETTE[0]);
    assert_eq!(zones[6].color, ZONE_PALETTE[0]);
    assert_eq!(zones[7].color, ZONE_PALETTE[1]);
  }

  #[test]
  fn duplicate_selection_is_not_deduplicated() {
    let s = site("Pura Meru", -8.5868, 116.1296);
    let zones = buffer_zones(&[s.clone(), s], 250.0);
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].site_id, zones[1].site_id);
  }

  #[test]
  fn empty_selection_gives_no_zones() {
    assert!(buffer_zones(&[], 500.0).is_empty());
  }

  #[test]
  fn radius_bounds_are_inclusive() {
    assert!(radius_in_bounds(100.0));
    assert!(radius_in_bounds(2000.0));
    assert!(!radius_in_bounds(99.9));
    assert!(!radius_in_bounds(2000.1));
  }

  #[test]
  fn ring_vertices_sit_on_the_circle() {
    let s = site("Taman Narmada", -8.5944, 116.2069);
    let zone = &buffer_zones(std::slice::from_ref(&s), 800.0)[0];
    let ring = zone.ring(24);
    assert_eq!(ring.exterior().len(), 25);
    for p in ring.exterior() {
      let d = distance_km(s.latitude, s.longitude, p[1], p[0]);
      assert!((d - 0.8).abs() < 1e-6);
    }
  }

  #[test]
  fn ring_vertex_count_is_clamped() {
    let s = site("Gunung Pengsong", -8.6378, 116.0892);
    let zone = &buffer_zones(std::slice::from_ref(&s), 500.0)[0];
    assert_eq!(zone.ring(usize::MAX).exterior().len(), MAX_RING_SEGMENTS + 1);
    assert_eq!(zone.ring(0).exterior().len(), MIN_RING_SEGMENTS + 1);
    assert!(ring_segments_in_bounds(MAX_RING_SEGMENTS));
    assert!(!ring_segments_in_bounds(MAX_RING_SEGMENTS + 1));
    assert!(!ring_segments_in_bounds(2));
  }

  #[test]
  fn sites_within_excludes_self_and_far_sites() {
    let center = site("center", -8.6, 116.1);
    let near = site("near", -8.6, 116.103);
    let nearer = site("nearer", -8.6, 116.101);
    let far = site("far", -8.7, 116.3);
    let all = vec![center.clone(), near, far, nearer];
    let zone = &buffer_zones(std::slice::from_ref(&center), 500.0)[0];

    let names: Vec<&str> =
      sites_within(zone, &all).iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["nearer", "near"]);
    assert!(zone.contains(center.coordinate()));
  }
}
