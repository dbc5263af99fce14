//! Curated heritage routes and their waypoints.
//!
//! A waypoint owns the resolved [`Site`] it points at, so route analytics never
//! have to look sites up again.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  geometry::LineString,
  site::{Site, default_true},
};

/// Dwell time assumed for a waypoint that does not specify one.
pub const DEFAULT_VISIT_MINUTES: u32 = 60;

/// One stop on a route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteWaypoint {
  /// Position within the route; unique and contiguous per route.
  pub sequence_order:         u32,
  #[serde(default)]
  pub visit_duration_minutes: Option<u32>,
  pub site:                   Site,
}

impl RouteWaypoint {
  pub fn visit_minutes(&self) -> u32 {
    self.visit_duration_minutes.unwrap_or(DEFAULT_VISIT_MINUTES)
  }
}

/// A named tour through a sequence of sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
  pub id:        Uuid,
  pub name:      String,
  #[serde(default = "default_true")]
  pub is_active: bool,
  #[serde(default)]
  pub waypoints: Vec<RouteWaypoint>,
  /// Hand-drawn path, if an editor authored one. Preferred over the line
  /// inferred from waypoint order because it can follow real roads.
  #[serde(default)]
  pub path:      Option<LineString>,
}

impl Route {
  /// Waypoints sorted by ascending `sequence_order`.
  pub fn ordered_waypoints(&self) -> Vec<&RouteWaypoint> {
    let mut waypoints: Vec<&RouteWaypoint> = self.waypoints.iter().collect();
    waypoints.sort_by_key(|w| w.sequence_order);
    waypoints
  }

  /// Check that sequence indices are unique and contiguous from the lowest
  /// one present.
  pub fn validate_sequence(&self) -> Result<()> {
    let ordered = self.ordered_waypoints();
    for pair in ordered.windows(2) {
      let (prev, next) = (pair[0].sequence_order, pair[1].sequence_order);
      if prev == next {
        return Err(Error::DuplicateSequence {
          route_id: self.id,
          sequence: next,
        });
      }
      if next != prev + 1 {
        return Err(Error::SequenceGap {
          route_id: self.id,
          expected: prev + 1,
          found:    next,
        });
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  fn waypoint(sequence_order: u32) -> RouteWaypoint {
    RouteWaypoint {
      sequence_order,
      visit_duration_minutes: None,
      site: Site::new(Uuid::new_v4(), "stop", -8.6, 116.1, Utc::now()),
    }
  }

  fn route(orders: &[u32]) -> Route {
    Route {
      id:        Uuid::nil(),
      name:      "Sasak villages".into(),
      is_active: true,
      waypoints: orders.iter().copied().map(waypoint).collect(),
      path:      None,
    }
  }

  #[test]
  fn visit_minutes_defaults_to_an_hour() {
    assert_eq!(waypoint(1).visit_minutes(), DEFAULT_VISIT_MINUTES);
  }

  #[test]
  fn ordered_waypoints_ignore_insertion_order() {
    let r = route(&[3, 1, 2]);
    let orders: Vec<u32> =
      r.ordered_waypoints().iter().map(|w| w.sequence_order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert!(r.validate_sequence().is_ok());
  }

  #[test]
  fn duplicate_sequence_is_rejected() {
    assert!(matches!(
      route(&[1, 2, 2]).validate_sequence(),
      Err(Error::DuplicateSequence { sequence: 2, .. })
    ));
  }

  #[test]
  fn gap_in_sequence_is_rejected() {
    assert!(matches!(
      route(&[1, 3]).validate_sequence(),
      Err(Error::SequenceGap {
        expected: 2,
        found: 3,
        ..
      })
    ));
  }

  #[test]
  fn route_without_flags_deserialises_active() {
    let json = serde_json::json!({
      "id": Uuid::nil(),
      "name": "Sembalun loop",
    });
    let r: Route = serde_json::from_value(json).unwrap();
    assert!(r.is_active);
    assert!(r.waypoints.is_empty());
    assert!(r.path.is_none());
  }

  #[test]
  fn empty_route_is_valid() {
    assert!(route(&[]).validate_sequence().is_ok());
  }
}
