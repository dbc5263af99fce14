//! Route statistics and polylines.
//!
//! Waypoint order is always the curator's: nothing here reorders stops to
//! shorten a route.

use heritage_core::{
  geometry::{Coordinate, LineString, Position},
  route::Route,
};
use serde::Serialize;

use crate::{geo::distance_between, round_to};

/// Aggregate figures shown on a route card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteStats {
  pub total_sites:    usize,
  /// Minutes.
  pub total_duration: u32,
  /// Kilometres along the straight legs, rounded to 2 dp.
  pub total_distance: f64,
  /// Mean cultural significance of the scored stops, rounded to 1 dp.
  pub average_rating: f64,
}

pub fn route_stats(route: &Route) -> RouteStats {
  let waypoints = route.ordered_waypoints();

  let total_duration = waypoints.iter().map(|w| w.visit_minutes()).sum();

  let total_distance: f64 = waypoints
    .windows(2)
    .map(|leg| {
      distance_between(leg[0].site.coordinate(), leg[1].site.coordinate())
    })
    .sum();

  let ratings: Vec<f64> = waypoints
    .iter()
    .filter_map(|w| w.site.cultural_significance_score)
    .collect();
  let average_rating = if ratings.is_empty() {
    0.0
  } else {
    ratings.iter().sum::<f64>() / ratings.len() as f64
  };

  RouteStats {
    total_sites: waypoints.len(),
    total_duration,
    total_distance: round_to(total_distance, 2),
    average_rating: round_to(average_rating, 1),
  }
}

/// The line through the waypoints in ascending `sequence_order`, or `None`
/// for a route without waypoints.
pub fn waypoint_line(route: &Route) -> Option<LineString> {
  let waypoints = route.ordered_waypoints();
  if waypoints.is_empty() {
    return None;
  }
  Some(LineString::new(
    waypoints
      .iter()
      .map(|w| w.site.coordinate().to_position())
      .collect(),
  ))
}

/// The line to draw for `route`: its authored path when one exists,
/// otherwise the line inferred from waypoint order.
pub fn render_line(route: &Route) -> Option<LineString> {
  match &route.path {
    Some(path) if !path.is_empty() => Some(path.clone()),
    _ => waypoint_line(route),
  }
}

/// Positions for points the user added to a route, in the order they were
/// added.
pub fn generate_route(points: &[Coordinate]) -> Vec<Position> {
  points.iter().map(|p| p.to_position()).collect()
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use heritage_core::{route::RouteWaypoint, site::Site};
  use uuid::Uuid;

  use super::*;
  use crate::geo::distance_km;

  fn waypoint(
    sequence_order: u32,
    lat: f64,
    lng: f64,
    significance: Option<f64>,
    minutes: Option<u32>,
  ) -> RouteWaypoint {
    let mut site = Site::new(Uuid::new_v4(), "stop", lat, lng, Utc::now());
    site.cultural_significance_score = significance;
    RouteWaypoint {
      sequence_order,
      visit_duration_minutes: minutes,
      site,
    }
  }

  fn route(waypoints: Vec<RouteWaypoint>) -> Route {
    Route {
      id: Uuid::nil(),
      name: "Mataram heritage walk".into(),
      is_active: true,
      waypoints,
      path: None,
    }
  }

  #[test]
  fn empty_route_has_zero_stats() {
    let stats = route_stats(&route(vec![]));
    assert_eq!(stats, RouteStats {
      total_sites:    0,
      total_duration: 0,
      total_distance: 0.0,
      average_rating: 0.0,
    });
    assert!(waypoint_line(&route(vec![])).is_none());
  }

  #[test]
  fn stats_follow_sequence_order() {
    let a = (-8.5833, 116.1167);
    let b = (-8.5868, 116.1296);
    let c = (-8.5944, 116.2069);
    let r = route(vec![
      waypoint(3, c.0, c.1, Some(7.0), Some(90)),
      waypoint(1, a.0, a.1, Some(9.0), None),
      waypoint(2, b.0, b.1, None, Some(30)),
    ]);
    let stats = route_stats(&r);

    let expected = distance_km(a.0, a.1, b.0, b.1) + distance_km(b.0, b.1, c.0, c.1);
    assert_eq!(stats.total_sites, 3);
    assert_eq!(stats.total_duration, 90 + 60 + 30);
    assert!((stats.total_distance - expected).abs() < 0.006);
    assert_eq!(stats.total_distance, (expected * 100.0).round() / 100.0);
    assert_eq!(stats.average_rating, 8.0);
  }

  #[test]
  fn line_is_sorted_and_longitude_first() {
    let r = route(vec![
      waypoint(2, -8.2, 116.2, None, None),
      waypoint(1, -8.1, 116.1, None, None),
    ]);
    let line = waypoint_line(&r).unwrap();
    assert_eq!(line.coordinates(), &[[116.1, -8.1], [116.2, -8.2]]);
  }

  #[test]
  fn authored_path_takes_precedence() {
    let mut r = route(vec![waypoint(1, -8.1, 116.1, None, None)]);
    let authored = LineString::new(vec![[116.0, -8.0], [116.05, -8.05]]);
    r.path = Some(authored.clone());
    assert_eq!(render_line(&r), Some(authored));

    r.path = Some(LineString::new(vec![]));
    assert_eq!(render_line(&r), waypoint_line(&r));
  }

  #[test]
  fn generate_route_keeps_caller_order() {
    let points = vec![
      Coordinate::new_unchecked(-8.9, 116.5),
      Coordinate::new_unchecked(-8.1, 116.1),
      Coordinate::new_unchecked(-8.5, 116.3),
    ];
    assert_eq!(generate_route(&points), vec![
      [116.5, -8.9],
      [116.1, -8.1],
      [116.3, -8.5],
    ]);
  }
}
