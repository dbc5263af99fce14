//! Geographic primitives and the GeoJSON shapes handed to map renderers.
//!
//! GeoJSON positions are always `[longitude, latitude]`; [`Coordinate`] keeps
//! the conventional `lat, lng` field order and converts on the way out.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Coordinate ──────────────────────────────────────────────────────────────

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
  pub lat: f64,
  pub lng: f64,
}

/// A GeoJSON position: `[lng, lat]`.
pub type Position = [f64; 2];

impl Coordinate {
  /// Build a coordinate, rejecting latitudes outside [-90, 90] and longitudes
  /// outside [-180, 180].
  pub fn new(lat: f64, lng: f64) -> Result<Self> {
    let coordinate = Self { lat, lng };
    if coordinate.in_range() {
      Ok(coordinate)
    } else {
      Err(Error::CoordinateOutOfRange { lat, lng })
    }
  }

  /// Build a coordinate without range checks. NaN and out-of-range values
  /// propagate into any arithmetic done with it.
  pub const fn new_unchecked(lat: f64, lng: f64) -> Self { Self { lat, lng } }

  pub fn in_range(&self) -> bool {
    (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
  }

  /// GeoJSON axis order.
  pub fn to_position(self) -> Position { [self.lng, self.lat] }

  pub fn from_position(position: Position) -> Self {
    Self {
      lat: position[1],
      lng: position[0],
    }
  }
}

// ─── GeoJSON shapes ──────────────────────────────────────────────────────────

/// A GeoJSON `LineString` geometry.
///
/// Serialises as `{"type":"LineString","coordinates":[[lng,lat],...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LineString {
  LineString { coordinates: Vec<Position> },
}

impl LineString {
  pub fn new(coordinates: Vec<Position>) -> Self {
    Self::LineString { coordinates }
  }

  pub fn coordinates(&self) -> &[Position] {
    match self {
      Self::LineString { coordinates } => coordinates,
    }
  }

  pub fn is_empty(&self) -> bool { self.coordinates().is_empty() }
}

/// A GeoJSON `Polygon` geometry with a single exterior ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Polygon {
  Polygon { coordinates: Vec<Vec<Position>> },
}

impl Polygon {
  /// Build a polygon from an exterior ring, closing it if the caller did not.
  pub fn from_exterior(mut ring: Vec<Position>) -> Self {
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last())
      && first != *last
    {
      ring.push(first);
    }
    Self::Polygon {
      coordinates: vec![ring],
    }
  }

  pub fn exterior(&self) -> &[Position] {
    match self {
      Self::Polygon { coordinates } => {
        coordinates.first().map(Vec::as_slice).unwrap_or(&[])
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_out_of_range_latitude() {
    assert!(matches!(
      Coordinate::new(91.0, 0.0),
      Err(Error::CoordinateOutOfRange { .. })
    ));
    assert!(Coordinate::new(-8.65, 116.32).is_ok());
  }

  #[test]
  fn position_is_longitude_first() {
    let c = Coordinate::new_unchecked(-8.65, 116.32);
    assert_eq!(c.to_position(), [116.32, -8.65]);
    assert_eq!(Coordinate::from_position(c.to_position()), c);
  }

  #[test]
  fn line_string_serialises_as_geojson() {
    let line = LineString::new(vec![[116.1, -8.5], [116.2, -8.6]]);
    let json = serde_json::to_value(&line).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "type": "LineString",
        "coordinates": [[116.1, -8.5], [116.2, -8.6]],
      })
    );
  }

  #[test]
  fn polygon_ring_is_closed() {
    let polygon =
      Polygon::from_exterior(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
    let ring = polygon.exterior();
    assert_eq!(ring.len(), 4);
    assert_eq!(ring.first(), ring.last());
  }
}
