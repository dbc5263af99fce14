//! Great-circle math on a spherical Earth.

use heritage_core::geometry::Coordinate;

/// Mean Earth radius used by every distance in this crate.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub fn to_radians(deg: f64) -> f64 { deg * std::f64::consts::PI / 180.0 }

fn to_degrees(rad: f64) -> f64 { rad * 180.0 / std::f64::consts::PI }

/// Haversine distance in kilometres. Inputs are not validated; NaN propagates.
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
  let d_lat = to_radians(lat2 - lat1);
  let d_lng = to_radians(lng2 - lng1);
  let a = (d_lat / 2.0).sin().powi(2)
    + to_radians(lat1).cos()
      * to_radians(lat2).cos()
      * (d_lng / 2.0).sin().powi(2);
  let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
  EARTH_RADIUS_KM * c
}

pub fn distance_between(a: Coordinate, b: Coordinate) -> f64 {
  distance_km(a.lat, a.lng, b.lat, b.lng)
}

/// The point reached by travelling `distance_m` metres from `origin` along
/// the initial bearing `bearing_deg` (clockwise from north).
pub fn destination(
  origin: Coordinate,
  bearing_deg: f64,
  distance_m: f64,
) -> Coordinate {
  let delta = distance_m / 1000.0 / EARTH_RADIUS_KM;
  let theta = to_radians(bearing_deg);
  let phi1 = to_radians(origin.lat);
  let lambda1 = to_radians(origin.lng);

  let phi2 = (phi1.sin() * delta.cos()
    + phi1.cos() * delta.sin() * theta.cos())
  .asin();
  let lambda2 = lambda1
    + (theta.sin() * delta.sin() * phi1.cos())
      .atan2(delta.cos() - phi1.sin() * phi2.sin());

  // Normalise longitude to [-180, 180).
  let lng = (to_degrees(lambda2) + 540.0).rem_euclid(360.0) - 180.0;
  Coordinate::new_unchecked(to_degrees(phi2), lng)
}
