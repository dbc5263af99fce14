//! Error types for `heritage-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("coordinate out of range: lat={lat}, lng={lng}")]
  CoordinateOutOfRange { lat: f64, lng: f64 },

  #[error("{field} must be within [0, 10], got {value}")]
  ScoreOutOfRange { field: &'static str, value: f64 },

  #[error("review {review_id} has rating {rating}, expected 1..=5")]
  RatingOutOfRange { review_id: Uuid, rating: u8 },

  #[error("route {route_id} has more than one waypoint at sequence {sequence}")]
  DuplicateSequence { route_id: Uuid, sequence: u32 },

  #[error("route {route_id} skips sequence {expected} (next is {found})")]
  SequenceGap {
    route_id: Uuid,
    expected: u32,
    found:    u32,
  },

  #[error("site not found: {0}")]
  SiteNotFound(Uuid),

  #[error("route not found: {0}")]
  RouteNotFound(Uuid),

  #[error("classifier failed: {0}")]
  Classifier(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
