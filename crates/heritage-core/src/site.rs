//! Sites, categories and reviews as they arrive from the data store.
//!
//! These records are read-only to this workspace: they are denormalised rows
//! (category display fields already joined in) captured in a
//! [`Snapshot`](crate::snapshot::Snapshot).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{Error, Result, geometry::Coordinate};

// ─── Preservation status ─────────────────────────────────────────────────────

/// Physical condition of a site as recorded by the heritage office.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PreservationStatus {
  Excellent,
  Good,
  Fair,
  Poor,
  Critical,
  Restored,
  UnderRestoration,
}

impl PreservationStatus {
  /// Human-readable label, e.g. "under restoration".
  pub fn label(self) -> String { self.as_ref().replace('_', " ") }
}

// ─── Site ────────────────────────────────────────────────────────────────────

/// A catalogued cultural heritage site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
  pub id:                          Uuid,
  pub name:                        String,
  pub latitude:                    f64,
  pub longitude:                   f64,
  #[serde(default)]
  pub preservation_status:         Option<PreservationStatus>,
  /// 0–10; `None` when the survey has not scored the site yet.
  #[serde(default)]
  pub cultural_significance_score: Option<f64>,
  /// 0–10.
  #[serde(default)]
  pub tourism_popularity_score:    Option<f64>,
  #[serde(default)]
  pub established_year:            Option<i32>,
  /// `None` is treated as "not a UNESCO site".
  #[serde(default)]
  pub is_unesco_site:              Option<bool>,
  #[serde(default)]
  pub category_id:                 Option<Uuid>,
  #[serde(default)]
  pub category_name:               Option<String>,
  #[serde(default)]
  pub category_color:              Option<String>,
  #[serde(default = "default_true")]
  pub is_active:                   bool,
  #[serde(default)]
  pub is_verified:                 bool,
  pub created_at:                  DateTime<Utc>,
}

pub(crate) fn default_true() -> bool { true }

impl Site {
  /// Minimal constructor; every optional attribute starts unknown.
  pub fn new(
    id: Uuid,
    name: impl Into<String>,
    latitude: f64,
    longitude: f64,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      name: name.into(),
      latitude,
      longitude,
      preservation_status: None,
      cultural_significance_score: None,
      tourism_popularity_score: None,
      established_year: None,
      is_unesco_site: None,
      category_id: None,
      category_name: None,
      category_color: None,
      is_active: true,
      is_verified: false,
      created_at,
    }
  }

  pub fn coordinate(&self) -> Coordinate {
    Coordinate::new_unchecked(self.latitude, self.longitude)
  }

  pub fn is_unesco(&self) -> bool { self.is_unesco_site.unwrap_or(false) }

  /// Check the coordinate and score invariants.
  pub fn validate(&self) -> Result<()> {
    Coordinate::new(self.latitude, self.longitude)?;
    check_score(
      "cultural_significance_score",
      self.cultural_significance_score,
    )?;
    check_score("tourism_popularity_score", self.tourism_popularity_score)?;
    Ok(())
  }
}

fn check_score(field: &'static str, value: Option<f64>) -> Result<()> {
  match value {
    Some(v) if !(0.0..=10.0).contains(&v) => {
      Err(Error::ScoreOutOfRange { field, value: v })
    }
    _ => Ok(()),
  }
}

// ─── Category ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
  pub id:        Uuid,
  pub name:      String,
  /// CSS colour used by charts and map markers, e.g. `#8b5cf6`.
  pub color:     String,
  #[serde(default = "default_true")]
  pub is_active: bool,
}

// ─── Review ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
  pub id:          Uuid,
  pub site_id:     Uuid,
  /// Star rating, 1–5.
  pub rating:      u8,
  #[serde(default)]
  pub is_verified: bool,
}

impl Review {
  pub fn validate(&self) -> Result<()> {
    if (1..=5).contains(&self.rating) {
      Ok(())
    } else {
      Err(Error::RatingOutOfRange {
        review_id: self.id,
        rating:    self.rating,
      })
    }
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use chrono::TimeZone;

  use super::*;

  fn site() -> Site {
    Site::new(
      Uuid::nil(),
      "Pura Lingsar",
      -8.5836,
      116.1680,
      Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    )
  }

  #[test]
  fn status_round_trips_through_snake_case() {
    let status = PreservationStatus::from_str("under_restoration").unwrap();
    assert_eq!(status, PreservationStatus::UnderRestoration);
    assert_eq!(status.to_string(), "under_restoration");
    assert_eq!(status.label(), "under restoration");
  }

  #[test]
  fn score_above_ten_is_rejected() {
    let mut s = site();
    s.tourism_popularity_score = Some(10.5);
    assert!(matches!(
      s.validate(),
      Err(Error::ScoreOutOfRange {
        field: "tourism_popularity_score",
        ..
      })
    ));
  }

  #[test]
  fn missing_optional_fields_deserialise_as_unknown() {
    let json = serde_json::json!({
      "id": Uuid::nil(),
      "name": "Masjid Kuno Bayan Beleq",
      "latitude": -8.27,
      "longitude": 116.41,
      "created_at": "2024-03-01T00:00:00Z",
    });
    let s: Site = serde_json::from_value(json).unwrap();
    assert!(s.preservation_status.is_none());
    assert!(!s.is_unesco());
    assert!(s.is_active);
    assert!(s.validate().is_ok());
  }

  #[test]
  fn review_rating_must_be_one_to_five() {
    let review = Review {
      id:          Uuid::nil(),
      site_id:     Uuid::nil(),
      rating:      0,
      is_verified: false,
    };
    assert!(review.validate().is_err());
  }
}
