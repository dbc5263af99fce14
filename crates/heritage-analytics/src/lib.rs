//! Spatial and preservation-priority analytics over a heritage
//! [`Snapshot`](heritage_core::snapshot::Snapshot).
//!
//! Everything here is a pure, synchronous function of its inputs: derived
//! view-models are rebuilt from scratch on every call and nothing is cached.

pub mod buffer;
pub mod error;
pub mod export;
pub mod geo;
pub mod overlay;
pub mod priority;
pub mod report;
pub mod route;

pub use error::{Error, Result};

/// Round `value` to `places` decimal places, half away from zero.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
  let factor = 10f64.powi(places);
  (value * factor).round() / factor
}
