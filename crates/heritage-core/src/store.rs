//! The `SnapshotSource` trait.
//!
//! The trait is implemented by snapshot backends (e.g. `heritage-store-file`).
//! Higher layers (`heritage-api`, `heritage-server`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::snapshot::Snapshot;

/// Abstraction over wherever heritage records are fetched from.
///
/// Each call returns a fresh, validated [`Snapshot`]; callers compute derived
/// views from it and discard it. Implementations must return `Send` futures
/// so the trait can be used from axum handlers.
pub trait SnapshotSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the current records.
  fn snapshot(
    &self,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;
}
