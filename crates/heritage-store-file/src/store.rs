//! [`JsonFileSource`] and [`MemorySource`] — implementations of
//! [`SnapshotSource`].

use std::{
  future::Future,
  path::{Path, PathBuf},
  sync::Arc,
};

use heritage_core::{snapshot::Snapshot, store::SnapshotSource};

use crate::{Error, Result};

// ─── JSON file ───────────────────────────────────────────────────────────────

/// Reads a [`Snapshot`] from a JSON file each time one is requested.
///
/// Cloning is cheap — only the path is shared.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
  path: Arc<PathBuf>,
}

impl JsonFileSource {
  pub fn new(path: impl AsRef<Path>) -> Self {
    Self {
      path: Arc::new(path.as_ref().to_path_buf()),
    }
  }

  pub fn path(&self) -> &Path { &self.path }

  async fn load(&self) -> Result<Snapshot> {
    let path = self.path.as_ref().clone();
    let raw = tokio::fs::read(&path).await.map_err(|source| Error::Read {
      path: path.clone(),
      source,
    })?;
    let snapshot: Snapshot = serde_json::from_slice(&raw)
      .map_err(|source| Error::Json {
        path: path.clone(),
        source,
      })?;

    if let Err(e) = snapshot.validate() {
      tracing::warn!(path = %path.display(), error = %e, "rejecting snapshot");
      return Err(e.into());
    }

    tracing::debug!(
      sites = snapshot.sites.len(),
      routes = snapshot.routes.len(),
      reviews = snapshot.reviews.len(),
      categories = snapshot.categories.len(),
      "loaded snapshot"
    );
    Ok(snapshot)
  }
}

impl SnapshotSource for JsonFileSource {
  type Error = Error;

  fn snapshot(
    &self,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_ {
    self.load()
  }
}

// ─── In memory ───────────────────────────────────────────────────────────────

/// Serves clones of one validated snapshot.
#[derive(Debug, Clone)]
pub struct MemorySource {
  snapshot: Arc<Snapshot>,
}

impl MemorySource {
  /// Validate and wrap `snapshot`.
  pub fn new(snapshot: Snapshot) -> Result<Self> {
    snapshot.validate()?;
    Ok(Self {
      snapshot: Arc::new(snapshot),
    })
  }
}

impl SnapshotSource for MemorySource {
  type Error = Error;

  fn snapshot(
    &self,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_ {
    let snapshot = Snapshot::clone(&self.snapshot);
    async move { Ok(snapshot) }
  }
}
