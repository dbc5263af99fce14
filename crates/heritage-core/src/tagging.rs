//! Image-tagging collaborator.
//!
//! The classifier model lives outside this workspace. Callers inject an
//! [`ImageClassifier`] through a [`LazyClassifier`], which builds it on first
//! use and hands out shared references afterwards.

use std::{future::Future, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::Result;

/// One label guessed by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
  pub label:      String,
  /// Model confidence in [0, 1].
  pub confidence: f32,
}

/// An opaque image classifier.
pub trait ImageClassifier: Send + Sync {
  fn classify<'a>(
    &'a self,
    image: &'a [u8],
  ) -> impl Future<Output = Result<Vec<Prediction>>> + Send + 'a;
}

/// A classifier that is initialised on first [`acquire`](Self::acquire).
///
/// Concurrent first callers share a single initialisation. A failed
/// initialisation is not cached; the next caller retries.
pub struct LazyClassifier<C, F> {
  cell: OnceCell<Arc<C>>,
  init: F,
}

impl<C, F, Fut> LazyClassifier<C, F>
where
  C: ImageClassifier,
  F: Fn() -> Fut + Send + Sync,
  Fut: Future<Output = Result<C>> + Send,
{
  pub fn new(init: F) -> Self {
    Self {
      cell: OnceCell::new(),
      init,
    }
  }

  /// Return the shared classifier, building it if needed.
  pub async fn acquire(&self) -> Result<Arc<C>> {
    let classifier = self
      .cell
      .get_or_try_init(|| async {
        tracing::debug!("initialising image classifier");
        (self.init)().await.map(Arc::new)
      })
      .await?;
    Ok(Arc::clone(classifier))
  }

  pub fn is_initialised(&self) -> bool { self.cell.initialized() }
}

/// Turn raw predictions into tag suggestions.
///
/// Labels are trimmed and lower-cased; predictions below `min_confidence` are
/// dropped; duplicates keep their highest confidence. The result is sorted by
/// confidence descending and truncated to `limit`.
pub fn suggest_tags(
  predictions: &[Prediction],
  min_confidence: f32,
  limit: usize,
) -> Vec<Prediction> {
  let mut tags: Vec<Prediction> = Vec::new();
  for p in predictions {
    if p.confidence < min_confidence {
      continue;
    }
    let label = p.label.trim().to_lowercase();
    if label.is_empty() {
      continue;
    }
    match tags.iter_mut().find(|t| t.label == label) {
      Some(existing) => {
        existing.confidence = existing.confidence.max(p.confidence)
      }
      None => tags.push(Prediction {
        label,
        confidence: p.confidence,
      }),
    }
  }
  tags.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
  tags.truncate(limit);
  tags
}
