//! Context layers that can be switched on over the site map.
//!
//! Overlays carry no geometry; the renderer supplies placeholder lines and
//! points for each layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

pub const DEFAULT_OVERLAY_OPACITY: f64 = 0.7;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OverlayLayer {
  Roads,
  Rivers,
  Villages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialOverlay {
  pub layer:   OverlayLayer,
  pub visible: bool,
  /// Always within [0, 1].
  pub opacity: f64,
}

impl SpatialOverlay {
  pub fn new(layer: OverlayLayer) -> Self {
    Self {
      layer,
      visible: false,
      opacity: DEFAULT_OVERLAY_OPACITY,
    }
  }

  pub fn toggled(mut self) -> Self {
    self.visible = !self.visible;
    self
  }

  /// Set opacity, clamped into [0, 1]. NaN resets to the default.
  pub fn with_opacity(mut self, opacity: f64) -> Self {
    self.opacity = if opacity.is_nan() {
      DEFAULT_OVERLAY_OPACITY
    } else {
      opacity.clamp(0.0, 1.0)
    };
    self
  }
}

/// Every layer, hidden, at the default opacity.
pub fn default_overlays() -> Vec<SpatialOverlay> {
  OverlayLayer::iter().map(SpatialOverlay::new).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_cover_every_layer_hidden() {
    let overlays = default_overlays();
    let layers: Vec<String> =
      overlays.iter().map(|o| o.layer.to_string()).collect();
    assert_eq!(layers, vec!["roads", "rivers", "villages"]);
    assert!(overlays.iter().all(|o| !o.visible));
  }

  #[test]
  fn opacity_is_clamped() {
    let o = SpatialOverlay::new(OverlayLayer::Rivers);
    assert_eq!(o.clone().with_opacity(1.4).opacity, 1.0);
    assert_eq!(o.clone().with_opacity(-0.2).opacity, 0.0);
    assert_eq!(o.with_opacity(f64::NAN).opacity, DEFAULT_OVERLAY_OPACITY);
  }

  #[test]
  fn toggle_flips_visibility() {
    let o = SpatialOverlay::new(OverlayLayer::Roads).toggled();
    assert!(o.visible);
    assert!(!o.toggled().visible);
  }
}
