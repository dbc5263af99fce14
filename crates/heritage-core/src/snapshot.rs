//! The immutable in-memory copy of store records that every derived view is
//! computed from.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  route::Route,
  site::{Category, Review, Site},
};

/// Records fetched from the data store at the start of an interaction.
///
/// Treated as read-only for the duration of a computation; analytics never
/// mutate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
  #[serde(default)]
  pub sites:      Vec<Site>,
  #[serde(default)]
  pub categories: Vec<Category>,
  #[serde(default)]
  pub routes:     Vec<Route>,
  #[serde(default)]
  pub reviews:    Vec<Review>,
}

impl Snapshot {
  /// Check every record invariant, returning the first violation found.
  pub fn validate(&self) -> Result<()> {
    for site in &self.sites {
      site.validate()?;
    }
    for route in &self.routes {
      route.validate_sequence()?;
      for waypoint in &route.waypoints {
        waypoint.site.validate()?;
      }
    }
    for review in &self.reviews {
      review.validate()?;
    }
    Ok(())
  }

  pub fn site(&self, id: Uuid) -> Result<&Site> {
    self
      .sites
      .iter()
      .find(|s| s.id == id)
      .ok_or(Error::SiteNotFound(id))
  }

  pub fn route(&self, id: Uuid) -> Result<&Route> {
    self
      .routes
      .iter()
      .find(|r| r.id == id)
      .ok_or(Error::RouteNotFound(id))
  }

  /// Resolve `ids` to sites, preserving the caller's order (and duplicates).
  pub fn select_sites(&self, ids: &[Uuid]) -> Result<Vec<Site>> {
    ids.iter().map(|id| self.site(*id).cloned()).collect()
  }
}
