//! Preservation-priority scoring.
//!
//! Each site is reduced to five component scores on a 0–10 scale, combined
//! with fixed [`WEIGHTS`] into a total, and bucketed into a [`PriorityTier`].
//! Reasons are derived from the component scores; recommended actions depend
//! on the tier alone.
//!
//! Note the historical-significance component is `10 - cultural significance`:
//! a *more* significant site contributes *less* to this component. The
//! published scores depend on that inversion.

use chrono::{Datelike, NaiveDate};
use heritage_core::site::{PreservationStatus, Site};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::round_to;

// ─── Defaults and weights ────────────────────────────────────────────────────

/// Component score used when the underlying attribute is missing.
pub const UNKNOWN_SCORE: f64 = 5.0;
pub const UNESCO_SCORE: f64 = 10.0;
pub const NON_UNESCO_SCORE: f64 = 0.0;

/// Relative weight of each component in the total score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
  pub preservation_status:     f64,
  pub historical_significance: f64,
  pub tourism_popularity:      f64,
  pub site_age:                f64,
  pub unesco_status:           f64,
}

impl Weights {
  pub fn total(&self) -> f64 {
    self.preservation_status
      + self.historical_significance
      + self.tourism_popularity
      + self.site_age
      + self.unesco_status
  }
}

pub const WEIGHTS: Weights = Weights {
  preservation_status:     0.40,
  historical_significance: 0.25,
  tourism_popularity:      0.20,
  site_age:                0.10,
  unesco_status:           0.05,
};

// Reason thresholds, applied to component scores.
const STATUS_REASON_AT: f64 = 8.0;
const SIGNIFICANCE_REASON_AT: f64 = 7.0;
const POPULARITY_REASON_AT: f64 = 7.0;
const AGE_REASON_AT: f64 = 7.0;
const UNESCO_REASON_AT: f64 = 5.0;

pub const STANDARD_MONITORING_REASON: &str =
  "No elevated risk factors; standard monitoring applies";

// ─── Tiers ───────────────────────────────────────────────────────────────────

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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PriorityTier {
  Critical,
  High,
  Medium,
  Low,
}

impl PriorityTier {
  /// Lower bounds are inclusive: exactly 8.0 is critical.
  pub fn for_score(score: f64) -> Self {
    if score >= 8.0 {
      Self::Critical
    } else if score >= 6.0 {
      Self::High
    } else if score >= 4.0 {
      Self::Medium
    } else {
      Self::Low
    }
  }

  /// Fixed recommendations for the tier.
  pub fn actions(self) -> &'static [&'static str] {
    match self {
      Self::Critical => &[
        "Commission an immediate structural assessment",
        "Allocate emergency conservation funding",
        "Restrict visitor access until the site is stabilised",
        "Engage conservation specialists within 30 days",
      ],
      Self::High => &[
        "Schedule a detailed condition survey within 3 months",
        "Prepare a conservation management plan",
        "Monitor visitor impact monthly",
        "Apply for heritage conservation grants",
      ],
      Self::Medium => &[
        "Schedule routine maintenance",
        "Review site condition every 6 months",
        "Update photographic documentation",
      ],
      Self::Low => &[
        "Continue annual condition monitoring",
        "Keep site records up to date",
        "Encourage community stewardship",
      ],
    }
  }
}

// ─── Scored result ───────────────────────────────────────────────────────────

/// The five component scores, each in [0, 10].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
  pub preservation_status:     f64,
  pub historical_significance: f64,
  pub tourism_popularity:      f64,
  pub site_age:                f64,
  pub unesco_status:           f64,
}

impl ComponentScores {
  pub fn weighted_total(&self, weights: &Weights) -> f64 {
    self.preservation_status * weights.preservation_status
      + self.historical_significance * weights.historical_significance
      + self.tourism_popularity * weights.tourism_popularity
      + self.site_age * weights.site_age
      + self.unesco_status * weights.unesco_status
  }
}

/// A site's computed priority. Rebuilt on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreservationPriority {
  pub site_id:     Uuid,
  pub site_name:   String,
  pub scores:      ComponentScores,
  pub total_score: f64,
  pub tier:        PriorityTier,
  pub reasons:     Vec<String>,
  pub actions:     Vec<String>,
}

// ─── Scorer ──────────────────────────────────────────────────────────────────

/// Scores sites relative to a reference year (used for site age).
#[derive(Debug, Clone, Copy)]
pub struct PriorityScorer {
  current_year: i32,
}

impl PriorityScorer {
  pub fn new(current_year: i32) -> Self { Self { current_year } }

  pub fn for_date(date: NaiveDate) -> Self { Self::new(date.year()) }

  pub fn current_year(&self) -> i32 { self.current_year }

  pub fn status_score(status: Option<PreservationStatus>) -> f64 {
    match status {
      Some(PreservationStatus::Critical) => 10.0,
      Some(PreservationStatus::Poor) => 9.0,
      Some(PreservationStatus::Fair) => 6.0,
      Some(PreservationStatus::UnderRestoration) => 4.0,
      Some(PreservationStatus::Good) => 3.0,
      Some(PreservationStatus::Restored) => 2.0,
      Some(PreservationStatus::Excellent) => 1.0,
      None => UNKNOWN_SCORE,
    }
  }

  pub fn significance_score(cultural_significance: Option<f64>) -> f64 {
    cultural_significance
      .map(|s| (10.0 - s).max(0.0))
      .unwrap_or(UNKNOWN_SCORE)
  }

  pub fn popularity_score(tourism_popularity: Option<f64>) -> f64 {
    tourism_popularity.unwrap_or(UNKNOWN_SCORE)
  }

  pub fn age_score(&self, established_year: Option<i32>) -> f64 {
    let Some(year) = established_year else {
      return UNKNOWN_SCORE;
    };
    match i64::from(self.current_year) - i64::from(year) {
      age if age >= 500 => 10.0,
      age if age >= 200 => 8.0,
      age if age >= 100 => 6.0,
      age if age >= 50 => 4.0,
      _ => 2.0,
    }
  }

  pub fn unesco_score(is_unesco: bool) -> f64 {
    if is_unesco { UNESCO_SCORE } else { NON_UNESCO_SCORE }
  }

  pub fn components(&self, site: &Site) -> ComponentScores {
    ComponentScores {
      preservation_status:     Self::status_score(site.preservation_status),
      historical_significance: Self::significance_score(
        site.cultural_significance_score,
      ),
      tourism_popularity:      Self::popularity_score(
        site.tourism_popularity_score,
      ),
      site_age:                self.age_score(site.established_year),
      unesco_status:           Self::unesco_score(site.is_unesco()),
    }
  }

  pub fn score(&self, site: &Site) -> PreservationPriority {
    let scores = self.components(site);
    let total_score = scores.weighted_total(&WEIGHTS);
    let tier = PriorityTier::for_score(total_score);
    PreservationPriority {
      site_id: site.id,
      site_name: site.name.clone(),
      scores,
      total_score,
      tier,
      reasons: reasons(site, &scores),
      actions: tier.actions().iter().map(|a| a.to_string()).collect(),
    }
  }

  /// Score every site, in snapshot order.
  pub fn score_all(&self, sites: &[Site]) -> Vec<PreservationPriority> {
    tracing::debug!(
      sites = sites.len(),
      year = self.current_year,
      "scoring preservation priorities"
    );
    sites.iter().map(|s| self.score(s)).collect()
  }
}

fn reasons(site: &Site, scores: &ComponentScores) -> Vec<String> {
  let mut reasons = Vec::new();
  if scores.preservation_status >= STATUS_REASON_AT {
    let label = site
      .preservation_status
      .map(PreservationStatus::label)
      .unwrap_or_else(|| "unknown".to_string());
    reasons.push(format!(
      "Preservation status is {label}, indicating active deterioration"
    ));
  }
  if scores.historical_significance >= SIGNIFICANCE_REASON_AT {
    reasons.push(format!(
      "Historical significance factor is high ({:.1}/10)",
      scores.historical_significance
    ));
  }
  if scores.tourism_popularity >= POPULARITY_REASON_AT {
    reasons.push(format!(
      "Heavy visitor pressure (popularity {:.1}/10)",
      scores.tourism_popularity
    ));
  }
  if scores.site_age >= AGE_REASON_AT {
    reasons.push("Site is at least 200 years old".to_string());
  }
  if scores.unesco_status >= UNESCO_REASON_AT {
    reasons.push(
      "UNESCO listing requires internationally recognised care".to_string(),
    );
  }
  if reasons.is_empty() {
    reasons.push(STANDARD_MONITORING_REASON.to_string());
  }
  reasons
}

// ─── Batch queries ───────────────────────────────────────────────────────────

fn by_score_desc<'a>(
  mut priorities: Vec<&'a PreservationPriority>,
  limit: usize,
) -> Vec<&'a PreservationPriority> {
  // Stable: equal scores keep snapshot order.
  priorities.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
  priorities.truncate(limit);
  priorities
}

/// Priorities in `tier`, highest score first, at most `limit`.
pub fn sites_by_priority(
  priorities: &[PreservationPriority],
  tier: PriorityTier,
  limit: usize,
) -> Vec<&PreservationPriority> {
  by_score_desc(priorities.iter().filter(|p| p.tier == tier).collect(), limit)
}

/// The `limit` highest-scoring priorities across all tiers.
pub fn top_priority_sites(
  priorities: &[PreservationPriority],
  limit: usize,
) -> Vec<&PreservationPriority> {
  by_score_desc(priorities.iter().collect(), limit)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecommendationStats {
  pub total_sites:   usize,
  pub critical:      usize,
  pub high:          usize,
  pub medium:        usize,
  pub low:           usize,
  /// Mean total score rounded to 2 dp; `0.0` when there are no sites.
  pub average_score: f64,
}

pub fn recommendation_stats(
  priorities: &[PreservationPriority],
) -> RecommendationStats {
  let count = |tier: PriorityTier| priorities.iter().filter(|p| p.tier == tier).count();
  let average_score = if priorities.is_empty() {
    0.0
  } else {
    priorities.iter().map(|p| p.total_score).sum::<f64>()
      / priorities.len() as f64
  };
  RecommendationStats {
    total_sites:   priorities.len(),
    critical:      count(PriorityTier::Critical),
    high:          count(PriorityTier::High),
    medium:        count(PriorityTier::Medium),
    low:           count(PriorityTier::Low),
    average_score: round_to(average_score, 2),
  }
}
