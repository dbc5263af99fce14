//! Dashboard aggregations: chart series and summary counters.
//!
//! Months are UTC calendar months throughout.

use chrono::{DateTime, Datelike, Utc};
use heritage_core::{
  site::{Category, PreservationStatus, Site},
  snapshot::Snapshot,
};
use serde::Serialize;
use strum::IntoEnumIterator;
use uuid::Uuid;

use crate::round_to;

pub const UNCATEGORIZED_NAME: &str = "Uncategorized";
pub const UNCATEGORIZED_COLOR: &str = "#9ca3af";

/// Heatmap intensity for a site whose significance has not been scored.
pub const UNKNOWN_HEAT_INTENSITY: f64 = 0.5;

// ─── Category distribution ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryData {
  pub category_id: Option<Uuid>,
  pub name:        String,
  pub color:       String,
  pub count:       usize,
}

/// Active sites counted per category, largest first (ties by name).
///
/// A category's label and colour come from the site's joined fields, then
/// from `categories`; an id found in neither is labelled with the id itself.
pub fn category_distribution(
  sites: &[Site],
  categories: &[Category],
) -> Vec<CategoryData> {
  let mut groups: Vec<CategoryData> = Vec::new();
  for site in sites.iter().filter(|s| s.is_active) {
    match groups.iter_mut().find(|g| g.category_id == site.category_id) {
      Some(group) => group.count += 1,
      None => {
        let (name, color) = category_label(site, categories);
        groups.push(CategoryData {
          category_id: site.category_id,
          name,
          color,
          count: 1,
        });
      }
    }
  }
  groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
  groups
}

fn category_label(site: &Site, categories: &[Category]) -> (String, String) {
  let Some(id) = site.category_id else {
    return (UNCATEGORIZED_NAME.to_string(), UNCATEGORIZED_COLOR.to_string());
  };
  let known = categories.iter().find(|c| c.id == id);
  let name = site
    .category_name
    .clone()
    .or_else(|| known.map(|c| c.name.clone()))
    .unwrap_or_else(|| id.to_string());
  let color = site
    .category_color
    .clone()
    .or_else(|| known.map(|c| c.color.clone()))
    .unwrap_or_else(|| UNCATEGORIZED_COLOR.to_string());
  (name, color)
}

// ─── Monthly growth ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesPoint {
  /// `YYYY-MM`.
  pub period:     String,
  /// Sites created during the month.
  pub count:      usize,
  /// Sites created up to the end of the month, including those before the
  /// first month of the series.
  pub cumulative: usize,
}

fn month_index(year: i32, month: u32) -> i64 {
  i64::from(year) * 12 + i64::from(month) - 1
}

fn month_label(index: i64) -> String {
  format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}

/// Growth over the trailing `months` calendar months ending with the month of
/// `as_of`, oldest first. Sites created after that month are ignored.
pub fn monthly_growth(
  sites: &[Site],
  months: u32,
  as_of: DateTime<Utc>,
) -> Vec<TimeSeriesPoint> {
  if months == 0 {
    return Vec::new();
  }
  let last = month_index(as_of.year(), as_of.month());
  let first = last - i64::from(months) + 1;

  let created: Vec<i64> = sites
    .iter()
    .map(|s| month_index(s.created_at.year(), s.created_at.month()))
    .collect();

  let mut cumulative = created.iter().filter(|&&m| m < first).count();
  (first..=last)
    .map(|month| {
      let count = created.iter().filter(|&&m| m == month).count();
      cumulative += count;
      TimeSeriesPoint {
        period: month_label(month),
        count,
        cumulative,
      }
    })
    .collect()
}

// ─── Heatmap ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapPoint {
  pub lat:       f64,
  pub lng:       f64,
  /// Cultural significance / 10, clamped to [0, 1].
  pub intensity: f64,
  pub site_id:   Uuid,
}

pub fn heat_intensity(site: &Site) -> f64 {
  site
    .cultural_significance_score
    .map(|s| (s / 10.0).clamp(0.0, 1.0))
    .unwrap_or(UNKNOWN_HEAT_INTENSITY)
}

pub fn heatmap_points(sites: &[Site]) -> Vec<HeatmapPoint> {
  sites
    .iter()
    .map(|s| HeatmapPoint {
      lat:       s.latitude,
      lng:       s.longitude,
      intensity: heat_intensity(s),
      site_id:   s.id,
    })
    .collect()
}

// ─── Preservation breakdown ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
  /// `None` groups sites without a recorded status.
  pub status: Option<PreservationStatus>,
  pub count:  usize,
}

/// Sites per preservation status in declaration order; the unknown bucket is
/// appended only when non-empty.
pub fn preservation_breakdown(sites: &[Site]) -> Vec<StatusCount> {
  let count_of = |status: Option<PreservationStatus>| {
    sites.iter().filter(|s| s.preservation_status == status).count()
  };
  let mut breakdown: Vec<StatusCount> = PreservationStatus::iter()
    .map(|status| StatusCount {
      status: Some(status),
      count:  count_of(Some(status)),
    })
    .collect();
  let unknown = count_of(None);
  if unknown > 0 {
    breakdown.push(StatusCount {
      status: None,
      count:  unknown,
    });
  }
  breakdown
}

// ─── Summary ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiteCounts {
  pub total:    usize,
  pub active:   usize,
  pub inactive: usize,
  pub verified: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryCounts {
  pub total:  usize,
  /// Referenced by at least one site.
  pub in_use: usize,
  pub unused: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReviewCounts {
  pub total:          usize,
  pub verified:       usize,
  /// Mean star rating rounded to 1 dp; `0.0` when there are no reviews.
  pub average_rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteCounts {
  pub total:  usize,
  pub active: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardSummary {
  pub sites:      SiteCounts,
  pub categories: CategoryCounts,
  pub reviews:    ReviewCounts,
  pub routes:     RouteCounts,
}

pub fn dashboard_summary(snapshot: &Snapshot) -> DashboardSummary {
  let sites = &snapshot.sites;
  let active = sites.iter().filter(|s| s.is_active).count();

  let in_use = snapshot
    .categories
    .iter()
    .filter(|c| sites.iter().any(|s| s.category_id == Some(c.id)))
    .count();

  let reviews = &snapshot.reviews;
  let average_rating = if reviews.is_empty() {
    0.0
  } else {
    reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>()
      / reviews.len() as f64
  };

  DashboardSummary {
    sites:      SiteCounts {
      total: sites.len(),
      active,
      inactive: sites.len() - active,
      verified: sites.iter().filter(|s| s.is_verified).count(),
    },
    categories: CategoryCounts {
      total: snapshot.categories.len(),
      in_use,
      unused: snapshot.categories.len() - in_use,
    },
    reviews:    ReviewCounts {
      total:          reviews.len(),
      verified:       reviews.iter().filter(|r| r.is_verified).count(),
      average_rating: round_to(average_rating, 1),
    },
    routes:     RouteCounts {
      total:  snapshot.routes.len(),
      active: snapshot.routes.iter().filter(|r| r.is_active).count(),
    },
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use heritage_core::{route::Route, site::Review};

  use super::*;

  fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
  }

  fn site(name: &str, created_at: DateTime<Utc>) -> Site {
    Site::new(Uuid::new_v4(), name, -8.6, 116.1, created_at)
  }

  fn categorised(name: &str, category: &Category) -> Site {
    let mut s = site(name, at(2025, 1, 1));
    s.category_id = Some(category.id);
    s.category_name = Some(category.name.clone());
    s.category_color = Some(category.color.clone());
    s
  }

  fn category(name: &str, color: &str) -> Category {
    Category {
      id:        Uuid::new_v4(),
      name:      name.into(),
      color:     color.into(),
      is_active: true,
    }
  }

  #[test]
  fn distribution_counts_active_sites_largest_first() {
    let temples = category("Temples", "#ef4444");
    let villages = category("Villages", "#10b981");
    let mut inactive = categorised("closed", &temples);
    inactive.is_active = false;
    let sites = vec![
      categorised("a", &villages),
      categorised("b", &temples),
      categorised("c", &temples),
      inactive,
      site("loose", at(2025, 1, 1)),
    ];

    let dist = category_distribution(&sites, &[temples, villages]);
    assert_eq!(dist.len(), 3);
    assert_eq!((dist[0].name.as_str(), dist[0].count), ("Temples", 2));
    assert_eq!(dist[0].color, "#ef4444");
    assert_eq!(dist[1].name, UNCATEGORIZED_NAME);
    assert_eq!(dist[1].color, UNCATEGORIZED_COLOR);
    assert_eq!(dist[2].name, "Villages");
  }

  #[test]
  fn distribution_labels_unjoined_sites_from_categories() {
    let weaving = category("Weaving", "#f59e0b");
    let mut unjoined = site("Sukarara", at(2025, 1, 1));
    unjoined.category_id = Some(weaving.id);
    let orphan_id = Uuid::new_v4();
    let mut orphan = site("orphan", at(2025, 1, 1));
    orphan.category_id = Some(orphan_id);
    let sites = vec![unjoined, orphan, site("loose", at(2025, 1, 1))];

    let dist = category_distribution(&sites, std::slice::from_ref(&weaving));
    let names: Vec<&str> = dist.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
      names.iter().filter(|n| **n == UNCATEGORIZED_NAME).count(),
      1,
      "{names:?}"
    );
    let woven = dist.iter().find(|d| d.category_id == Some(weaving.id)).unwrap();
    assert_eq!((woven.name.as_str(), woven.color.as_str()), ("Weaving", "#f59e0b"));
    let stray = dist.iter().find(|d| d.category_id == Some(orphan_id)).unwrap();
    assert_eq!(stray.name, orphan_id.to_string());
  }

  #[test]
  fn growth_covers_trailing_months_with_running_total() {
    let sites = vec![
      site("old", at(2024, 6, 3)),
      site("feb", at(2025, 2, 1)),
      site("apr-1", at(2025, 4, 10)),
      site("apr-2", at(2025, 4, 30)),
      site("future", at(2025, 8, 1)),
    ];
    let series = monthly_growth(&sites, 6, at(2025, 6, 15));

    let periods: Vec<&str> = series.iter().map(|p| p.period.as_str()).collect();
    assert_eq!(periods, vec![
      "2025-01", "2025-02", "2025-03", "2025-04", "2025-05", "2025-06"
    ]);
    let counts: Vec<usize> = series.iter().map(|p| p.count).collect();
    assert_eq!(counts, vec![0, 1, 0, 2, 0, 0]);
    let totals: Vec<usize> = series.iter().map(|p| p.cumulative).collect();
    assert_eq!(totals, vec![1, 2, 2, 4, 4, 4]);
  }

  #[test]
  fn growth_window_crosses_year_boundary() {
    let series = monthly_growth(&[], 12, at(2025, 3, 1));
    assert_eq!(series.len(), 12);
    assert_eq!(series[0].period, "2024-04");
    assert_eq!(series[11].period, "2025-03");
    assert!(monthly_growth(&[], 0, at(2025, 3, 1)).is_empty());
  }

  #[test]
  fn heat_intensity_normalises_significance() {
    let mut s = site("s", at(2025, 1, 1));
    assert_eq!(heat_intensity(&s), UNKNOWN_HEAT_INTENSITY);
    s.cultural_significance_score = Some(8.0);
    assert!((heat_intensity(&s) - 0.8).abs() < 1e-12);
    s.cultural_significance_score = Some(12.0);
    assert_eq!(heat_intensity(&s), 1.0);

    let points = heatmap_points(std::slice::from_ref(&s));
    assert_eq!(points[0].site_id, s.id);
    assert_eq!((points[0].lat, points[0].lng), (s.latitude, s.longitude));
  }

  #[test]
  fn breakdown_appends_unknown_only_when_present() {
    let mut poor = site("poor", at(2025, 1, 1));
    poor.preservation_status = Some(PreservationStatus::Poor);
    let b = preservation_breakdown(std::slice::from_ref(&poor));
    assert_eq!(b.len(), 7);
    assert_eq!(b.iter().map(|c| c.count).sum::<usize>(), 1);

    let b = preservation_breakdown(&[poor, site("unknown", at(2025, 1, 1))]);
    assert_eq!(b.len(), 8);
    assert_eq!(b[7], StatusCount {
      status: None,
      count:  1,
    });
  }

  #[test]
  fn summary_counts_every_collection() {
    let temples = category("Temples", "#ef4444");
    let unused = category("Weaving", "#f59e0b");
    let mut verified = categorised("a", &temples);
    verified.is_verified = true;
    let mut inactive = site("b", at(2025, 1, 1));
    inactive.is_active = false;

    let site_id = verified.id;
    let review = |rating, is_verified| Review {
      id: Uuid::new_v4(),
      site_id,
      rating,
      is_verified,
    };
    let route = |is_active| Route {
      id: Uuid::new_v4(),
      name: "r".into(),
      is_active,
      waypoints: vec![],
      path: None,
    };

    let snapshot = Snapshot {
      reviews:    vec![review(5, true), review(4, false), review(4, true)],
      routes:     vec![route(true), route(false)],
      categories: vec![temples, unused],
      sites:      vec![verified, inactive],
    };
    let summary = dashboard_summary(&snapshot);

    assert_eq!(summary.sites, SiteCounts {
      total:    2,
      active:   1,
      inactive: 1,
      verified: 1,
    });
    assert_eq!(summary.categories, CategoryCounts {
      total:  2,
      in_use: 1,
      unused: 1,
    });
    assert_eq!(summary.reviews.total, 3);
    assert_eq!(summary.reviews.verified, 2);
    assert_eq!(summary.reviews.average_rating, 4.3);
    assert_eq!(summary.routes, RouteCounts {
      total:  2,
      active: 1,
    });
  }

  #[test]
  fn summary_of_empty_snapshot_has_zero_average() {
    let summary = dashboard_summary(&Snapshot::default());
    assert_eq!(summary.reviews.average_rating, 0.0);
    assert_eq!(summary.sites.total, 0);
  }
}
