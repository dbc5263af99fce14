//! CSV export of preservation priorities.

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::{Error, Result, priority::PreservationPriority};

pub const CSV_HEADER: [&str; 10] = [
  "Site Name",
  "Priority Level",
  "Total Score",
  "Preservation Status Score",
  "Historical Significance Score",
  "Tourism Popularity Score",
  "Site Age Score",
  "UNESCO Status Score",
  "Reasons",
  "Recommended Actions",
];

/// Separator between reasons (and between actions) inside a single field.
pub const LIST_SEPARATOR: &str = "; ";

/// Render `priorities` as CSV with every field quoted.
pub fn priorities_csv(priorities: &[PreservationPriority]) -> Result<String> {
  let mut writer = WriterBuilder::new()
    .quote_style(QuoteStyle::Always)
    .from_writer(Vec::new());

  writer.write_record(CSV_HEADER)?;
  for p in priorities {
    let s = &p.scores;
    writer.write_record([
      p.site_name.clone(),
      p.tier.to_string(),
      format!("{:.2}", p.total_score),
      format!("{:.1}", s.preservation_status),
      format!("{:.1}", s.historical_significance),
      format!("{:.1}", s.tourism_popularity),
      format!("{:.1}", s.site_age),
      format!("{:.1}", s.unesco_status),
      p.reasons.join(LIST_SEPARATOR),
      p.actions.join(LIST_SEPARATOR),
    ])?;
  }

  let bytes = writer
    .into_inner()
    .map_err(|e| Error::Flush(e.error().to_string()))?;
  Ok(String::from_utf8(bytes)?)
}

/// Download name for an export produced on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
  format!("preservation-priorities-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use heritage_core::site::{PreservationStatus, Site};
  use uuid::Uuid;

  use super::*;
  use crate::priority::PriorityScorer;

  fn priorities() -> Vec<PreservationPriority> {
    let mut a = Site::new(Uuid::new_v4(), "Pura Batu Bolong, Senggigi", -8.49, 116.04, Utc::now());
    a.preservation_status = Some(PreservationStatus::Poor);
    a.tourism_popularity_score = Some(9.0);
    let mut b = Site::new(Uuid::new_v4(), "Kampung \"Sade\"", -8.84, 116.29, Utc::now());
    b.preservation_status = Some(PreservationStatus::Good);
    PriorityScorer::new(2025).score_all(&[a, b])
  }

  fn parse(csv_text: &str) -> Vec<csv::StringRecord> {
    csv::ReaderBuilder::new()
      .has_headers(false)
      .from_reader(csv_text.as_bytes())
      .records()
      .collect::<Result<_, _>>()
      .unwrap()
  }

  #[test]
  fn every_row_has_ten_quoted_fields() {
    let text = priorities_csv(&priorities()).unwrap();
    let records = parse(&text);
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.len() == 10));
    assert_eq!(records[0].iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

    for line in text.lines() {
      assert!(line.starts_with('"') && line.ends_with('"'), "{line}");
    }
  }

  #[test]
  fn commas_and_quotes_stay_inside_their_field() {
    let all = priorities();
    let records = parse(&priorities_csv(&all).unwrap());

    assert_eq!(&records[1][0], "Pura Batu Bolong, Senggigi");
    assert_eq!(&records[2][0], "Kampung \"Sade\"");
    assert_eq!(&records[1][8], all[0].reasons.join("; "));
    assert_eq!(&records[1][9], all[0].actions.join("; "));
    assert_eq!(&records[1][1], all[0].tier.to_string());
  }

  #[test]
  fn empty_export_is_header_only() {
    let records = parse(&priorities_csv(&[]).unwrap());
    assert_eq!(records.len(), 1);
  }

  #[test]
  fn file_name_carries_the_date() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    assert_eq!(
      export_file_name(date),
      "preservation-priorities-2025-03-07.csv"
    );
  }
}
