//! Simulated word count history
//!
//! The corpus is a single snapshot, so there is no real history to report.
//! This produces a fixed, deterministic series per title for the dashboard's
//! trend chart. The numbers are synthetic and do not read the table.
//!
//! Any integer title is accepted, including zero and negatives, so counts
//! are signed and can go below zero for large negative titles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// (year, base word count) for each simulated point
const SIMULATED_POINTS: [(i32, i64); 4] = [
    (2021, 10_000),
    (2022, 10_200),
    (2023, 10_450),
    (2024, 10_600),
];

/// Added to every point per unit of title number
const PER_TITLE_OFFSET: i64 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub word_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleHistory {
    pub title: i64,
    pub history: Vec<HistoryPoint>,
}

/// Synthetic yearly history for `title`
pub fn simulated_history(title: i64) -> TitleHistory {
    let offset = title.saturating_mul(PER_TITLE_OFFSET);
    let history = SIMULATED_POINTS
        .iter()
        .filter_map(|&(year, base)| {
            NaiveDate::from_ymd_opt(year, 1, 1).map(|date| HistoryPoint {
                date,
                word_count: base.saturating_add(offset),
            })
        })
        .collect();

    TitleHistory { title, history }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_values() {
        let h = simulated_history(7);
        assert_eq!(h.title, 7);
        let counts: Vec<_> = h.history.iter().map(|p| p.word_count).collect();
        assert_eq!(counts, vec![10_350, 10_550, 10_800, 10_950]);
    }

    #[test]
    fn test_negative_title_lowers_counts() {
        let h = simulated_history(-3);
        assert_eq!(h.title, -3);
        let counts: Vec<_> = h.history.iter().map(|p| p.word_count).collect();
        assert_eq!(counts, vec![9_850, 10_050, 10_300, 10_450]);

        let far = simulated_history(-1_000);
        assert_eq!(far.history[0].word_count, -40_000);
    }

    #[test]
    fn test_extreme_title_saturates() {
        let h = simulated_history(i64::MAX);
        assert!(h.history.iter().all(|p| p.word_count == i64::MAX));
    }

    #[test]
    fn test_history_dates_serialize_as_iso() {
        let json = serde_json::to_value(simulated_history(0)).unwrap();
        assert_eq!(json["history"][0]["date"], "2021-01-01");
        assert_eq!(json["history"][3]["date"], "2024-01-01");
        assert_eq!(json["history"][0]["word_count"], 10_000);
    }
}
