use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::TweetDataset;

// ---------------------------------------------------------------------------
// Filter criteria: inclusive date range plus accepted labels
// ---------------------------------------------------------------------------

/// User-selected filter. Rebuilt from the controls on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// First calendar date shown (inclusive).
    pub start: NaiveDate,
    /// Last calendar date shown (inclusive).
    pub end: NaiveDate,
    /// Labels to keep. Empty means nothing passes.
    pub labels: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria matching the whole dataset: observed date range, all labels.
    /// `None` when the dataset has no records.
    pub fn full(dataset: &TweetDataset) -> Option<Self> {
        let (start, end) = dataset.date_bounds()?;
        Some(FilterCriteria {
            start,
            end,
            labels: dataset.labels.iter().cloned().collect(),
        })
    }

    pub fn matches(&self, date: NaiveDate, label: &str) -> bool {
        self.start <= date && date <= self.end && self.labels.contains(label)
    }
}

/// Return indices of records that pass the criteria, in dataset order.
///
/// A record passes when its calendar date lies in `[start, end]` and its
/// label is in the accepted set. `start > end` or an empty label set
/// yields no records.
pub fn filtered_indices(dataset: &TweetDataset, criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.labels.is_empty() {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec.date(), &rec.label))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, three_day_dataset};
    use crate::data::model::TweetDataset;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn labels(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn date_range_and_label_both_apply() {
        let ds = three_day_dataset();
        let criteria = FilterCriteria {
            start: date("2024-01-01"),
            end: date("2024-01-02"),
            labels: labels(&["positive"]),
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![0]);
    }

    #[test]
    fn full_criteria_is_identity() {
        let ds = three_day_dataset();
        let criteria = FilterCriteria::full(&ds).unwrap();
        assert_eq!(criteria.start, date("2024-01-01"));
        assert_eq!(criteria.end, date("2024-01-03"));
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1, 2]);
    }

    #[test]
    fn empty_label_set_yields_empty_view() {
        let ds = three_day_dataset();
        let mut criteria = FilterCriteria::full(&ds).unwrap();
        criteria.labels.clear();
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn boundaries_are_inclusive_on_both_ends() {
        let ds = three_day_dataset();
        let criteria = FilterCriteria {
            start: date("2024-01-02"),
            end: date("2024-01-03"),
            labels: labels(&["positive", "negative"]),
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![1, 2]);
    }

    #[test]
    fn inverted_range_yields_empty_view() {
        let ds = three_day_dataset();
        let mut criteria = FilterCriteria::full(&ds).unwrap();
        std::mem::swap(&mut criteria.start, &mut criteria.end);
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn every_visible_record_satisfies_the_criteria() {
        let ds = TweetDataset::from_records(
            (0..30)
                .map(|i| {
                    let label = ["positif", "negatif", "netral"][i % 3];
                    record(&format!("2025-03-{:02}", 1 + i % 28), label, "kata")
                })
                .collect(),
        );
        let criteria = FilterCriteria {
            start: date("2025-03-05"),
            end: date("2025-03-17"),
            labels: labels(&["negatif", "netral"]),
        };
        let visible = filtered_indices(&ds, &criteria);
        assert!(!visible.is_empty());
        for &i in &visible {
            let rec = &ds.records[i];
            assert!(rec.date() >= criteria.start && rec.date() <= criteria.end);
            assert!(criteria.labels.contains(&rec.label));
        }
        let expected = ds
            .records
            .iter()
            .filter(|r| criteria.matches(r.date(), &r.label))
            .count();
        assert_eq!(visible.len(), expected);
    }
}
