use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::model::TweetDataset;

/// Number of visible records carrying one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Count of visible records per label, largest first (ties by label).
pub fn sentiment_distribution(dataset: &TweetDataset, indices: &[usize]) -> Vec<LabelCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &i in indices {
        *counts.entry(dataset.records[i].label.as_str()).or_default() += 1;
    }

    let mut out: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}

// ---------------------------------------------------------------------------
// Date × label pivot
// ---------------------------------------------------------------------------

/// Date-indexed table of counts, one column per label seen in the view.
///
/// Only dates with at least one record get a row; missing (date, label)
/// combinations are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendTable {
    /// Column headers, sorted.
    pub labels: Vec<String>,
    /// `(date, counts)` ordered by date; `counts[j]` belongs to `labels[j]`.
    pub rows: Vec<(NaiveDate, Vec<usize>)>,
}

impl TrendTable {
    /// The `(date, count)` series of a single label column.
    pub fn series(&self, column: usize) -> impl Iterator<Item = (NaiveDate, usize)> + '_ {
        self.rows.iter().map(move |(date, counts)| (*date, counts[column]))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn sentiment_trend(dataset: &TweetDataset, indices: &[usize]) -> TrendTable {
    let labels: Vec<String> = indices
        .iter()
        .map(|&i| dataset.records[i].label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut by_date: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        // labels is sorted and contains every visible label
        let Ok(column) = labels.binary_search(&rec.label) else {
            continue;
        };
        by_date
            .entry(rec.date())
            .or_insert_with(|| vec![0; labels.len()])[column] += 1;
    }

    TrendTable {
        labels,
        rows: by_date.into_iter().collect(),
    }
}
