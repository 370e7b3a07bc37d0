use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single labelled tweet.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Wall-clock time the tweet was posted.
    pub timestamp: NaiveDateTime,
    /// Raw tweet text.
    pub text: String,
    /// Pre-processed text used for word frequencies.
    pub text_clean: String,
    /// Sentiment label assigned upstream.
    pub label: String,
}

impl Record {
    /// Calendar date of the tweet.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

// ---------------------------------------------------------------------------
// TweetDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct TweetDataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Distinct labels in order of first appearance.
    pub labels: Vec<String>,
}

impl TweetDataset {
    /// Build the label index from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut labels: Vec<String> = Vec::new();
        for rec in &records {
            if !labels.contains(&rec.label) {
                labels.push(rec.label.clone());
            }
        }
        TweetDataset { records, labels }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest calendar date, `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().map(Record::date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Dataset-wide statistics, independent of any filter.
    pub fn summary(&self) -> Option<DatasetSummary> {
        let (min_date, max_date) = self.date_bounds()?;
        Some(DatasetSummary {
            total: self.len(),
            min_date,
            max_date,
        })
    }
}

// ---------------------------------------------------------------------------
// DatasetSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub total: usize,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

impl DatasetSummary {
    /// Date range formatted day-month-year, e.g. `01-03-2025 to 31-03-2025`.
    pub fn date_range_label(&self) -> String {
        format!(
            "{} to {}",
            self.min_date.format("%d-%m-%Y"),
            self.max_date.format("%d-%m-%Y")
        )
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} tweets, {}", self.total, self.date_range_label())
    }
}
