use std::error::Error as StdError;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, TimeUnit, TimestampMillisecondType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Record, TweetDataset};
use crate::config::ColumnNames;

type BoxError = Box<dyn StdError + Send + Sync>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to produce a dataset or model artifact. Every variant is fatal
/// for the session.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("{}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

impl LoadError {
    pub(crate) fn schema(path: &Path, source: SchemaError) -> Self {
        LoadError::Schema {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: &Path, source: impl Into<BoxError>) -> Self {
        LoadError::Malformed {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

/// The file was readable but its content does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// `row` counts data rows from 1, header excluded.
    #[error("row {row}: cannot parse timestamp '{value}'")]
    UnparseableTimestamp { row: usize, value: String },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },

    #[error("dataset contains no records")]
    Empty,

    #[error("inconsistent artifact: {0}")]
    InconsistentArtifact(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the labelled tweet dataset. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the four required columns
/// * `.json`    – `[{ "Date": ..., "Text": ..., ... }, ...]`
/// * `.parquet` – string label/text columns, string, date or timestamp `Date`
pub fn load_dataset(path: &Path, columns: &ColumnNames) -> Result<TweetDataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => {
            let file = open(path)?;
            read_csv(file, path, columns)?
        }
        "json" => {
            let text = std::fs::read_to_string(path).map_err(|e| LoadError::malformed(path, e))?;
            read_json(&text, path, columns)?
        }
        "parquet" | "pq" => read_parquet(path, columns)?,
        other => {
            return Err(LoadError::malformed(
                path,
                format!("unsupported file extension: .{other}"),
            ))
        }
    };

    if records.is_empty() {
        return Err(LoadError::schema(path, SchemaError::Empty));
    }

    let dataset = TweetDataset::from_records(records);
    log::info!(
        "Loaded {} tweets from {} with labels {:?}",
        dataset.len(),
        path.display(),
        dataset.labels
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => LoadError::malformed(path, e),
    })
}

/// Parse the timestamp formats pandas writes or reads by default.
/// Offset-bearing values keep their local wall-clock time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn timestamp_or_err(raw: &str, row: usize, path: &Path) -> Result<NaiveDateTime, LoadError> {
    parse_timestamp(raw).ok_or_else(|| {
        LoadError::schema(
            path,
            SchemaError::UnparseableTimestamp {
                row,
                value: raw.to_string(),
            },
        )
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. Extra columns are ignored.
pub(crate) fn read_csv<R: Read>(
    reader: R,
    path: &Path,
    columns: &ColumnNames,
) -> Result<Vec<Record>, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::malformed(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::schema(path, SchemaError::MissingColumn(name.to_string())))
    };
    let ts_idx = position(&columns.timestamp)?;
    let label_idx = position(&columns.label)?;
    let text_idx = position(&columns.text)?;
    let clean_idx = position(&columns.text_clean)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|e| LoadError::malformed(path, e))?;
        let field = |idx: usize| row.get(idx).unwrap_or("").to_string();

        records.push(Record {
            timestamp: timestamp_or_err(row.get(ts_idx).unwrap_or(""), row_no + 1, path)?,
            text: field(text_idx),
            text_clean: field(clean_idx),
            label: field(label_idx),
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Date": 1742428800000,
///     "Text": "RT @user: ...",
///     "text_clean": "tolak revisi uu tni",
///     "sentimen": "negatif"
///   },
///   ...
/// ]
/// ```
///
/// Numeric timestamps are epoch milliseconds, the pandas default.
pub(crate) fn read_json(
    text: &str,
    path: &Path,
    columns: &ColumnNames,
) -> Result<Vec<Record>, LoadError> {
    let root: JsonValue = serde_json::from_str(text).map_err(|e| LoadError::malformed(path, e))?;
    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::malformed(path, "expected top-level JSON array"))?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| LoadError::malformed(path, format!("row {} is not a JSON object", i + 1)))?;

        let cell = |name: &str| {
            obj.get(name)
                .ok_or_else(|| LoadError::schema(path, SchemaError::MissingColumn(name.to_string())))
        };

        let timestamp = json_timestamp(cell(&columns.timestamp)?, i + 1, path)?;
        records.push(Record {
            timestamp,
            text: json_to_text(cell(&columns.text)?),
            text_clean: json_to_text(cell(&columns.text_clean)?),
            label: json_to_text(cell(&columns.label)?),
        });
    }

    Ok(records)
}

fn json_timestamp(val: &JsonValue, row: usize, path: &Path) -> Result<NaiveDateTime, LoadError> {
    match val {
        JsonValue::String(s) => timestamp_or_err(s, row, path),
        JsonValue::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| {
                LoadError::schema(
                    path,
                    SchemaError::UnparseableTimestamp {
                        row,
                        value: n.to_string(),
                    },
                )
            }),
        other => Err(LoadError::schema(
            path,
            SchemaError::UnparseableTimestamp {
                row,
                value: other.to_string(),
            },
        )),
    }
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of labelled tweets.
///
/// Text and label columns may be any type Arrow can cast to `Utf8`. The
/// timestamp column may be a string, `Date32`/`Date64` or `Timestamp`;
/// zoned timestamps are read as UTC.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path, columns: &ColumnNames) -> Result<Vec<Record>, LoadError> {
    let file = open(path)?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| LoadError::malformed(path, e))?;
    let reader = builder.build().map_err(|e| LoadError::malformed(path, e))?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(|e| LoadError::malformed(path, e))?;
        let schema = batch.schema();
        let row_offset = records.len() + 1;

        let column = |name: &str| -> Result<ArrayRef, LoadError> {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx).clone())
                .map_err(|_| LoadError::schema(path, SchemaError::MissingColumn(name.to_string())))
        };

        let timestamps = timestamp_column(&column(&columns.timestamp)?, &columns.timestamp, path)?;
        let text = utf8_column(&column(&columns.text)?, &columns.text, path)?;
        let text_clean = utf8_column(&column(&columns.text_clean)?, &columns.text_clean, path)?;
        let labels = utf8_column(&column(&columns.label)?, &columns.label, path)?;

        for row in 0..batch.num_rows() {
            let timestamp = match &timestamps {
                TimestampSource::Parsed(values) => values[row].ok_or_else(|| {
                    LoadError::schema(
                        path,
                        SchemaError::UnparseableTimestamp {
                            row: row_offset + row,
                            value: "null".to_string(),
                        },
                    )
                })?,
                TimestampSource::Text(values) => {
                    timestamp_or_err(values[row].as_deref().unwrap_or(""), row_offset + row, path)?
                }
            };
            records.push(Record {
                timestamp,
                text: text[row].clone().unwrap_or_default(),
                text_clean: text_clean[row].clone().unwrap_or_default(),
                label: labels[row].clone().unwrap_or_default(),
            });
        }
    }

    Ok(records)
}

// -- Arrow helpers --

enum TimestampSource {
    Parsed(Vec<Option<NaiveDateTime>>),
    Text(Vec<Option<String>>),
}

fn timestamp_column(col: &ArrayRef, name: &str, path: &Path) -> Result<TimestampSource, LoadError> {
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            Ok(TimestampSource::Text(utf8_column(col, name, path)?))
        }
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            let millis = cast(col, &DataType::Timestamp(TimeUnit::Millisecond, None))
                .map_err(|e| LoadError::malformed(path, e))?;
            let arr = millis.as_primitive::<TimestampMillisecondType>();
            Ok(TimestampSource::Parsed(
                (0..arr.len())
                    .map(|i| if arr.is_null(i) { None } else { arr.value_as_datetime(i) })
                    .collect(),
            ))
        }
        other => Err(unsupported(name, other, path)),
    }
}

fn utf8_column(col: &ArrayRef, name: &str, path: &Path) -> Result<Vec<Option<String>>, LoadError> {
    let strings = cast(col, &DataType::Utf8).map_err(|_| unsupported(name, col.data_type(), path))?;
    let arr = strings.as_string::<i32>();
    Ok(arr.iter().map(|v| v.map(str::to_string)).collect())
}

fn unsupported(name: &str, data_type: &DataType, path: &Path) -> LoadError {
    LoadError::schema(
        path,
        SchemaError::UnsupportedColumnType {
            column: name.to_string(),
            data_type: format!("{data_type:?}"),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::sync::Arc;

    use arrow::array::{StringArray, TimestampNanosecondArray};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::tempdir;

    const CSV: &str = "\
Date,Text,text_clean,sentimen,username
2025-03-20 08:15:00+07:00,RT Tolak RUU TNI!,tolak ruu tni,negatif,a
2025-03-20,Dukung revisi,dukung revisi,positif,b
2025-03-21T23:59:59,Biasa saja,,netral,c
";

    fn path() -> PathBuf {
        PathBuf::from("tweets.csv")
    }

    #[test]
    fn csv_loads_records_in_file_order() {
        let records = read_csv(CSV.as_bytes(), &path(), &ColumnNames::default()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].label, "negatif");
        assert_eq!(records[0].date(), NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(records[0].timestamp.format("%H:%M").to_string(), "08:15");
        assert_eq!(records[1].text, "Dukung revisi");
        assert_eq!(records[2].text_clean, "");
        assert_eq!(records[2].date(), NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
    }

    #[test]
    fn csv_without_label_column_is_schema_error() {
        let csv = "Date,Text,text_clean\n2025-03-20,a,a\n";
        let err = read_csv(csv.as_bytes(), &path(), &ColumnNames::default()).unwrap_err();
        match err {
            LoadError::Schema { source, .. } => {
                assert_eq!(source, SchemaError::MissingColumn("sentimen".to_string()))
            }
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn unparseable_timestamp_names_the_row() {
        let csv = "Date,Text,text_clean,sentimen\n2025-03-20,a,a,positif\nkemarin,b,b,negatif\n";
        let err = read_csv(csv.as_bytes(), &path(), &ColumnNames::default()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Schema {
                source: SchemaError::UnparseableTimestamp { row: 2, .. },
                ..
            }
        ));
        assert!(err.to_string().contains("row 2: cannot parse timestamp 'kemarin'"));
    }

    #[test]
    fn missing_file_is_reported_before_parsing() {
        let err = load_dataset(Path::new("no/such/tweets.csv"), &ColumnNames::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingFile { .. }));
        assert!(err.to_string().contains("no/such/tweets.csv"));
    }

    #[test]
    fn json_records_accept_epoch_millis_and_nulls() {
        let json = r#"[
            {"Date": 1742428800000, "Text": "a", "text_clean": null, "sentimen": "positif"},
            {"Date": "2025-03-21", "Text": "b", "text_clean": "b", "sentimen": "negatif"}
        ]"#;
        let records = read_json(json, Path::new("t.json"), &ColumnNames::default()).unwrap();
        assert_eq!(records[0].date(), NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(records[0].text_clean, "");
        assert_eq!(records[1].label, "negatif");
    }

    #[test]
    fn json_row_without_column_is_schema_error() {
        let json = r#"[{"Date": "2025-03-21", "Text": "b", "text_clean": "b"}]"#;
        let err = read_json(json, Path::new("t.json"), &ColumnNames::default()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Schema {
                source: SchemaError::MissingColumn(_),
                ..
            }
        ));
    }

    #[test]
    fn custom_column_names_are_honoured() {
        let columns = ColumnNames {
            timestamp: "created_at".to_string(),
            text: "tweet".to_string(),
            text_clean: "clean".to_string(),
            label: "sentiment".to_string(),
        };
        let csv = "created_at,tweet,clean,sentiment\n2025-01-05,x,x,neutral\n";
        let records = read_csv(csv.as_bytes(), &path(), &columns).unwrap();
        assert_eq!(records[0].label, "neutral");
    }

    #[test]
    fn timestamp_formats() {
        for raw in [
            "2025-03-20T10:00:00Z",
            "2025-03-20 10:00:00.123",
            "2025-03-20 10:00",
            "2025-03-20",
        ] {
            let parsed = parse_timestamp(raw).unwrap();
            assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(), "{raw}");
        }
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("20/03/2025").is_none());
    }

    fn write_parquet(path: &Path, columns: Vec<(&str, ArrayRef)>) {
        let batch = RecordBatch::try_from_iter(columns).unwrap();
        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    fn utc_nanos(y: i32, m: u32, d: u32, h: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_nanos_opt()
            .unwrap()
    }

    #[test]
    fn parquet_with_zoned_timestamps_and_null_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tweets.parquet");
        let dates = TimestampNanosecondArray::from(vec![
            utc_nanos(2025, 3, 20, 1),
            utc_nanos(2025, 3, 21, 23),
        ])
        .with_timezone("UTC");
        write_parquet(
            &path,
            vec![
                ("Date", Arc::new(dates) as ArrayRef),
                ("Text", Arc::new(StringArray::from(vec![Some("Tolak!"), None])) as ArrayRef),
                ("text_clean", Arc::new(StringArray::from(vec!["tolak", "dukung"])) as ArrayRef),
                ("sentimen", Arc::new(StringArray::from(vec!["negatif", "positif"])) as ArrayRef),
            ],
        );

        let ds = load_dataset(&path, &ColumnNames::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].date(), NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(ds.records[0].timestamp.format("%H:%M").to_string(), "01:00");
        assert_eq!(ds.records[0].text, "Tolak!");
        assert_eq!(ds.records[1].date(), NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
        assert_eq!(ds.records[1].text, "");
        assert_eq!(ds.labels, vec!["negatif".to_string(), "positif".to_string()]);
    }

    #[test]
    fn parquet_with_string_dates_loads_through_pq_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tweets.pq");
        write_parquet(
            &path,
            vec![
                ("Date", Arc::new(StringArray::from(vec!["2025-03-20 08:15:00"])) as ArrayRef),
                ("Text", Arc::new(StringArray::from(vec!["a"])) as ArrayRef),
                ("text_clean", Arc::new(StringArray::from(vec!["a"])) as ArrayRef),
                ("sentimen", Arc::new(StringArray::from(vec!["netral"])) as ArrayRef),
            ],
        );

        let ds = load_dataset(&path, &ColumnNames::default()).unwrap();
        assert_eq!(ds.records[0].label, "netral");
        assert_eq!(ds.records[0].timestamp.format("%H:%M").to_string(), "08:15");
    }

    #[test]
    fn parquet_without_label_column_is_schema_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tweets.parquet");
        write_parquet(
            &path,
            vec![
                ("Date", Arc::new(StringArray::from(vec!["2025-03-20"])) as ArrayRef),
                ("Text", Arc::new(StringArray::from(vec!["a"])) as ArrayRef),
                ("text_clean", Arc::new(StringArray::from(vec!["a"])) as ArrayRef),
            ],
        );

        let err = load_dataset(&path, &ColumnNames::default()).unwrap_err();
        match err {
            LoadError::Schema { source, .. } => {
                assert_eq!(source, SchemaError::MissingColumn("sentimen".to_string()))
            }
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tweets.txt");
        std::fs::write(&path, CSV).unwrap();

        let err = load_dataset(&path, &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
        assert!(err.to_string().contains("unsupported file extension: .txt"));
    }

    #[test]
    fn header_only_csv_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tweets.CSV");
        std::fs::write(&path, "Date,Text,text_clean,sentimen\n").unwrap();

        let err = load_dataset(&path, &ColumnNames::default()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Schema {
                source: SchemaError::Empty,
                ..
            }
        ));
    }
}
