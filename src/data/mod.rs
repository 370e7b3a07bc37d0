/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, validate schema → TweetDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ TweetDataset  │  Vec<Record>, label index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date range + label set → visible indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ aggregate / sample │  counts, trend table, random rows
///   └───────────────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
