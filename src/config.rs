use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional overrides file, read from the working directory at startup.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup configuration. Every field has a default so `dashboard.json` may
/// override any subset of it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Labelled tweet dataset (`.csv`, `.json` or `.parquet`).
    pub data_path: PathBuf,
    /// Serialized Naive Bayes classifier.
    pub model_path: PathBuf,
    /// Serialized TF-IDF vectorizer.
    pub vectorizer_path: PathBuf,
    pub columns: ColumnNames,
    /// Upper bound on rows in the random sample table.
    pub sample_size: usize,
    pub word_cloud: WordCloudSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/data_analisis_final.csv"),
            model_path: PathBuf::from("model/model_naive_bayes_sentimen.json"),
            vectorizer_path: PathBuf::from("model/tfidf_vectorizer.json"),
            columns: ColumnNames::default(),
            sample_size: 5,
            word_cloud: WordCloudSettings::default(),
        }
    }
}

impl DashboardConfig {
    /// Read overrides from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No {} found, using default configuration", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(text)?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Names of the four required dataset columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub timestamp: String,
    pub text: String,
    pub text_clean: String,
    pub label: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            timestamp: "Date".to_string(),
            text: "Text".to_string(),
            text_clean: "text_clean".to_string(),
            label: "sentimen".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Word cloud settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WordCloudSettings {
    /// Canvas size in logical pixels before scaling to the panel width.
    pub width: f32,
    pub height: f32,
    pub max_words: usize,
    pub min_font_size: f32,
    pub max_font_size: f32,
}

impl Default for WordCloudSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            max_words: 200,
            min_font_size: 10.0,
            max_font_size: 72.0,
        }
    }
}
