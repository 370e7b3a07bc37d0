use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const DATA_PATH: &str = "data/data_analisis_final.csv";
const MODEL_PATH: &str = "model/model_naive_bayes_sentimen.json";
const VECTORIZER_PATH: &str = "model/tfidf_vectorizer.json";

const N_TWEETS: usize = 600;
const N_DAYS: i64 = 31;

/// Cleaned-text vocabulary per label. Shared words appear in every label.
const SHARED: &[&str] = &["revisi", "uu", "tni", "dpr", "militer", "rakyat", "pemerintah"];
const WORDS: &[(&str, &[&str])] = &[
    ("negatif", &["tolak", "dwifungsi", "bahaya", "demokrasi", "mundur", "cabut", "protes"]),
    ("netral", &["rapat", "pembahasan", "sidang", "pasal", "draf", "jadwal", "berita"]),
    ("positif", &["dukung", "setuju", "profesional", "kuat", "modernisasi", "aman", "baik"]),
];
/// Relative share of each label, aligned with `WORDS`.
const WEIGHTS: &[u32] = &[5, 3, 2];

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Text")]
    text: String,
    text_clean: String,
    sentimen: String,
}

#[derive(Serialize)]
struct NaiveBayesArtifact {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

#[derive(Serialize)]
struct VectorizerArtifact {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

fn pick_label(rng: &mut StdRng) -> usize {
    let total: u32 = WEIGHTS.iter().sum();
    let mut roll = rng.random_range(0..total);
    for (i, &w) in WEIGHTS.iter().enumerate() {
        if roll < w {
            return i;
        }
        roll -= w;
    }
    WEIGHTS.len() - 1
}

fn make_row(rng: &mut StdRng, start: NaiveDate) -> Row {
    let label_idx = pick_label(rng);
    let (label, own_words) = WORDS[label_idx];

    let n_words = rng.random_range(4..10);
    let words: Vec<&str> = (0..n_words)
        .map(|_| {
            if rng.random_bool(0.6) {
                own_words[rng.random_range(0..own_words.len())]
            } else {
                SHARED[rng.random_range(0..SHARED.len())]
            }
        })
        .collect();
    let text_clean = words.join(" ");

    let day = start + Duration::days(rng.random_range(0..N_DAYS));
    let seconds = rng.random_range(0..86_400);
    let timestamp = day
        .and_hms_opt(0, 0, 0)
        .map(|t| t + Duration::seconds(seconds))
        .unwrap_or_default();

    Row {
        date: timestamp.format("%Y-%m-%d %H:%M:%S+00:00").to_string(),
        text: format!("RT @warga{}: {}! #RUUTNI", rng.random_range(1..500), text_clean.to_uppercase()),
        text_clean,
        sentimen: label.to_string(),
    }
}

fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).with_context(|| format!("writing {path}"))
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let start = NaiveDate::from_ymd_opt(2025, 3, 1).context("invalid start date")?;

    for dir in ["data", "model"] {
        fs::create_dir_all(dir).with_context(|| format!("creating {dir}/"))?;
    }

    // Dataset
    let rows: Vec<Row> = (0..N_TWEETS).map(|_| make_row(&mut rng, start)).collect();
    let mut writer = csv::Writer::from_path(DATA_PATH).with_context(|| format!("creating {DATA_PATH}"))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    // Artifacts: a consistent, untrained placeholder over the generated vocabulary.
    let terms: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.text_clean.split_whitespace())
        .collect();
    let vocabulary: BTreeMap<String, usize> = terms
        .iter()
        .enumerate()
        .map(|(i, t)| (t.to_string(), i))
        .collect();
    let n_features = vocabulary.len();
    let classes: Vec<String> = WORDS.iter().map(|(label, _)| label.to_string()).collect();
    let uniform_class = -(classes.len() as f64).ln();
    let uniform_feature = -(n_features as f64).ln();

    write_json(
        MODEL_PATH,
        &NaiveBayesArtifact {
            class_log_prior: vec![uniform_class; classes.len()],
            feature_log_prob: vec![vec![uniform_feature; n_features]; classes.len()],
            classes,
        },
    )?;
    write_json(
        VECTORIZER_PATH,
        &VectorizerArtifact {
            vocabulary,
            idf: vec![1.0; n_features],
        },
    )?;

    println!(
        "Wrote {} tweets to {DATA_PATH} and a {}-term model to {}",
        rows.len(),
        n_features,
        Path::new(MODEL_PATH).display()
    );
    Ok(())
}
