use std::collections::BTreeMap;
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize};

use crate::data::loader::{LoadError, SchemaError};

// ---------------------------------------------------------------------------
// Pre-trained artifacts
// ---------------------------------------------------------------------------

/// Multinomial Naive Bayes parameters, as exported from scikit-learn.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NaiveBayesModel {
    pub classes: Vec<String>,
    /// Log prior per class, aligned with `classes`.
    pub class_log_prior: Vec<f64>,
    /// `[class][feature]` log probabilities.
    pub feature_log_prob: Vec<Vec<f64>>,
}

impl NaiveBayesModel {
    pub fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("classifier has no classes".to_string());
        }
        if self.class_log_prior.len() != self.classes.len() {
            return Err(format!(
                "{} classes but {} priors",
                self.classes.len(),
                self.class_log_prior.len()
            ));
        }
        if self.feature_log_prob.len() != self.classes.len() {
            return Err(format!(
                "{} classes but {} feature rows",
                self.classes.len(),
                self.feature_log_prob.len()
            ));
        }
        let width = self.n_features();
        if let Some(row) = self.feature_log_prob.iter().position(|r| r.len() != width) {
            return Err(format!("feature row {row} is ragged"));
        }
        Ok(())
    }
}

/// TF-IDF vocabulary and inverse document frequencies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TfidfVectorizer {
    /// term → feature column
    pub vocabulary: BTreeMap<String, usize>,
    pub idf: Vec<f64>,
}

impl TfidfVectorizer {
    fn validate(&self) -> Result<(), String> {
        match self.vocabulary.iter().find(|(_, col)| **col >= self.idf.len()) {
            Some((term, col)) => Err(format!(
                "term '{term}' maps to column {col} but idf has {} entries",
                self.idf.len()
            )),
            None => Ok(()),
        }
    }
}

/// Classifier and vectorizer loaded at startup. They are held for the
/// session but no dashboard view applies them; labels come precomputed
/// in the dataset.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub model: NaiveBayesModel,
    pub vectorizer: TfidfVectorizer,
}

impl ModelArtifacts {
    pub fn load(model_path: &Path, vectorizer_path: &Path) -> Result<Self, LoadError> {
        let model: NaiveBayesModel = read_artifact(model_path)?;
        model
            .validate()
            .map_err(|msg| inconsistent(model_path, msg))?;

        let vectorizer: TfidfVectorizer = read_artifact(vectorizer_path)?;
        vectorizer
            .validate()
            .map_err(|msg| inconsistent(vectorizer_path, msg))?;

        let artifacts = Self::from_parts(model, vectorizer)
            .map_err(|msg| inconsistent(vectorizer_path, msg))?;
        log::info!("Loaded model artifacts: {}", artifacts.describe());
        Ok(artifacts)
    }

    /// Pair a model with a vectorizer, checking their feature spaces agree.
    pub fn from_parts(model: NaiveBayesModel, vectorizer: TfidfVectorizer) -> Result<Self, String> {
        if model.n_features() != vectorizer.idf.len() {
            return Err(format!(
                "classifier expects {} features, vectorizer produces {}",
                model.n_features(),
                vectorizer.idf.len()
            ));
        }
        Ok(Self { model, vectorizer })
    }

    /// One-line summary for the top bar.
    pub fn describe(&self) -> String {
        format!(
            "Naive Bayes, {} classes [{}], {} TF-IDF terms",
            self.model.classes.len(),
            self.model.classes.join(", "),
            self.vectorizer.vocabulary.len()
        )
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => LoadError::malformed(path, e),
    })?;
    serde_json::from_str(&text).map_err(|e| LoadError::malformed(path, e))
}

fn inconsistent(path: &Path, msg: String) -> LoadError {
    LoadError::schema(path, SchemaError::InconsistentArtifact(msg))
}
