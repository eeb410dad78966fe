//! Hyperparameters for vectorization, model fitting and evaluation.
//!
//! ```
//! use pelta::ml::config::PipelineConfig;
//!
//! let config: PipelineConfig =
//!     serde_json::from_str(r#"{"vectorizer": {"max_features": 100}}"#).unwrap();
//! assert_eq!(config.vectorizer.max_features, 100);
//! assert_eq!(config.vectorizer.min_df, 2);
//! assert_eq!(config.logistic.max_iter, 1000);
//! config.validate().unwrap();
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PeltaError, Result};

/// TF-IDF vocabulary settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Maximum vocabulary size; the most frequent terms are kept.
    pub max_features: usize,
    /// Inclusive range of n-gram lengths.
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in.
    pub max_df: f64,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            ngram_range: (1, 2),
            min_df: 2,
            max_df: 0.95,
        }
    }
}

/// Logistic regression settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticConfig {
    /// Inverse L2 regularization strength.
    pub c: f64,
    pub max_iter: usize,
    /// Stop when every gradient component is below this value.
    pub tolerance: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tolerance: 1e-4,
        }
    }
}

/// Train/test split settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Fraction of each class held out for evaluation.
    pub test_size: f64,
    pub random_state: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            random_state: 42,
        }
    }
}

/// All pipeline settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub vectorizer: VectorizerConfig,
    pub logistic: LogisticConfig,
    pub training: TrainingConfig,
}

impl PipelineConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PeltaError::invalid_config(format!("Cannot read {}: {e}", path.display()))
        })?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        let v = &self.vectorizer;
        if v.max_features == 0 {
            return Err(PeltaError::invalid_config("max_features must be positive"));
        }
        if v.ngram_range.0 == 0 || v.ngram_range.0 > v.ngram_range.1 {
            return Err(PeltaError::invalid_config(format!(
                "Invalid ngram_range ({}, {})",
                v.ngram_range.0, v.ngram_range.1
            )));
        }
        if !(v.max_df > 0.0 && v.max_df <= 1.0) {
            return Err(PeltaError::invalid_config("max_df must be in (0, 1]"));
        }

        let l = &self.logistic;
        if !(l.c > 0.0 && l.c.is_finite()) {
            return Err(PeltaError::invalid_config("C must be a positive number"));
        }
        if l.max_iter == 0 {
            return Err(PeltaError::invalid_config("max_iter must be positive"));
        }
        if !(l.tolerance > 0.0) {
            return Err(PeltaError::invalid_config("tolerance must be positive"));
        }

        let t = &self.training;
        if !(t.test_size > 0.0 && t.test_size < 1.0) {
            return Err(PeltaError::invalid_config("test_size must be in (0, 1)"));
        }

        Ok(())
    }
}
