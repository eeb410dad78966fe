//! Text normalization for classification.
//!
//! [`Normalizer`] turns raw article text into the token sequence fed to the
//! vectorizer. Training and inference must use the same normalizer; its
//! [`signature`](Normalizer::signature) is recorded in every model artifact
//! and checked when one is installed.
//!
//! # Examples
//!
//! ```
//! use pelta::analysis::normalizer::Normalizer;
//!
//! let normalizer = Normalizer::news().unwrap();
//! assert_eq!(
//!     normalizer.normalize("Breaking: Miracle cures found!"),
//!     vec!["breaking", "miracle", "cure", "found"]
//! );
//! assert!(normalizer.normalize("!!! 42 ???").is_empty());
//! ```

use std::sync::Arc;

use log::warn;
use serde_json::Value;

use crate::analysis::analyzer::{Analyzer, NewsAnalyzer};
use crate::error::Result;

/// Deterministic text → token sequence transformation.
#[derive(Clone)]
pub struct Normalizer {
    analyzer: Arc<dyn Analyzer>,
}

impl Normalizer {
    /// Create a normalizer backed by the given analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Normalizer { analyzer }
    }

    /// Create the standard news normalizer.
    pub fn news() -> Result<Self> {
        Ok(Self::new(Arc::new(NewsAnalyzer::new()?)))
    }

    /// Normalize text into tokens. Never fails: analyzer errors yield an
    /// empty sequence.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        match self.analyzer.analyze(text) {
            Ok(tokens) => tokens.map(|token| token.text).collect(),
            Err(e) => {
                warn!("Normalization failed, treating input as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Normalize an arbitrary JSON value. Anything other than a string
    /// normalizes to the empty sequence.
    pub fn normalize_value(&self, value: &Value) -> Vec<String> {
        match value {
            Value::String(text) => self.normalize(text),
            _ => Vec::new(),
        }
    }

    /// Normalize and re-join with single spaces.
    pub fn normalize_to_string(&self, text: &str) -> String {
        self.normalize(text).join(" ")
    }

    /// Signature of the underlying analyzer.
    pub fn signature(&self) -> String {
        self.analyzer.signature()
    }

    /// Name of the underlying analyzer.
    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}
