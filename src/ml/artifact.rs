//! The fitted vectorizer/classifier pair and its metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::ml::logistic::LogisticRegression;
use crate::ml::metrics::Metrics;
use crate::ml::tfidf::TfIdfVectorizer;
use crate::ml::types::PredictionResult;

/// Model kind recorded in every artifact.
pub const MODEL_KIND: &str = "Logistic Regression with TF-IDF";

/// Version of the artifact layout; bumped on incompatible changes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Metadata describing how and when an artifact was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub artifact_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub model_kind: String,
    pub metrics: Metrics,
    /// Signature of the normalizer that produced the training tokens.
    pub normalizer_signature: String,
    pub format_version: u32,
}

/// A trained model ready for inference.
///
/// Artifacts are immutable; retraining produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    vectorizer: TfIdfVectorizer,
    classifier: LogisticRegression,
    metadata: ArtifactMetadata,
}

impl ModelArtifact {
    /// Bundle fitted components. A fresh id and timestamp are assigned.
    pub fn new(
        vectorizer: TfIdfVectorizer,
        classifier: LogisticRegression,
        metrics: Metrics,
        normalizer_signature: String,
    ) -> Self {
        ModelArtifact {
            vectorizer,
            classifier,
            metadata: ArtifactMetadata {
                artifact_id: Uuid::new_v4(),
                trained_at: Utc::now(),
                model_kind: MODEL_KIND.to_string(),
                metrics,
                normalizer_signature,
                format_version: ARTIFACT_FORMAT_VERSION,
            },
        }
    }

    /// Classify a normalized token sequence.
    ///
    /// An empty sequence yields [`PredictionResult::neutral`] without
    /// consulting the classifier.
    pub fn predict_tokens(&self, tokens: &[String]) -> Result<PredictionResult> {
        if tokens.is_empty() {
            return Ok(PredictionResult::neutral());
        }

        let features = self.vectorizer.transform(tokens)?;
        let (probability_fake, _) = self.classifier.predict_proba(&features)?;
        Ok(PredictionResult::from_probability_fake(probability_fake))
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metadata.metrics
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }
}
