//! Training orchestration.
//!
//! ```text
//! corpus → normalize (parallel) → drop empty → stratified split
//!        → fit TF-IDF on train only → fit logistic regression
//!        → evaluate train/test → ModelArtifact
//! ```

use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::analysis::normalizer::Normalizer;
use crate::error::{PeltaError, Result};
use crate::ml::artifact::ModelArtifact;
use crate::ml::config::PipelineConfig;
use crate::ml::logistic::LogisticRegression;
use crate::ml::metrics::{ClassificationReport, ConfusionMatrix, Metrics};
use crate::ml::split::stratified_split;
use crate::ml::tfidf::TfIdfVectorizer;
use crate::ml::types::{Label, LabeledExample};

/// Fits a [`ModelArtifact`] from a labeled corpus.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: PipelineConfig,
    normalizer: Normalizer,
}

impl Trainer {
    pub fn new(config: PipelineConfig, normalizer: Normalizer) -> Self {
        Trainer { config, normalizer }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Train a new artifact. Its metrics are available through
    /// [`ModelArtifact::metrics`].
    pub fn train(&self, corpus: &[LabeledExample]) -> Result<ModelArtifact> {
        self.config.validate()?;
        if corpus.len() < 2 {
            return Err(PeltaError::data(format!(
                "Need at least 2 examples to train, got {}",
                corpus.len()
            )));
        }

        let start = Instant::now();
        let normalized: Vec<Vec<String>> = corpus
            .par_iter()
            .map(|example| self.normalizer.normalize(&example.text))
            .collect();

        let (documents, labels): (Vec<Vec<String>>, Vec<Label>) = normalized
            .into_iter()
            .zip(corpus.iter().map(|example| example.label))
            .filter(|(tokens, _)| !tokens.is_empty())
            .unzip();

        let dropped = corpus.len() - documents.len();
        if dropped > 0 {
            info!("Dropped {dropped} examples that normalized to no tokens");
        }
        if documents.len() < 2 {
            return Err(PeltaError::data(format!(
                "Need at least 2 non-empty examples to train, got {}",
                documents.len()
            )));
        }

        let split = stratified_split(
            &labels,
            self.config.training.test_size,
            self.config.training.random_state,
        )?;
        let select = |indices: &[usize]| -> (Vec<Vec<String>>, Vec<Label>) {
            indices
                .iter()
                .map(|&idx| (documents[idx].clone(), labels[idx]))
                .unzip()
        };
        let (train_docs, train_labels) = select(&split.train);
        let (test_docs, test_labels) = select(&split.test);
        debug!(
            "Split {} examples into {} train / {} test",
            documents.len(),
            train_docs.len(),
            test_docs.len()
        );
        if test_docs.is_empty() {
            warn!("Test partition is empty, test accuracy will be reported as 0");
        }

        // The test partition never reaches the vectorizer's fit.
        let mut vectorizer = TfIdfVectorizer::new(self.config.vectorizer.clone());
        let train_features = vectorizer.fit_transform(&train_docs)?;
        let test_features = vectorizer.transform_batch(&test_docs)?;

        let mut classifier = LogisticRegression::new(self.config.logistic.clone());
        classifier.fit(&train_features, &train_labels)?;

        let predict_all = |features: &[Vec<f64>]| -> Result<Vec<Label>> {
            features.iter().map(|x| classifier.predict(x)).collect()
        };
        let train_predictions = predict_all(&train_features)?;
        let test_predictions = predict_all(&test_features)?;

        let train_accuracy =
            ConfusionMatrix::from_predictions(&train_predictions, &train_labels)?.accuracy();
        let report = ClassificationReport::from_predictions(&test_predictions, &test_labels)?;

        let metrics = Metrics {
            train_accuracy,
            test_accuracy: report.accuracy,
            classification_report: report,
            training_samples: train_docs.len(),
            test_samples: test_docs.len(),
            features_count: vectorizer.vocabulary_size(),
        };

        info!(
            "Trained model on {} examples in {:?}: train accuracy {:.4}, test accuracy {:.4}, {} features",
            metrics.training_samples,
            start.elapsed(),
            metrics.train_accuracy,
            metrics.test_accuracy,
            metrics.features_count
        );

        Ok(ModelArtifact::new(
            vectorizer,
            classifier,
            metrics,
            self.normalizer.signature(),
        ))
    }
}
