//! Stateful inference service.
//!
//! [`NewsClassifierService`] owns the currently active [`ModelArtifact`]
//! behind an `RwLock<Option<Arc<_>>>`. Training builds and persists a new
//! artifact first and only then swaps the reference, so a concurrent
//! prediction sees either the old artifact or the new one, never a mix.
//! Training runs are serialized by a separate mutex.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use pelta::ml::service::NewsClassifierService;
//! use pelta::ml::store::MemoryModelStore;
//! use pelta::ml::types::Label;
//!
//! let service = NewsClassifierService::with_store(Arc::new(MemoryModelStore::new())).unwrap();
//! assert!(!service.health().ready);
//!
//! service.train(false).unwrap();
//! let result = service.predict("   ").unwrap();
//! assert_eq!(result.label, Label::Real);
//! assert_eq!(result.confidence, 0.5);
//! ```

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::normalizer::Normalizer;
use crate::error::{PeltaError, Result};
use crate::ml::artifact::{ArtifactMetadata, ModelArtifact};
use crate::ml::config::PipelineConfig;
use crate::ml::corpus::default_corpus;
use crate::ml::metrics::Metrics;
use crate::ml::store::{FileModelStore, ModelStore};
use crate::ml::trainer::Trainer;
use crate::ml::types::{Article, Classification, LabeledExample, PredictionResult};

/// What [`NewsClassifierService::describe`] reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModelDescription {
    /// Metadata of the active artifact.
    Available(ArtifactMetadata),
    /// No artifact is loaded or trained.
    Unavailable,
}

impl ModelDescription {
    pub fn metadata(&self) -> Option<&ArtifactMetadata> {
        match self {
            ModelDescription::Available(metadata) => Some(metadata),
            ModelDescription::Unavailable => None,
        }
    }
}

/// Readiness report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub ready: bool,
    pub artifact_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
}

/// How [`NewsClassifierService::bootstrap`] obtained its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapOutcome {
    Loaded,
    Trained,
}

/// Classification service over an atomically replaceable model.
pub struct NewsClassifierService {
    normalizer: Normalizer,
    trainer: Trainer,
    store: Arc<dyn ModelStore>,
    corpus: Vec<LabeledExample>,
    active: RwLock<Option<Arc<ModelArtifact>>>,
    training: Mutex<()>,
}

impl NewsClassifierService {
    /// Create a service with no active model.
    pub fn new(config: PipelineConfig, normalizer: Normalizer, store: Arc<dyn ModelStore>) -> Self {
        NewsClassifierService {
            trainer: Trainer::new(config, normalizer.clone()),
            normalizer,
            store,
            corpus: default_corpus(),
            active: RwLock::new(None),
            training: Mutex::new(()),
        }
    }

    /// Create a service with default settings and the news normalizer.
    pub fn with_store(store: Arc<dyn ModelStore>) -> Result<Self> {
        Ok(Self::new(PipelineConfig::default(), Normalizer::news()?, store))
    }

    /// Create a service persisting to a model file.
    pub fn from_path<P: AsRef<Path>>(path: P, config: PipelineConfig) -> Result<Self> {
        Ok(Self::new(
            config,
            Normalizer::news()?,
            Arc::new(FileModelStore::new(path)),
        ))
    }

    /// Replace the corpus used by [`train`](Self::train).
    pub fn with_corpus(mut self, corpus: Vec<LabeledExample>) -> Self {
        self.corpus = corpus;
        self
    }

    /// Load the persisted artifact if there is one, otherwise train on the
    /// configured corpus and persist the result.
    pub fn bootstrap(&self) -> Result<BootstrapOutcome> {
        if self.store.exists() {
            info!("Loading existing model");
            self.load()?;
            Ok(BootstrapOutcome::Loaded)
        } else {
            info!("No existing model found, training a new one");
            self.train(true)?;
            Ok(BootstrapOutcome::Trained)
        }
    }

    /// Load the persisted artifact and make it active.
    pub fn load(&self) -> Result<()> {
        let artifact = self.store.load()?;
        self.install(artifact)
    }

    /// Make an artifact active without persisting it.
    ///
    /// Fails with `IncompatibleArtifact` if the artifact was trained with a
    /// different normalizer.
    pub fn install(&self, artifact: ModelArtifact) -> Result<()> {
        let expected = self.normalizer.signature();
        let found = &artifact.metadata().normalizer_signature;
        if *found != expected {
            return Err(PeltaError::incompatible(format!(
                "Artifact was trained with normalizer '{found}', service uses '{expected}'"
            )));
        }

        let artifact_id = artifact.metadata().artifact_id;
        *self.active.write() = Some(Arc::new(artifact));
        info!("Activated model {artifact_id}");
        Ok(())
    }

    /// Train on the configured corpus.
    ///
    /// When `retrain` is false and a model is already active, its metrics are
    /// returned and nothing is trained. The check runs under the training
    /// lock, so concurrent calls on a cold service train once.
    pub fn train(&self, retrain: bool) -> Result<Metrics> {
        let _guard = self.training.lock();

        if !retrain {
            if let Some(artifact) = self.active.read().as_ref() {
                info!(
                    "Model {} already active, skipping training",
                    artifact.metadata().artifact_id
                );
                return Ok(artifact.metrics().clone());
            }
        }
        self.train_locked(&self.corpus)
    }

    /// Train on the given corpus, persist the artifact and activate it.
    ///
    /// On failure the previously active artifact stays in place.
    pub fn train_on(&self, corpus: &[LabeledExample]) -> Result<Metrics> {
        let _guard = self.training.lock();
        self.train_locked(corpus)
    }

    // Caller holds `self.training`.
    fn train_locked(&self, corpus: &[LabeledExample]) -> Result<Metrics> {
        let artifact = self.trainer.train(corpus)?;
        self.store.save(&artifact)?;

        let metrics = artifact.metrics().clone();
        let artifact_id = artifact.metadata().artifact_id;
        *self.active.write() = Some(Arc::new(artifact));
        info!("Activated model {artifact_id}");
        Ok(metrics)
    }

    /// The active artifact.
    pub fn current(&self) -> Result<Arc<ModelArtifact>> {
        self.active
            .read()
            .clone()
            .ok_or_else(|| PeltaError::model_not_ready("No model loaded or trained"))
    }

    pub fn is_ready(&self) -> bool {
        self.active.read().is_some()
    }

    /// Classify a single text.
    pub fn predict(&self, text: &str) -> Result<PredictionResult> {
        let artifact = self.current()?;
        artifact.predict_tokens(&self.normalizer.normalize(text))
    }

    /// Classify many texts against one snapshot of the active model.
    pub fn predict_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<Vec<PredictionResult>> {
        let artifact = self.current()?;
        texts
            .par_iter()
            .map(|text| artifact.predict_tokens(&self.normalizer.normalize(text.as_ref())))
            .collect()
    }

    /// Classify an article given its title and content.
    pub fn classify(&self, title: &str, content: &str) -> Result<Classification> {
        let artifact = self.current()?;
        let text = Article::new(title, content).combined_text();
        let tokens = self.normalizer.normalize(&text);
        let prediction = artifact.predict_tokens(&tokens)?;

        Ok(Classification {
            prediction,
            processed_text_length: tokens.len(),
            timestamp: Utc::now(),
        })
    }

    /// Metadata of the active model.
    pub fn describe(&self) -> ModelDescription {
        match self.active.read().as_ref() {
            Some(artifact) => ModelDescription::Available(artifact.metadata().clone()),
            None => ModelDescription::Unavailable,
        }
    }

    pub fn health(&self) -> Health {
        let artifact_id = self
            .active
            .read()
            .as_ref()
            .map(|artifact| artifact.metadata().artifact_id);
        if artifact_id.is_none() {
            debug!("Health check: no model loaded");
        }

        Health {
            ready: artifact_id.is_some(),
            artifact_id,
            timestamp: Utc::now(),
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn store(&self) -> &Arc<dyn ModelStore> {
        &self.store
    }
}

impl std::fmt::Debug for NewsClassifierService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClassifierService")
            .field("normalizer", &self.normalizer)
            .field("store", &self.store)
            .field("corpus_size", &self.corpus.len())
            .field("ready", &self.is_ready())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::PipelineAnalyzer;
    use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
    use crate::ml::store::MemoryModelStore;
    use crate::ml::store::test_support::small_artifact;
    use crate::ml::types::Label;

    fn service() -> NewsClassifierService {
        NewsClassifierService::with_store(Arc::new(MemoryModelStore::new())).unwrap()
    }

    #[test]
    fn test_not_ready() {
        let service = service();

        assert!(matches!(
            service.predict("anything"),
            Err(PeltaError::ModelNotReady(_))
        ));
        assert!(matches!(
            service.classify("a", "b"),
            Err(PeltaError::ModelNotReady(_))
        ));
        assert_eq!(service.describe(), ModelDescription::Unavailable);
        assert!(!service.health().ready);
        assert!(matches!(service.load(), Err(PeltaError::NotFound(_))));
    }

    #[test]
    fn test_bootstrap_trains_then_loads() {
        let store: Arc<dyn ModelStore> = Arc::new(MemoryModelStore::new());
        let first = NewsClassifierService::with_store(store.clone()).unwrap();
        assert_eq!(first.bootstrap().unwrap(), BootstrapOutcome::Trained);
        let trained_id = first.health().artifact_id;

        let second = NewsClassifierService::with_store(store).unwrap();
        assert_eq!(second.bootstrap().unwrap(), BootstrapOutcome::Loaded);
        assert_eq!(second.health().artifact_id, trained_id);
    }

    #[test]
    fn test_train_flag() {
        let service = service();
        service.train(false).unwrap();
        let first = service.health().artifact_id;

        service.train(false).unwrap();
        assert_eq!(service.health().artifact_id, first);

        service.train(true).unwrap();
        assert_ne!(service.health().artifact_id, first);
    }

    #[test]
    fn test_concurrent_cold_training_runs_once() {
        let store = Arc::new(MemoryModelStore::new());
        let service = NewsClassifierService::with_store(store.clone()).unwrap();

        let ids: Vec<Uuid> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    scope.spawn(|| {
                        service.train(false).unwrap();
                        service.health().artifact_id.unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(ids[0], ids[1]);
        assert_eq!(store.load().unwrap().metadata().artifact_id, ids[0]);
    }

    #[test]
    fn test_failed_training_keeps_active_model() {
        let service = service();
        service.train(true).unwrap();
        let before = service.health().artifact_id;

        let bad = vec![LabeledExample::new("miracle cure", Label::Fake)];
        assert!(matches!(service.train_on(&bad), Err(PeltaError::Data(_))));
        assert_eq!(service.health().artifact_id, before);
    }

    #[test]
    fn test_empty_input_is_neutral() {
        let service = service();
        service.train(true).unwrap();

        for text in ["", "   ", "!!! 123 ???", "the and of"] {
            assert_eq!(service.predict(text).unwrap(), PredictionResult::neutral());
        }

        let classification = service.classify("", "").unwrap();
        assert_eq!(classification.prediction, PredictionResult::neutral());
        assert_eq!(classification.processed_text_length, 0);
    }

    #[test]
    fn test_predictions_are_consistent() {
        let service = service();
        service.train(true).unwrap();

        let texts = ["Miracle cure discovered by local man", "Council reports budget"];
        let batch = service.predict_batch(&texts).unwrap();
        for (text, result) in texts.iter().zip(&batch) {
            assert_eq!(service.predict(text).unwrap(), *result);
            assert!((result.probability_fake + result.probability_real - 1.0).abs() < 1e-6);
            assert_eq!(
                result.confidence,
                result.probability_fake.max(result.probability_real)
            );
        }

        let classification = service.classify("Council", "reports budget").unwrap();
        assert_eq!(classification.processed_text_length, 3);
    }

    #[test]
    fn test_install_rejects_other_normalizer() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new())).with_name("plain");
        let service = NewsClassifierService::new(
            PipelineConfig::default(),
            Normalizer::new(Arc::new(analyzer)),
            Arc::new(MemoryModelStore::new()),
        );

        assert!(matches!(
            service.install(small_artifact()),
            Err(PeltaError::IncompatibleArtifact(_))
        ));
        assert!(!service.is_ready());
    }

    #[test]
    fn test_describe_serialization() {
        let service = service();
        let value = serde_json::to_value(service.describe()).unwrap();
        assert_eq!(value["status"], "unavailable");

        service.train(true).unwrap();
        let value = serde_json::to_value(service.describe()).unwrap();
        assert_eq!(value["status"], "available");
        assert_eq!(value["model_kind"], "Logistic Regression with TF-IDF");
        assert!(value["metrics"]["test_accuracy"].is_number());
    }
}
