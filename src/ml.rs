//! Fake/real news classification.
//!
//! ```text
//! LabeledExample ─► Trainer ─► ModelArtifact ─► ModelStore
//!                                    │
//! text ─► Normalizer ─► TfIdfVectorizer ─► LogisticRegression ─► PredictionResult
//! ```
//!
//! [`NewsClassifierService`](service::NewsClassifierService) ties the pieces
//! together and is the entry point for applications.

pub mod artifact;
pub mod config;
pub mod corpus;
pub mod logistic;
pub mod metrics;
pub mod service;
pub mod split;
pub mod store;
pub mod tfidf;
pub mod trainer;
pub mod types;

pub use artifact::{ArtifactMetadata, ModelArtifact};
pub use config::PipelineConfig;
pub use metrics::Metrics;
pub use service::NewsClassifierService;
pub use types::{Article, Classification, Label, LabeledExample, PredictionResult};
