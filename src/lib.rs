//! # Pelta
//!
//! A fake/real news classifier built on a text analysis pipeline, TF-IDF
//! features and logistic regression.
//!
//! ## Features
//!
//! - Deterministic text normalization (URL/email/markup stripping, stop words, lemmas)
//! - Unigram + bigram TF-IDF vectorization
//! - L2-regularized logistic regression with calibrated probabilities
//! - Stratified evaluation with a full classification report
//! - Checksummed, atomically replaced model artifacts
//! - A thread-safe service with hot model swapping

pub mod analysis;
pub mod cli;
pub mod error;
pub mod ml;

pub mod prelude {
    pub use crate::analysis::normalizer::Normalizer;
    pub use crate::error::{PeltaError, Result};
    pub use crate::ml::service::NewsClassifierService;
    pub use crate::ml::store::{FileModelStore, MemoryModelStore, ModelStore};
    pub use crate::ml::{Label, LabeledExample, PredictionResult};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
