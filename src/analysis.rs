//! Text analysis for news classification.
//!
//! Raw text passes through char filters, a tokenizer and token filters,
//! composed by a [`PipelineAnalyzer`](analyzer::PipelineAnalyzer). The
//! [`Normalizer`](normalizer::Normalizer) wraps an analyzer and is what the
//! rest of the crate talks to.

pub mod analyzer;
pub mod char_filter;
pub mod lemmatizer;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
