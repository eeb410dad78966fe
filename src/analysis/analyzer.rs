//! Analyzer implementations that combine char filters, a tokenizer and token filters.

pub mod analyzer;
pub mod news;
pub mod pipeline;

pub use analyzer::Analyzer;
pub use news::NewsAnalyzer;
pub use pipeline::PipelineAnalyzer;
