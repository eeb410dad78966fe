//! Core analyzer trait definition.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → … → Filter N → Tokens
//! ```
//!
//! # Examples
//!
//! ```
//! use pelta::analysis::analyzer::analyzer::Analyzer;
//! use pelta::analysis::analyzer::news::NewsAnalyzer;
//!
//! let analyzer = NewsAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("The Cities are GROWING").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "city");
//! assert_eq!(tokens[1].text, "growing");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// A stable description of every stage and its parameters.
    ///
    /// Two analyzers with equal signatures produce equal tokens for equal
    /// input. Model artifacts record the signature of the analyzer that
    /// produced their training features.
    fn signature(&self) -> String;
}
