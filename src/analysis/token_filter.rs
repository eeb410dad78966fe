//! Token filter implementations for token transformation.
//!
//! Filters receive the token stream produced by a tokenizer and return a new
//! stream. They can rewrite tokens, mark them as stopped, or drop them.
//!
//! # Available Filters
//!
//! - [`stop::StopFilter`] - Removes stop words
//! - [`lemma::LemmaFilter`] - Reduces words to their dictionary base form
//! - [`length::MinLengthFilter`] - Drops tokens shorter than a minimum
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Stop Words → Lemmatizer → Min Length → Token Sequence
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// # Examples
///
/// ```
/// use pelta::analysis::token::{Token, TokenStream};
/// use pelta::analysis::token_filter::Filter;
/// use pelta::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.chars().rev().collect();
///                 t
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Describe this filter including its parameters.
    ///
    /// Used to build an analyzer's signature, so two filters that behave
    /// differently must describe themselves differently.
    fn describe(&self) -> String {
        self.name().to_string()
    }
}

pub mod lemma;
pub mod length;
pub mod stop;
