//! Char filter implementations for text normalization.
//!
//! Char filters rewrite the raw string before it reaches the tokenizer. They
//! run in the order they were added to a pipeline, so later filters see the
//! output of earlier ones.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Lowercases the whole input
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement,
//!   with presets for URLs, email addresses, HTML tags, non-alphabetic
//!   characters and whitespace runs
//!
//! # Examples
//!
//! ```
//! use pelta::analysis::char_filter::CharFilter;
//! use pelta::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::urls().unwrap();
//! assert_eq!(filter.filter("see https://x.io now"), "see  now");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the rewritten text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;
