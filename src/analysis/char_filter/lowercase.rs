//! Lowercase char filter.
//!
//! Lowercasing has to happen before the pattern filters run, otherwise a
//! `HTTP://` prefix would slip past the URL pattern.

use super::CharFilter;

/// A char filter that lowercases the entire input.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_char_filter() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("Breaking NEWS"), "breaking news");
        assert_eq!(filter.filter("ÉCOLE"), "école");
        assert_eq!(filter.name(), "lowercase");
    }
}
