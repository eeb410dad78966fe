//! Regex-based char filter with presets for text clean-up.

use regex::Regex;

use super::CharFilter;
use crate::error::{PeltaError, Result};

const URL_PATTERN: &str = r"http\S+|www\S+|https\S+";
const EMAIL_PATTERN: &str = r"\S+@\S+";
const HTML_TAG_PATTERN: &str = r"<.*?>";
const NON_ALPHA_PATTERN: &str = r"[^a-zA-Z\s]";
const WHITESPACE_PATTERN: &str = r"\s+";

/// A char filter that replaces every match of a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
    trim: bool,
    name: &'static str,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Self::named(pattern, replacement, "pattern_replace")
    }

    fn named(pattern: &str, replacement: &str, name: &'static str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| PeltaError::analysis(format!("Invalid regex pattern: {e}")))?,
            replacement: replacement.to_string(),
            trim: false,
            name,
        })
    }

    /// Removes `http…`, `https…` and `www…` runs up to the next whitespace.
    pub fn urls() -> Result<Self> {
        Self::named(URL_PATTERN, "", "strip_urls")
    }

    /// Removes `<nonspace>@<nonspace>` runs.
    pub fn emails() -> Result<Self> {
        Self::named(EMAIL_PATTERN, "", "strip_emails")
    }

    /// Removes `<...>` tag-like substrings (non-greedy, single line).
    pub fn html_tags() -> Result<Self> {
        Self::named(HTML_TAG_PATTERN, "", "strip_html")
    }

    /// Removes everything that is not an ASCII letter or whitespace.
    pub fn non_alphabetic() -> Result<Self> {
        Self::named(NON_ALPHA_PATTERN, "", "strip_non_alpha")
    }

    /// Collapses whitespace runs to one space and trims both ends.
    pub fn collapse_whitespace() -> Result<Self> {
        Ok(Self::named(WHITESPACE_PATTERN, " ", "collapse_whitespace")?.trimmed(true))
    }

    /// Trim the output after replacement.
    pub fn trimmed(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        let replaced = self.pattern.replace_all(input, self.replacement.as_str());
        if self.trim {
            replaced.trim().to_string()
        } else {
            replaced.into_owned()
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"(\d+)", "NUM").unwrap();
        assert_eq!(filter.filter("Year 2024"), "Year NUM");
        assert_eq!(filter.name(), "pattern_replace");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            PatternReplaceCharFilter::new(r"(", ""),
            Err(PeltaError::Analysis(_))
        ));
    }

    #[test]
    fn test_strip_urls() {
        let filter = PatternReplaceCharFilter::urls().unwrap();
        assert_eq!(
            filter.filter("read http://a.b/c and www.site.org/x or https://z"),
            "read  and  or "
        );
    }

    #[test]
    fn test_strip_emails() {
        let filter = PatternReplaceCharFilter::emails().unwrap();
        assert_eq!(filter.filter("mail tips@news.com today"), "mail  today");
    }

    #[test]
    fn test_strip_html() {
        let filter = PatternReplaceCharFilter::html_tags().unwrap();
        assert_eq!(filter.filter("<p>hello <b>world</b></p>"), "hello world");
    }

    #[test]
    fn test_strip_non_alpha_and_collapse() {
        let strip = PatternReplaceCharFilter::non_alphabetic().unwrap();
        let collapse = PatternReplaceCharFilter::collapse_whitespace().unwrap();
        let stripped = strip.filter("  99% of   cases!\n\tsure ");
        assert_eq!(collapse.filter(&stripped), "of cases sure");
    }
}
