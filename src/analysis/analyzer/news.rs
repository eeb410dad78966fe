//! Analyzer for news article text.
//!
//! Stages, in order:
//!
//! 1. lowercase
//! 2. strip URLs, then email addresses, then HTML tags
//! 3. strip every character that is not an ASCII letter or whitespace
//! 4. collapse whitespace and trim
//! 5. split on whitespace
//! 6. drop English stop words
//! 7. lemmatize (noun)
//! 8. drop stop words again, since a lemma can be one (`haves` -> `have`)
//! 9. drop tokens shorter than three characters

use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::length::MinLengthFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Minimum length of a token that survives analysis.
pub const MIN_TOKEN_LENGTH: usize = 3;

pub struct NewsAnalyzer {
    inner: PipelineAnalyzer,
}

impl NewsAnalyzer {
    pub fn new() -> Result<Self> {
        let tokenizer = Arc::new(WhitespaceTokenizer::new());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::urls()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::emails()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::html_tags()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::non_alphabetic()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::collapse_whitespace()?))
            .add_filter(Arc::new(StopFilter::default()))
            .add_filter(Arc::new(LemmaFilter::default()))
            .add_filter(Arc::new(StopFilter::default()))
            .add_filter(Arc::new(MinLengthFilter::new(MIN_TOKEN_LENGTH)))
            .with_name("news");

        Ok(Self { inner: analyzer })
    }
}

impl Analyzer for NewsAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "news"
    }

    fn signature(&self) -> String {
        self.inner.signature()
    }
}

impl Debug for NewsAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(analyzer: &NewsAnalyzer, input: &str) -> Vec<String> {
        analyzer
            .analyze(input)
            .unwrap()
            .map(|token| token.text)
            .collect()
    }

    #[test]
    fn test_news_analyzer() {
        let analyzer = NewsAnalyzer::new().unwrap();

        assert_eq!(
            texts(
                &analyzer,
                "Scientists discover COVID-19 vaccine causes mind control via 5G networks!"
            ),
            vec!["scientist", "discover", "covid", "vaccine", "cause", "mind", "control", "via", "network"]
        );
    }

    #[test]
    fn test_strips_urls_emails_and_markup() {
        let analyzer = NewsAnalyzer::new().unwrap();

        assert_eq!(
            texts(
                &analyzer,
                "<p>Visit https://example.com/x or email tips@paper.org for Budget updates</p>"
            ),
            vec!["visit", "email", "budget", "update"]
        );
    }

    #[test]
    fn test_empty_results() {
        let analyzer = NewsAnalyzer::new().unwrap();

        assert!(texts(&analyzer, "").is_empty());
        assert!(texts(&analyzer, "   \n\t ").is_empty());
        assert!(texts(&analyzer, "12345 !!! ???").is_empty());
        assert!(texts(&analyzer, "the and of to").is_empty());
    }

    #[test]
    fn test_lemmas_that_are_stop_words_are_dropped() {
        let analyzer = NewsAnalyzer::new().unwrap();

        assert!(texts(&analyzer, "The haves and beings doings whats hims").is_empty());
        assert_eq!(
            texts(&analyzer, "Ours theirs doings councils"),
            vec!["council"]
        );
    }

    #[test]
    fn test_news_analyzer_name_and_signature() {
        let analyzer = NewsAnalyzer::new().unwrap();

        assert_eq!(analyzer.name(), "news");
        assert_eq!(
            analyzer.signature(),
            "news:char[lowercase,strip_urls,strip_emails,strip_html,strip_non_alpha,collapse_whitespace]\
             |tok[whitespace]|filter[stop(179),lemma(rule_noun),stop(179),min_length(3)]"
        );
    }
}
