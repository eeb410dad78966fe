//! Lemmatizing token filter.

use super::Filter;
use crate::analysis::lemmatizer::{Lemmatizer, RuleLemmatizer};
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Filter that replaces each token with its lemma.
pub struct LemmaFilter {
    /// The lemmatizer to use.
    lemmatizer: Box<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a new lemma filter with the rule-based noun lemmatizer.
    pub fn new() -> Self {
        LemmaFilter {
            lemmatizer: Box::new(RuleLemmatizer::new()),
        }
    }

    /// Create a lemma filter with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Box<dyn Lemmatizer>) -> Self {
        LemmaFilter { lemmatizer }
    }

    /// Name of the wrapped lemmatizer.
    pub fn lemmatizer_name(&self) -> &'static str {
        self.lemmatizer.name()
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let lemma = self.lemmatizer.lemmatize(&token.text);
                    token.with_text(lemma)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }

    fn describe(&self) -> String {
        format!("lemma({})", self.lemmatizer.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    struct UpperLemmatizer;

    impl Lemmatizer for UpperLemmatizer {
        fn lemmatize(&self, word: &str) -> String {
            word.to_uppercase()
        }

        fn name(&self) -> &'static str {
            "upper"
        }
    }

    #[test]
    fn test_lemma_filter() {
        let filter = LemmaFilter::new();
        let tokens = vec![
            Token::new("satellites", 0),
            Token::new("cities", 1),
            Token::new("pictures", 2).stop(),
        ];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "satellite");
        assert_eq!(result[1].text, "city");
        assert_eq!(result[2].text, "pictures"); // Stopped tokens are not processed
    }

    #[test]
    fn test_custom_lemmatizer() {
        let filter = LemmaFilter::with_lemmatizer(Box::new(UpperLemmatizer));
        let result: Vec<Token> = filter
            .filter(Box::new(vec![Token::new("abc", 0)].into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result[0].text, "ABC");
        assert_eq!(filter.lemmatizer_name(), "upper");
    }
}
