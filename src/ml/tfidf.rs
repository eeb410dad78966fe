//! TF-IDF vectorizer for text feature extraction.
//!
//! Works on already normalized token sequences. Terms are the n-grams of
//! each sequence (space-joined), weighted by raw count × smoothed IDF and
//! L2-normalized per document.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{PeltaError, Result};
use crate::ml::config::VectorizerConfig;

/// TF-IDF vectorizer for text feature extraction.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    config: VectorizerConfig,
    /// Vocabulary: term -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Terms ordered by index.
    feature_names: Vec<String>,
    /// Inverse document frequency for each term.
    idf: Vec<f64>,
    /// Total number of documents seen during fit.
    n_documents: usize,
    fitted: bool,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("fitted", &self.fitted)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            config,
            vocabulary: HashMap::new(),
            feature_names: Vec::new(),
            idf: Vec::new(),
            n_documents: 0,
            fitted: false,
        }
    }

    /// Extract the configured n-grams of a token sequence.
    pub fn terms(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.config.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n == 0 || n > tokens.len() {
                continue;
            }
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    /// Learn the vocabulary and IDF weights from a corpus.
    ///
    /// Refitting replaces all previously learned state.
    pub fn fit(&mut self, corpus: &[Vec<String>]) -> Result<()> {
        if corpus.is_empty() {
            return Err(PeltaError::data("Cannot fit a vectorizer on an empty corpus"));
        }

        let n_documents = corpus.len();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut term_count: HashMap<String, usize> = HashMap::new();

        for doc in corpus {
            let terms = self.terms(doc);
            let mut seen = HashSet::new();
            for term in terms {
                if seen.insert(term.clone()) {
                    *document_frequency.entry(term.clone()).or_insert(0) += 1;
                }
                *term_count.entry(term).or_insert(0) += 1;
            }
        }

        let candidates = document_frequency.len();
        let max_doc_count = self.config.max_df * n_documents as f64;
        let mut retained: Vec<(String, usize)> = document_frequency
            .iter()
            .filter(|&(_, &df)| df >= self.config.min_df && df as f64 <= max_doc_count)
            .map(|(term, _)| (term.clone(), term_count.get(term).copied().unwrap_or(0)))
            .collect();

        if retained.len() > self.config.max_features {
            // Most frequent first, ties in lexicographic order.
            retained.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            retained.truncate(self.config.max_features);
        }

        let mut feature_names: Vec<String> = retained.into_iter().map(|(term, _)| term).collect();
        feature_names.sort();

        let vocabulary: HashMap<String, usize> = feature_names
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        // IDF = ln((N + 1) / (df + 1)) + 1
        let idf = feature_names
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0);
                ((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
            })
            .collect();

        if feature_names.is_empty() {
            warn!(
                "No terms survived document-frequency pruning ({candidates} candidates, {n_documents} documents); all feature vectors will be zero"
            );
        } else {
            debug!(
                "Fitted vocabulary of {} terms from {candidates} candidates over {n_documents} documents",
                feature_names.len()
            );
        }

        self.vocabulary = vocabulary;
        self.feature_names = feature_names;
        self.idf = idf;
        self.n_documents = n_documents;
        self.fitted = true;

        Ok(())
    }

    /// Transform a token sequence into a TF-IDF feature vector.
    ///
    /// Terms outside the vocabulary are ignored.
    pub fn transform(&self, tokens: &[String]) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(PeltaError::not_fitted(
                "TfIdfVectorizer::transform called before fit",
            ));
        }

        let mut features = vec![0.0; self.vocabulary.len()];
        for term in self.terms(tokens) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                features[idx] += 1.0;
            }
        }

        for (idx, value) in features.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        Ok(features)
    }

    /// Transform many token sequences.
    pub fn transform_batch(&self, corpus: &[Vec<String>]) -> Result<Vec<Vec<f64>>> {
        corpus.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Fit on a corpus and return its feature vectors.
    pub fn fit_transform(&mut self, corpus: &[Vec<String>]) -> Result<Vec<Vec<f64>>> {
        self.fit(corpus)?;
        self.transform_batch(corpus)
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Terms in feature-index order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of each feature.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    fn corpus() -> Vec<Vec<String>> {
        vec![
            doc("city council budget"),
            doc("city council vote"),
            doc("miracle cure found"),
            doc("miracle cure secret"),
            doc("weather report"),
        ]
    }

    #[test]
    fn test_transform_before_fit() {
        let vectorizer = TfIdfVectorizer::new(VectorizerConfig::default());
        let result = vectorizer.transform(&doc("city council"));
        assert!(matches!(result, Err(PeltaError::NotFitted(_))));
    }

    #[test]
    fn test_vocabulary_respects_min_df() {
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default());
        vectorizer.fit(&corpus()).unwrap();

        // Unigrams and bigrams appearing in at least two documents, sorted.
        assert_eq!(
            vectorizer.feature_names(),
            &["city", "city council", "council", "cure", "miracle", "miracle cure"]
        );
        assert_eq!(vectorizer.term_index("city council"), Some(1));
        assert_eq!(vectorizer.term_index("budget"), None);
    }

    #[test]
    fn test_max_df_drops_ubiquitous_terms() {
        let docs = vec![doc("news alpha"), doc("news alpha"), doc("news beta"), doc("news beta")];
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig {
            max_df: 0.5,
            ..VectorizerConfig::default()
        });
        vectorizer.fit(&docs).unwrap();

        assert_eq!(vectorizer.term_index("news"), None);
        assert!(vectorizer.term_index("alpha").is_some());
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let docs = vec![
            doc("alpha alpha beta gamma"),
            doc("alpha beta gamma"),
            doc("alpha beta"),
        ];
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig {
            max_features: 2,
            ngram_range: (1, 1),
            max_df: 1.0,
            ..VectorizerConfig::default()
        });
        vectorizer.fit(&docs).unwrap();

        assert_eq!(vectorizer.feature_names(), &["alpha", "beta"]);
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default());
        vectorizer.fit(&corpus()).unwrap();

        let features = vectorizer.transform(&doc("city council miracle")).unwrap();
        assert_eq!(features.len(), vectorizer.vocabulary_size());
        assert!(features.iter().all(|&v| v >= 0.0));
        let norm: f64 = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_terms_give_zero_vector() {
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default());
        vectorizer.fit(&corpus()).unwrap();

        let features = vectorizer.transform(&doc("zebra quantum")).unwrap();
        assert_eq!(features.len(), vectorizer.vocabulary_size());
        assert!(features.iter().all(|&v| v == 0.0));

        let empty = vectorizer.transform(&[]).unwrap();
        assert_eq!(empty.len(), vectorizer.vocabulary_size());
    }

    #[test]
    fn test_empty_vocabulary_is_allowed() {
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default());
        vectorizer.fit(&[doc("one"), doc("two")]).unwrap();

        assert!(vectorizer.is_fitted());
        assert_eq!(vectorizer.vocabulary_size(), 0);
        assert!(vectorizer.transform(&doc("one")).unwrap().is_empty());
    }

    #[test]
    fn test_idf_is_smoothed() {
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default());
        vectorizer.fit(&corpus()).unwrap();

        let idx = vectorizer.term_index("city").unwrap();
        let expected = (6.0_f64 / 3.0).ln() + 1.0;
        assert!((vectorizer.idf()[idx] - expected).abs() < 1e-12);
        assert_eq!(vectorizer.n_documents(), 5);
    }
}
