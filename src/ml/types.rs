//! Core data types shared by training and inference.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PeltaError, Result};

/// Class of a news article.
///
/// The binary encoding follows the training data format: `0` is fake and
/// `1` is real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Fake,
    Real,
}

impl Label {
    /// Both labels in binary-encoding order.
    pub const ALL: [Label; 2] = [Label::Fake, Label::Real];

    /// Decode a `0|1` label.
    pub fn from_binary(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Label::Fake),
            1 => Ok(Label::Real),
            other => Err(PeltaError::data(format!(
                "Invalid label {other}: expected 0 (fake) or 1 (real)"
            ))),
        }
    }

    /// Encode as `0|1`.
    pub fn as_binary(self) -> u8 {
        match self {
            Label::Fake => 0,
            Label::Real => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Fake => "fake",
            Label::Real => "real",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = PeltaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fake" | "0" => Ok(Label::Fake),
            "real" | "1" => Ok(Label::Real),
            other => Err(PeltaError::data(format!("Unknown label: {other}"))),
        }
    }
}

/// A caller-supplied news article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub body: String,
}

impl Article {
    pub fn new<T: Into<String>, B: Into<String>>(title: T, body: B) -> Self {
        Article {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Title and body joined by a single space, the form both training and
    /// classification feed to the normalizer.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// One training record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub text: String,
    pub label: Label,
}

impl LabeledExample {
    pub fn new<S: Into<String>>(text: S, label: Label) -> Self {
        LabeledExample {
            text: text.into(),
            label,
        }
    }

    /// Build an example from an article, combining title and body.
    pub fn from_article(article: &Article, label: Label) -> Self {
        Self::new(article.combined_text(), label)
    }
}

/// Outcome of classifying one text.
///
/// `probability_fake + probability_real == 1` and `confidence` is the larger
/// of the two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Label,
    pub confidence: f64,
    pub probability_fake: f64,
    pub probability_real: f64,
}

impl PredictionResult {
    /// Result returned for text that normalizes to nothing.
    pub fn neutral() -> Self {
        PredictionResult {
            label: Label::Real,
            confidence: 0.5,
            probability_fake: 0.5,
            probability_real: 0.5,
        }
    }

    /// Build a result from the probability of the fake class.
    ///
    /// Ties go to [`Label::Fake`].
    pub fn from_probability_fake(probability_fake: f64) -> Self {
        let probability_fake = probability_fake.clamp(0.0, 1.0);
        let probability_real = 1.0 - probability_fake;
        let label = if probability_fake >= probability_real {
            Label::Fake
        } else {
            Label::Real
        };

        PredictionResult {
            label,
            confidence: probability_fake.max(probability_real),
            probability_fake,
            probability_real,
        }
    }
}

/// A prediction for an article plus request details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(flatten)]
    pub prediction: PredictionResult,
    /// Number of tokens left after normalization.
    pub processed_text_length: usize,
    pub timestamp: DateTime<Utc>,
}
