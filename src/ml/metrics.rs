//! Evaluation metrics for the binary fake/real classifier.
//!
//! Implements:
//! - Confusion Matrix (rows = true label, columns = predicted label)
//! - Per-class Precision, Recall, F1-Score and support
//! - Macro and support-weighted averages

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PeltaError, Result};
use crate::ml::types::Label;

/// Confusion matrix for fake/real classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Fake articles predicted as fake.
    pub fake_as_fake: usize,
    /// Fake articles predicted as real.
    pub fake_as_real: usize,
    /// Real articles predicted as fake.
    pub real_as_fake: usize,
    /// Real articles predicted as real.
    pub real_as_real: usize,
}

impl ConfusionMatrix {
    /// Create from predictions and ground truth labels.
    pub fn from_predictions(predictions: &[Label], ground_truth: &[Label]) -> Result<Self> {
        if predictions.len() != ground_truth.len() {
            return Err(PeltaError::data(format!(
                "Got {} predictions for {} labels",
                predictions.len(),
                ground_truth.len()
            )));
        }

        let mut matrix = Self::default();
        for (pred, truth) in predictions.iter().zip(ground_truth) {
            match (truth, pred) {
                (Label::Fake, Label::Fake) => matrix.fake_as_fake += 1,
                (Label::Fake, Label::Real) => matrix.fake_as_real += 1,
                (Label::Real, Label::Fake) => matrix.real_as_fake += 1,
                (Label::Real, Label::Real) => matrix.real_as_real += 1,
            }
        }
        Ok(matrix)
    }

    /// Total number of samples.
    pub fn total(&self) -> usize {
        self.fake_as_fake + self.fake_as_real + self.real_as_fake + self.real_as_real
    }

    /// Number of correct predictions.
    pub fn correct(&self) -> usize {
        self.fake_as_fake + self.real_as_real
    }

    /// Accuracy: correct / total, 0 for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct(), self.total())
    }

    /// Precision, recall, F1 and support of one class.
    pub fn class_metrics(&self, label: Label) -> ClassMetrics {
        let (tp, fp, fn_) = match label {
            Label::Fake => (self.fake_as_fake, self.real_as_fake, self.fake_as_real),
            Label::Real => (self.real_as_real, self.fake_as_real, self.real_as_fake),
        };
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1_score = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        ClassMetrics {
            precision,
            recall,
            f1_score,
            support: tp + fn_,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Metrics of a single class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Number of test samples whose true label is this class.
    pub support: usize,
}

/// Full classification report over a test partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub fake: ClassMetrics,
    pub real: ClassMetrics,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub confusion_matrix: ConfusionMatrix,
}

impl ClassificationReport {
    /// Generate full report from a confusion matrix.
    pub fn from_confusion_matrix(cm: ConfusionMatrix) -> Self {
        let fake = cm.class_metrics(Label::Fake);
        let real = cm.class_metrics(Label::Real);
        let support = fake.support + real.support;

        let macro_avg = ClassMetrics {
            precision: (fake.precision + real.precision) / 2.0,
            recall: (fake.recall + real.recall) / 2.0,
            f1_score: (fake.f1_score + real.f1_score) / 2.0,
            support,
        };

        let weighted = |f: fn(&ClassMetrics) -> f64| {
            if support == 0 {
                0.0
            } else {
                (f(&fake) * fake.support as f64 + f(&real) * real.support as f64) / support as f64
            }
        };
        let weighted_avg = ClassMetrics {
            precision: weighted(|m| m.precision),
            recall: weighted(|m| m.recall),
            f1_score: weighted(|m| m.f1_score),
            support,
        };

        Self {
            fake,
            real,
            accuracy: cm.accuracy(),
            macro_avg,
            weighted_avg,
            confusion_matrix: cm,
        }
    }

    /// Generate report from predictions and ground truth.
    pub fn from_predictions(predictions: &[Label], ground_truth: &[Label]) -> Result<Self> {
        let cm = ConfusionMatrix::from_predictions(predictions, ground_truth)?;
        Ok(Self::from_confusion_matrix(cm))
    }

    /// Metrics of one class.
    pub fn class(&self, label: Label) -> &ClassMetrics {
        match label {
            Label::Fake => &self.fake,
            Label::Real => &self.real,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>14} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for (name, m) in [("fake", &self.fake), ("real", &self.real)] {
            writeln!(
                f,
                "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1_score, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>14} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1_score, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Confusion matrix (rows = actual, columns = predicted):")?;
        writeln!(f, "{:>14} {:>10} {:>10}", "", "fake", "real")?;
        let cm = &self.confusion_matrix;
        writeln!(f, "{:>14} {:>10} {:>10}", "fake", cm.fake_as_fake, cm.fake_as_real)?;
        write!(f, "{:>14} {:>10} {:>10}", "real", cm.real_as_fake, cm.real_as_real)
    }
}

/// Metrics of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub train_accuracy: f64,
    /// Accuracy on the test partition; 0 when `test_samples == 0`, so check
    /// `test_samples` before reading it.
    pub test_accuracy: f64,
    /// Report computed on the test partition. All zeros when it is empty.
    pub classification_report: ClassificationReport,
    pub training_samples: usize,
    pub test_samples: usize,
    /// Vocabulary size of the fitted vectorizer.
    pub features_count: usize,
}
