//! Output formatting for CLI commands.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PeltaArgs};
use crate::error::Result;
use crate::ml::metrics::Metrics;
use crate::ml::service::{Health, ModelDescription};
use crate::ml::types::{Classification, PredictionResult};

/// Rendering of a result for terminal output.
pub trait HumanReadable {
    fn to_human(&self) -> String;
}

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub model_path: String,
    pub metrics: Metrics,
    pub timestamp: DateTime<Utc>,
}

/// Result structure for text predictions.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub text: String,
    #[serde(flatten)]
    pub prediction: PredictionResult,
}

/// Result structure for normalization.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub tokens: Vec<String>,
    pub normalizer: String,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanReadable>(
    message: &str,
    result: &T,
    args: &PeltaArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanReadable>(message: &str, result: &T, args: &PeltaArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }
    println!("{}", result.to_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PeltaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn prediction_lines(out: &mut String, prediction: &PredictionResult) {
    let _ = writeln!(
        out,
        "Prediction:       {} ({} confidence)",
        prediction.label.as_str().to_uppercase(),
        percent(prediction.confidence)
    );
    let _ = writeln!(out, "P(fake):          {:.4}", prediction.probability_fake);
    let _ = write!(out, "P(real):          {:.4}", prediction.probability_real);
}

impl HumanReadable for Metrics {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Train accuracy:   {}", percent(self.train_accuracy));
        let _ = writeln!(out, "Test accuracy:    {}", percent(self.test_accuracy));
        let _ = writeln!(out, "Training samples: {}", self.training_samples);
        let _ = writeln!(out, "Test samples:     {}", self.test_samples);
        let _ = writeln!(out, "Features:         {}", self.features_count);
        let _ = writeln!(out);
        let _ = write!(out, "{}", self.classification_report);
        out
    }
}

impl HumanReadable for TrainingResult {
    fn to_human(&self) -> String {
        format!("Model saved to {}\n\n{}", self.model_path, self.metrics.to_human())
    }
}

impl HumanReadable for Classification {
    fn to_human(&self) -> String {
        let mut out = String::new();
        prediction_lines(&mut out, &self.prediction);
        let _ = write!(out, "\nTokens:           {}", self.processed_text_length);
        out
    }
}

impl HumanReadable for PredictionOutput {
    fn to_human(&self) -> String {
        let mut out = format!("Text:             {}\n", self.text);
        prediction_lines(&mut out, &self.prediction);
        out
    }
}

impl<T: HumanReadable> HumanReadable for Vec<T> {
    fn to_human(&self) -> String {
        self.iter()
            .map(HumanReadable::to_human)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl HumanReadable for ModelDescription {
    fn to_human(&self) -> String {
        match self {
            ModelDescription::Available(metadata) => format!(
                "Model:            {}\nKind:             {}\nTrained at:       {}\nFormat version:   {}\nNormalizer:       {}\n\n{}",
                metadata.artifact_id,
                metadata.model_kind,
                metadata.trained_at.to_rfc3339(),
                metadata.format_version,
                metadata.normalizer_signature,
                metadata.metrics.to_human()
            ),
            ModelDescription::Unavailable => "No model information available".to_string(),
        }
    }
}

impl HumanReadable for Health {
    fn to_human(&self) -> String {
        match self.artifact_id {
            Some(id) => format!("Status: ready (model {id})"),
            None => "Status: not ready (no model loaded)".to_string(),
        }
    }
}

impl HumanReadable for NormalizationResult {
    fn to_human(&self) -> String {
        if self.tokens.is_empty() {
            "(no tokens)".to_string()
        } else {
            self.tokens.join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::types::Label;

    #[test]
    fn test_prediction_human_output() {
        let output = PredictionOutput {
            text: "miracle cure".to_string(),
            prediction: PredictionResult::from_probability_fake(0.75),
        };
        let rendered = output.to_human();
        assert!(rendered.contains("FAKE (75.00% confidence)"));
        assert!(rendered.contains("P(real):          0.2500"));
    }

    #[test]
    fn test_prediction_json_is_flat() {
        let output = PredictionOutput {
            text: "x".to_string(),
            prediction: PredictionResult::neutral(),
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["label"], serde_json::json!(Label::Real));
        assert_eq!(value["confidence"], 0.5);
    }

    #[test]
    fn test_unavailable_description() {
        assert_eq!(
            ModelDescription::Unavailable.to_human(),
            "No model information available"
        );
    }

    #[test]
    fn test_normalization_output() {
        let empty = NormalizationResult {
            tokens: vec![],
            normalizer: "news".to_string(),
        };
        assert_eq!(empty.to_human(), "(no tokens)");
    }
}
