//! Command implementations for Pelta CLI.

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

use crate::analysis::normalizer::Normalizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::ml::config::PipelineConfig;
use crate::ml::corpus::load_corpus;
use crate::ml::service::{ModelDescription, NewsClassifierService};

/// Execute a CLI command.
pub fn execute_command(args: PeltaArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
        Command::Describe => describe(&args),
        Command::Health => health(&args),
        Command::Normalize(normalize_args) => normalize(normalize_args.clone(), &args),
    }
}

fn load_config(cli_args: &PeltaArgs) -> Result<PipelineConfig> {
    match &cli_args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

fn open_service(cli_args: &PeltaArgs) -> Result<NewsClassifierService> {
    let config = load_config(cli_args)?;
    let service = NewsClassifierService::from_path(&cli_args.model_path, config)
        .context("Failed to create classifier service")?;
    Ok(service)
}

/// Load the saved model if there is one, without training.
fn open_existing(cli_args: &PeltaArgs) -> Result<NewsClassifierService> {
    let service = open_service(cli_args)?;
    if service.store().exists() {
        service
            .load()
            .with_context(|| format!("Failed to load {}", cli_args.model_path.display()))?;
    }
    Ok(service)
}

/// Load the saved model, training and saving one first if none exists.
fn open_ready(cli_args: &PeltaArgs) -> Result<NewsClassifierService> {
    let service = open_service(cli_args)?;
    let outcome = service
        .bootstrap()
        .with_context(|| format!("Failed to prepare model at {}", cli_args.model_path.display()))?;
    info!("Model ready ({outcome:?})");
    Ok(service)
}

/// Train a model.
///
/// A supplied corpus is always trained on. Without one, an existing model is
/// kept unless `--retrain` is given.
fn train(args: TrainArgs, cli_args: &PeltaArgs) -> Result<()> {
    let service = open_existing(cli_args)?;

    let (message, metrics) = match &args.corpus {
        Some(corpus_path) => {
            if cli_args.verbosity() > 1 {
                println!("Loading corpus from: {}", corpus_path.display());
            }
            let corpus = load_corpus(corpus_path)
                .with_context(|| format!("Failed to load corpus {}", corpus_path.display()))?;
            let metrics = service.train_on(&corpus).context("Training failed")?;
            ("Model trained successfully", metrics)
        }
        None if !args.retrain && service.is_ready() => {
            let metrics = service.current()?.metrics().clone();
            ("Existing model kept (use --retrain to train a new one)", metrics)
        }
        None => {
            let metrics = service.train(true).context("Training failed")?;
            ("Model trained successfully", metrics)
        }
    };

    output_result(
        message,
        &TrainingResult {
            model_path: cli_args.model_path.display().to_string(),
            metrics,
            timestamp: Utc::now(),
        },
        cli_args,
    )?;

    Ok(())
}

/// Classify an article.
fn classify(args: ClassifyArgs, cli_args: &PeltaArgs) -> Result<()> {
    let service = open_ready(cli_args)?;
    let classification = service
        .classify(&args.title, &args.content)
        .context("Classification failed")?;

    output_result("Classification", &classification, cli_args)?;
    Ok(())
}

/// Classify free text.
fn predict(args: PredictArgs, cli_args: &PeltaArgs) -> Result<()> {
    let service = open_ready(cli_args)?;
    let predictions = service
        .predict_batch(args.texts.as_slice())
        .context("Prediction failed")?;

    let outputs: Vec<PredictionOutput> = args
        .texts
        .into_iter()
        .zip(predictions)
        .map(|(text, prediction)| PredictionOutput { text, prediction })
        .collect();

    if outputs.len() == 1 {
        output_result("Prediction", &outputs[0], cli_args)?;
    } else {
        output_result("Predictions", &outputs, cli_args)?;
    }
    Ok(())
}

/// Show model metadata.
fn describe(cli_args: &PeltaArgs) -> Result<()> {
    let service = open_existing(cli_args)?;
    let description = service.describe();
    let message = match &description {
        ModelDescription::Available(_) => "Model information",
        ModelDescription::Unavailable => "No model found",
    };

    output_result(message, &description, cli_args)?;
    Ok(())
}

/// Report model availability.
fn health(cli_args: &PeltaArgs) -> Result<()> {
    let service = open_existing(cli_args)?;
    output_result("Health", &service.health(), cli_args)?;
    Ok(())
}

/// Show normalized tokens.
fn normalize(args: NormalizeArgs, cli_args: &PeltaArgs) -> Result<()> {
    let normalizer = Normalizer::news().context("Failed to build normalizer")?;
    let result = NormalizationResult {
        tokens: normalizer.normalize(&args.text),
        normalizer: normalizer.signature(),
    };

    output_result("Normalized tokens", &result, cli_args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    use crate::ml::store::{FileModelStore, ModelStore};

    fn run(args: &[&str]) {
        let args = PeltaArgs::try_parse_from(args).unwrap();
        execute_command(args).unwrap();
    }

    fn saved_id(path: &std::path::Path) -> uuid::Uuid {
        FileModelStore::new(path).load().unwrap().metadata().artifact_id
    }

    #[test]
    fn test_train_with_corpus_replaces_existing_model() {
        let dir = TempDir::new().unwrap();
        let model_path = dir.path().join("model.bin");
        let model = model_path.to_str().unwrap();

        run(&["pelta", "-q", "--model-path", model, "train"]);
        let first = saved_id(&model_path);

        run(&["pelta", "-q", "--model-path", model, "train"]);
        assert_eq!(saved_id(&model_path), first);

        let records: Vec<serde_json::Value> = (0..6)
            .map(|i| serde_json::json!({"text": format!("shocking miracle cure number{i}"), "label": 0}))
            .chain((0..6).map(|i| {
                serde_json::json!({"text": format!("council approves budget item{i}"), "label": 1})
            }))
            .collect();
        let corpus_path = dir.path().join("corpus.json");
        std::fs::write(&corpus_path, serde_json::to_string(&records).unwrap()).unwrap();

        run(&[
            "pelta",
            "-q",
            "--model-path",
            model,
            "train",
            "--corpus",
            corpus_path.to_str().unwrap(),
        ]);

        let artifact = FileModelStore::new(&model_path).load().unwrap();
        assert_ne!(artifact.metadata().artifact_id, first);
        assert_eq!(
            artifact.metrics().training_samples + artifact.metrics().test_samples,
            12
        );
    }
}
