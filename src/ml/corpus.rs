//! Training corpora: the built-in illustrative set and JSON files.
//!
//! A corpus file is a JSON array of records:
//!
//! ```json
//! [
//!   {"text": "City council approves budget", "label": 1},
//!   {"title": "Shocking", "text": "Aliens built the pyramids", "label": 0}
//! ]
//! ```
//!
//! `label` is `0` for fake and `1` for real. When `title` is present it is
//! prepended to `text`.

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::{PeltaError, Result};
use crate::ml::types::{Article, Label, LabeledExample};

const FAKE_NEWS: &[&str] = &[
    "Scientists discover that drinking water causes cancer in 99% of cases according to new study",
    "Breaking: Aliens have landed in New York City and are demanding pizza",
    "Government secretly controls weather using mind control satellites",
    "Local man discovers one weird trick that doctors hate - cures all diseases",
    "Celebrity spotted eating food, shocking revelation about human behavior",
    "New study shows that breathing air is actually harmful to your health",
    "Miracle cure discovered in grandmother's kitchen cabinet",
    "Politicians reveal they are actually lizard people in disguise",
    "Social media platform announces it will start charging users for thinking",
    "Breaking news: Gravity no longer works on Tuesdays",
    "Scientists prove that the earth is actually shaped like a donut",
    "Local woman loses 50 pounds by staring at pictures of salad",
    "Government admits that birds are not real, just surveillance drones",
    "New app can predict your future by analyzing your grocery receipts",
    "Researchers discover that sleeping is just practice for being dead",
];

const REAL_NEWS: &[&str] = &[
    "The Federal Reserve announced a 0.25% interest rate increase following their monthly meeting",
    "New climate report shows global temperatures rising faster than previously predicted",
    "Technology company reports quarterly earnings exceeding analyst expectations",
    "Local school district receives federal funding for new educational programs",
    "Healthcare workers continue vaccination efforts in rural communities",
    "City council approves budget for infrastructure improvements next fiscal year",
    "University researchers publish findings on renewable energy efficiency",
    "International trade negotiations continue between major economic partners",
    "Supreme Court hears arguments on important constitutional case",
    "Environmental protection agency announces new regulations for industrial emissions",
    "Stock market shows mixed results following economic data release",
    "Public health officials recommend updated guidelines for seasonal illness prevention",
    "Transportation department begins construction on new highway expansion project",
    "Educational institutions adapt to changing technology in classroom settings",
    "Agricultural department reports on crop yields and farming conditions",
];

/// Characters of the body used as the title of built-in articles.
const TITLE_CHARS: usize = 50;

fn headline(text: &str) -> String {
    let mut title: String = text.chars().take(TITLE_CHARS).collect();
    title.push_str("...");
    title
}

/// The built-in articles, 15 fake followed by 15 real.
pub fn default_articles() -> Vec<(Article, Label)> {
    let fake = FAKE_NEWS.iter().map(|text| (Label::Fake, text));
    let real = REAL_NEWS.iter().map(|text| (Label::Real, text));
    fake.chain(real)
        .map(|(label, text)| (Article::new(headline(text), *text), label))
        .collect()
}

/// The built-in corpus used when no dataset is supplied.
pub fn default_corpus() -> Vec<LabeledExample> {
    default_articles()
        .iter()
        .map(|(article, label)| LabeledExample::from_article(article, *label))
        .collect()
}

#[derive(Debug, Deserialize)]
struct CorpusRecord {
    #[serde(default)]
    title: Option<String>,
    text: String,
    label: i64,
}

/// Parse a corpus from a JSON string.
pub fn parse_corpus(json: &str) -> Result<Vec<LabeledExample>> {
    let records: Vec<CorpusRecord> = serde_json::from_str(json)
        .map_err(|e| PeltaError::data(format!("Malformed corpus: {e}")))?;

    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let label = Label::from_binary(record.label)
                .map_err(|e| PeltaError::data(format!("Record {idx}: {e}")))?;
            let example = match record.title {
                Some(title) => LabeledExample::from_article(&Article::new(title, record.text), label),
                None => LabeledExample::new(record.text, label),
            };
            Ok(example)
        })
        .collect()
}

/// Load a corpus from a JSON file.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledExample>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let corpus = parse_corpus(&content)?;
    info!("Loaded {} examples from {}", corpus.len(), path.display());
    Ok(corpus)
}
