//! Lemmatization: reducing inflected words to their dictionary base form.
//!
//! [`RuleLemmatizer`] treats every token as a noun and applies WordNet's noun
//! detachment rules (`-ies → -y`, `-ches → -ch`, `-s → ∅`, …) guarded by an
//! irregular-form table and a list of words that only look plural. There is
//! no dictionary lookup, so the output is a base form for regular English
//! plurals and the unchanged word otherwise.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Trait for lemmatization algorithms.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a lowercase word to its base form.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

/// Irregular plural → singular forms.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("lives", "life"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("calves", "calf"),
    ("loaves", "loaf"),
    ("selves", "self"),
    ("crises", "crisis"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("phenomena", "phenomenon"),
    ("criteria", "criterion"),
    ("data", "datum"),
    ("media", "medium"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("appendices", "appendix"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("nuclei", "nucleus"),
    ("radii", "radius"),
    ("stimuli", "stimulus"),
    ("alumni", "alumnus"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("heroes", "hero"),
    ("echoes", "echo"),
    ("vetoes", "veto"),
    ("aches", "ache"),
    ("headaches", "headache"),
    ("caches", "cache"),
    ("niches", "niche"),
    ("avalanches", "avalanche"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("zombies", "zombie"),
    ("calories", "calorie"),
    ("rookies", "rookie"),
    ("brownies", "brownie"),
    ("selfies", "selfie"),
    ("freebies", "freebie"),
];

/// Words ending in `s` that are not regular plurals.
const INVARIANT_WORDS: &[&str] = &[
    "news", "series", "species", "means", "lens", "bias", "alias", "atlas", "chaos", "canvas",
    "always", "perhaps", "thus", "plus", "towards", "afterwards", "sometimes", "besides",
    "whereas", "unless", "ethics", "physics", "politics", "economics", "mathematics",
    "diabetes", "measles", "headquarters", "mumps", "various", "previous", "famous",
];

/// Compound stems that form `-men` plurals (`businessmen → businessman`).
const MEN_COMPOUNDS: &[&str] = &[
    "business", "chair", "congress", "police", "fire", "sales", "spokes", "fisher", "country",
    "gentle", "crafts", "sports", "states", "work", "anchor", "news",
];

static IRREGULAR_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR_NOUNS.iter().copied().collect());

static INVARIANT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INVARIANT_WORDS.iter().copied().collect());

/// Rule-based English noun lemmatizer.
#[derive(Debug, Clone, Default)]
pub struct RuleLemmatizer;

impl RuleLemmatizer {
    /// Create a new rule-based lemmatizer.
    pub fn new() -> Self {
        RuleLemmatizer
    }

    fn strip_suffix(word: &str, suffix: &str, replacement: &str, min_stem: usize) -> Option<String> {
        let stem = word.strip_suffix(suffix)?;
        if stem.len() < min_stem {
            return None;
        }
        Some(format!("{stem}{replacement}"))
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = IRREGULAR_MAP.get(word) {
            return (*base).to_string();
        }

        if word.len() <= 3 || INVARIANT_SET.contains(word) {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("men") {
            if MEN_COMPOUNDS.contains(&stem) {
                return format!("{stem}man");
            }
        }

        // Not plurals: "business", "virus", "crisis", "dangerous".
        if word.ends_with("ss")
            || word.ends_with("us")
            || word.ends_with("is")
            || word.ends_with("ous")
        {
            return word.to_string();
        }

        let rules: [(&str, &str, usize); 6] = [
            ("ies", "y", 2),
            ("sses", "ss", 1),
            ("ches", "ch", 1),
            ("shes", "sh", 1),
            ("xes", "x", 1),
            ("zzes", "zz", 1),
        ];
        for (suffix, replacement, min_stem) in rules {
            if let Some(lemma) = Self::strip_suffix(word, suffix, replacement, min_stem) {
                return lemma;
            }
        }

        Self::strip_suffix(word, "s", "", 3).unwrap_or_else(|| word.to_string())
    }

    fn name(&self) -> &'static str {
        "rule_noun"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let lemmatizer = RuleLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("scientists"), "scientist");
        assert_eq!(lemmatizer.lemmatize("cities"), "city");
        assert_eq!(lemmatizer.lemmatize("churches"), "church");
        assert_eq!(lemmatizer.lemmatize("boxes"), "box");
        assert_eq!(lemmatizer.lemmatize("classes"), "class");
        assert_eq!(lemmatizer.lemmatize("lies"), "lie");
        assert_eq!(lemmatizer.lemmatize("drones"), "drone");
    }

    #[test]
    fn test_irregular_and_invariant() {
        let lemmatizer = RuleLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("children"), "child");
        assert_eq!(lemmatizer.lemmatize("women"), "woman");
        assert_eq!(lemmatizer.lemmatize("businessmen"), "businessman");
        assert_eq!(lemmatizer.lemmatize("news"), "news");
        assert_eq!(lemmatizer.lemmatize("business"), "business");
        assert_eq!(lemmatizer.lemmatize("virus"), "virus");
        assert_eq!(lemmatizer.lemmatize("analysis"), "analysis");
        assert_eq!(lemmatizer.lemmatize("specimen"), "specimen");
    }

    #[test]
    fn test_short_and_non_plural_words() {
        let lemmatizer = RuleLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("gas"), "gas");
        assert_eq!(lemmatizer.lemmatize("cure"), "cure");
        assert_eq!(lemmatizer.lemmatize("miracle"), "miracle");
        assert_eq!(lemmatizer.name(), "rule_noun");
    }
}
