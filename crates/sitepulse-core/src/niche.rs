//! Niche-specific service vocabularies used by page classification and the
//! heading-pair service heuristic.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicheTerms {
    pub key: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Lowercase terms; multi-word terms are matched as phrases.
    pub terms: Vec<String>,
}

impl NicheTerms {
    fn matches(&self, niche: &str) -> bool {
        let niche = niche.trim().to_lowercase();
        niche == self.key
            || niche.contains(&self.key)
            || self
                .aliases
                .iter()
                .any(|a| niche == *a || niche.contains(a.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicheVocabulary {
    pub niches: Vec<NicheTerms>,
}

impl Default for NicheVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

fn terms(key: &str, aliases: &[&str], words: &[&str]) -> NicheTerms {
    NicheTerms {
        key: key.to_string(),
        aliases: aliases.iter().map(|s| (*s).to_string()).collect(),
        terms: words.iter().map(|s| (*s).to_string()).collect(),
    }
}

impl NicheVocabulary {
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            niches: vec![
                terms(
                    "plumbing",
                    &["plumber", "plumbers"],
                    &[
                        "drain", "drains", "sewer", "leak", "leaks", "pipe", "pipes", "faucet",
                        "toilet", "clog", "repiping", "backflow", "hydro", "jetting",
                        "water heater", "gas line", "sump pump",
                    ],
                ),
                terms(
                    "hvac",
                    &["heating", "cooling", "air conditioning", "ac repair"],
                    &[
                        "furnace", "heat", "ac", "air", "conditioning", "duct", "ducts",
                        "thermostat", "boiler", "compressor", "heat pump", "mini split",
                    ],
                ),
                terms(
                    "electrical",
                    &["electrician", "electricians", "electric"],
                    &[
                        "wiring", "panel", "panels", "outlet", "outlets", "breaker", "lighting",
                        "generator", "surge", "rewiring", "ev charger",
                    ],
                ),
                terms(
                    "roofing",
                    &["roofer", "roofers", "roof"],
                    &[
                        "roof", "roofs", "shingle", "shingles", "gutter", "gutters", "flashing",
                        "skylight", "reroof", "tile", "metal roofing",
                    ],
                ),
                terms(
                    "landscaping",
                    &["landscaper", "lawn care", "lawn"],
                    &[
                        "lawn", "mowing", "irrigation", "sod", "mulch", "hardscape", "tree",
                        "trimming", "sprinkler", "landscape design",
                    ],
                ),
                terms(
                    "cleaning",
                    &["cleaner", "cleaners", "maid", "janitorial"],
                    &[
                        "cleaning", "carpet", "upholstery", "deep", "janitorial", "sanitizing",
                        "window", "windows", "move out", "pressure washing",
                    ],
                ),
                terms(
                    "pest control",
                    &["exterminator", "pest"],
                    &[
                        "termite", "termites", "rodent", "rodents", "bed bug", "mosquito",
                        "ant", "ants", "roach", "wildlife", "fumigation",
                    ],
                ),
                terms(
                    "garage doors",
                    &["garage door", "garage"],
                    &[
                        "garage", "door", "doors", "opener", "openers", "spring", "springs",
                        "track", "cable", "remote",
                    ],
                ),
            ],
        }
    }

    /// Terms for the first niche matching `niche` (by key or alias substring).
    #[must_use]
    pub fn terms_for(&self, niche: &str) -> &[String] {
        self.niches
            .iter()
            .find(|n| n.matches(niche))
            .map(|n| n.terms.as_slice())
            .unwrap_or_default()
    }

    /// Merges `other` over `self`: entries with the same key replace the
    /// built-in entry, new keys are appended.
    pub fn merge(&mut self, other: NicheVocabulary) {
        for incoming in other.niches {
            if let Some(existing) = self.niches.iter_mut().find(|n| n.key == incoming.key) {
                *existing = incoming;
            } else {
                self.niches.push(incoming);
            }
        }
    }

    /// Parses and validates a YAML vocabulary document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the YAML is malformed or fails validation.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let mut vocab: NicheVocabulary = serde_yaml::from_str(content)?;
        for niche in &mut vocab.niches {
            niche.key = niche.key.trim().to_lowercase();
            for t in niche.terms.iter_mut().chain(niche.aliases.iter_mut()) {
                *t = t.trim().to_lowercase();
            }
        }
        validate_vocabulary(&vocab)?;
        Ok(vocab)
    }
}

/// Load the built-in vocabulary and merge an optional YAML override file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed, or validated.
pub fn load_niche_vocabulary(path: Option<&Path>) -> Result<NicheVocabulary, ConfigError> {
    let mut vocab = NicheVocabulary::builtin();
    let Some(path) = path else {
        return Ok(vocab);
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VocabularyIo {
        path: path.display().to_string(),
        source: e,
    })?;
    let overrides = NicheVocabulary::from_yaml_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        niches = overrides.niches.len(),
        "merged niche vocabulary overrides"
    );
    vocab.merge(overrides);
    Ok(vocab)
}

fn validate_vocabulary(vocab: &NicheVocabulary) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for niche in &vocab.niches {
        if niche.key.is_empty() {
            return Err(ConfigError::Validation(
                "niche key must be non-empty".to_string(),
            ));
        }
        if niche.terms.iter().all(String::is_empty) {
            return Err(ConfigError::Validation(format!(
                "niche '{}' has no terms",
                niche.key
            )));
        }
        if !seen.insert(niche.key.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate niche key: '{}'",
                niche.key
            )));
        }
    }
    Ok(())
}
