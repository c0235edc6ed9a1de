use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors loading an intent definition
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("failed to read intent file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid intent JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One conversational intent: a tag, example patterns the classifier
/// trains on, and canned responses to choose between.
#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub tag: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

/// A full intent definition, the `{"intents": [...]}` JSON shape
#[derive(Debug, Clone, Deserialize)]
pub struct IntentSet {
    pub intents: Vec<Intent>,
}

/// Default definition compiled into the binary, always available even
/// without an intents file on disk
const EMBEDDED_INTENTS: &str = include_str!("../assets/intents.json");

impl IntentSet {
    /// The compiled-in default set
    pub fn embedded() -> Result<Self, IntentError> {
        Self::from_json(EMBEDDED_INTENTS)
    }

    pub fn from_json(json: &str) -> Result<Self, IntentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a definition from a UTF-8 JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, IntentError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn find(&self, tag: &str) -> Option<&Intent> {
        self.intents.iter().find(|intent| intent.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_set_parses() {
        let set = IntentSet::embedded().unwrap();
        assert!(set.intents.len() >= 5);
    }

    #[test]
    fn embedded_set_has_a_fallback_with_responses() {
        let set = IntentSet::embedded().unwrap();
        let fallback = set.find("fallback").unwrap();
        assert!(fallback.patterns.is_empty());
        assert!(!fallback.responses.is_empty());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = IntentSet::from_json("not json").unwrap_err();
        assert!(matches!(err, IntentError::Parse(_)));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let set = IntentSet::from_json(r#"{"intents":[{"tag":"bare"}]}"#).unwrap();
        let intent = set.find("bare").unwrap();
        assert!(intent.patterns.is_empty());
        assert!(intent.responses.is_empty());
    }
}
