use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, Result};

/// Which CHAT annotations the formatter strips from an utterance.
///
/// See <https://talkbank.org/0info/manuals/CHAT.pdf> for the markup itself.
/// Fields missing from a JSON config keep their default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// `&+fragment`
    pub phonological_fragment: bool,
    /// `&-um`
    pub fillers: bool,
    /// `&~gaga`
    pub nonwords: bool,
    /// `&=laughs`
    pub simple_events: bool,
    /// `+/.`, `+...` and other `+` codes
    pub terminators: bool,
    /// `[...]`
    pub brackets: bool,
    /// `<...>`
    pub scopes: bool,
    /// `(...)`: true deletes the span, false deletes only the parentheses
    pub shortenings: bool,
    /// `word@form`: true deletes the word, false deletes only `@form`
    pub special_form: bool,
    /// `xxx`
    pub unintelligible: bool,
    /// `yyy`
    pub uninterpretable: bool,
    /// Discard results that are empty, at most two characters, or contain `0`
    pub discard_empty: bool,
    /// Keep only ASCII alphanumerics, whitespace and a final punctuation mark
    pub final_filter: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            phonological_fragment: true,
            fillers: true,
            nonwords: true,
            simple_events: true,
            terminators: true,
            brackets: true,
            scopes: true,
            shortenings: false,
            special_form: false,
            unintelligible: true,
            uninterpretable: true,
            discard_empty: true,
            final_filter: true,
        }
    }
}

impl FormatterConfig {
    /// Load a config from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CorpusError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| CorpusError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
