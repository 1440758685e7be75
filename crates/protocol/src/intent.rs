use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntentError {
    #[error("empty intent payload")]
    Empty,

    #[error("intent JSON parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Actions the intent parser is allowed to emit. Anything the model invents
/// beyond this set lands on `Unknown` instead of failing the parse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntentAction {
    OpenApp,
    OpenWebsite,
    GoogleSearch,
    YoutubeSearch,
    GoogleSearchOnSite,
    DirectSiteSearch,
    #[serde(other)]
    Unknown,
}

/// One parsed intent record. Models are inconsistent about parameter key
/// names, so every field accepts the aliases observed in the wild.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Intent {
    pub action: IntentAction,

    #[serde(default, alias = "app_name", alias = "application")]
    pub app: Option<String>,

    #[serde(default, alias = "website", alias = "link")]
    pub url: Option<String>,

    #[serde(default, alias = "domain")]
    pub site: Option<String>,

    #[serde(default, alias = "search_query")]
    pub query: Option<String>,
}

impl Intent {
    /// Parses a raw model response, tolerating markdown code fences around
    /// the JSON body.
    pub fn from_raw(raw: &str) -> Result<Self, IntentError> {
        let cleaned = clean_json_block(raw);
        if cleaned.is_empty() {
            return Err(IntentError::Empty);
        }
        Ok(serde_json::from_str(&cleaned)?)
    }
}

/// Strips markdown code fences (with an optional `json` language tag) from a
/// model response, leaving the bare JSON text.
pub fn clean_json_block(raw: &str) -> String {
    let mut text = raw.trim();

    if text.starts_with("```") {
        text = text.trim_matches('`').trim_start();
        for tag in ["json", "JSON"] {
            if let Some(rest) = text.strip_prefix(tag) {
                text = rest;
                break;
            }
        }
    }

    text.replace("```", "").trim().to_string()
}
