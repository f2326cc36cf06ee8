//! Typed view of the synthesis response: `{"data": {"<operation>": {"url": ...}}}`.

use crate::Result;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SynthesisResponse {
    #[serde(default)]
    pub data: Option<HashMap<String, Option<StreamLocation>>>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamLocation {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphqlError {
    #[serde(default)]
    pub message: String,
}

impl SynthesisResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Stream URL at `data.<operation>.url`, if present and non-empty.
    pub fn stream_url(&self, operation: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .get(operation)?
            .as_ref()?
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    /// Messages of any GraphQL errors, joined for logging.
    pub fn error_summary(&self) -> Option<String> {
        let errors = self.errors.as_ref().filter(|e| !e.is_empty())?;
        Some(
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
