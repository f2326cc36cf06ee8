//! Client configuration.
//!
//! [`SpokestackConfig`] is the raw, deserializable form (YAML or any serde
//! source). [`SpokestackConfig::validate`] turns it into [`SpokestackSettings`],
//! rejecting invalid values once at the construction boundary.

use crate::tts::{ClientCredentials, SynthesisMode};
use crate::{Error, ErrorContext, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_MODE: &str = "text";
pub const DEFAULT_VOICE: &str = "demo-male";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "en-us"];
pub const SUPPORTED_OPTIONS: &[&str] = &["voice", "mode"];

pub fn is_supported_language(language: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language)
}

fn default_language() -> String {
    DEFAULT_LANG.to_string()
}

fn default_mode() -> String {
    DEFAULT_MODE.to_string()
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Raw client configuration as supplied by the host.
#[derive(Clone, Deserialize)]
pub struct SpokestackConfig {
    /// Required before validation; may be left out of a file and filled later.
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Per-request bound applied separately to submit and download.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl fmt::Debug for SpokestackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpokestackConfig")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .field("language", &self.language)
            .field("mode", &self.mode)
            .field("voice", &self.voice)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SpokestackConfig {
    /// Config with the given credentials and every other field defaulted.
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
            language: default_language(),
            mode: default_mode(),
            voice: default_voice(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read config file: {}", e),
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("config"),
            )
        })?;
        Self::from_yaml_str(&content)
    }

    /// Fill credentials the source left empty. Values already present win.
    pub fn fill_missing_credentials(&mut self, client_id: Option<String>, secret: Option<String>) {
        if self.client_id.is_empty() {
            if let Some(client_id) = client_id {
                self.client_id = client_id;
            }
        }
        if self.secret.is_empty() {
            if let Some(secret) = secret {
                self.secret = secret;
            }
        }
    }

    pub fn validate(&self) -> Result<SpokestackSettings> {
        if self.client_id.is_empty() {
            return Err(Error::configuration_with_context(
                "Client ID must be specified",
                ErrorContext::new()
                    .with_field_path("client_id")
                    .with_source("config"),
            ));
        }

        if !is_supported_language(&self.language) {
            return Err(Error::configuration_with_context(
                format!("Unsupported language '{}'", self.language),
                ErrorContext::new()
                    .with_field_path("language")
                    .with_details(format!("expected one of {:?}", SUPPORTED_LANGUAGES))
                    .with_source("config"),
            ));
        }

        if self.secret.is_empty() {
            return Err(Error::configuration_with_context(
                "Secret must not be empty",
                ErrorContext::new()
                    .with_field_path("secret")
                    .with_source("config"),
            ));
        }

        if self.voice.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "Voice must not be empty",
                ErrorContext::new()
                    .with_field_path("voice")
                    .with_source("config"),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "timeout_secs must be greater than 0",
                ErrorContext::new()
                    .with_field_path("timeout_secs")
                    .with_source("config"),
            ));
        }

        // Any string is accepted as a default mode; an unknown one only fails
        // the calls that rely on it.
        if SynthesisMode::from_str(&self.mode).is_err() {
            tracing::warn!(
                mode = %self.mode,
                "Default synthesis mode is not supported; calls without an explicit mode will fail"
            );
        }

        let credentials = ClientCredentials::new(&self.client_id, self.secret.as_bytes())?;

        Ok(SpokestackSettings {
            credentials,
            language: self.language.clone(),
            mode: self.mode.clone(),
            voice: self.voice.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

/// Validated configuration held by the client for its lifetime.
#[derive(Debug, Clone)]
pub struct SpokestackSettings {
    pub credentials: ClientCredentials,
    pub language: String,
    pub mode: String,
    pub voice: String,
    pub timeout: Duration,
}
