//! TTS types.

use crate::{Error, ErrorContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Audio output from a successful synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioOutput {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

/// Audio formats produced by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
}

impl AudioFormat {
    /// Short name handed to the host (file extension).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input text format; each mode is a distinct remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynthesisMode {
    Markdown,
    Ssml,
    Text,
}

impl SynthesisMode {
    pub const ALL: [SynthesisMode; 3] = [Self::Markdown, Self::Ssml, Self::Text];

    /// Name of the mode, also used as the GraphQL variable holding the message.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Ssml => "ssml",
            Self::Text => "text",
        }
    }

    /// Remote operation that synthesizes this mode.
    pub fn operation_name(&self) -> &'static str {
        match self {
            Self::Markdown => "synthesizeMarkdown",
            Self::Ssml => "synthesizeSsml",
            Self::Text => "synthesizeText",
        }
    }
}

impl FromStr for SynthesisMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(Self::Markdown),
            "ssml" => Ok(Self::Ssml),
            "text" => Ok(Self::Text),
            other => Err(Error::validation_with_context(
                format!("Unsupported synthesis mode '{}'", other),
                ErrorContext::new()
                    .with_field_path("mode")
                    .with_details("expected one of markdown, ssml, text"),
            )),
        }
    }
}

impl fmt::Display for SynthesisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call options. Unset fields fall back to the client's configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl SynthesisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}
