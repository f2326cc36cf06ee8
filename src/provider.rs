//! Host-facing speech provider interface.
//!
//! Hosts drive synthesis through [`SpeechProvider`]; failures never cross this
//! boundary as errors. They are logged by the client and surface as `None`.

use crate::config::{SUPPORTED_LANGUAGES, SUPPORTED_OPTIONS};
use crate::tts::{AudioOutput, SpokestackClient, SynthesisOptions};
use async_trait::async_trait;
use tracing::debug;

pub const PROVIDER_NAME: &str = "Spokestack TTS";

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    fn name(&self) -> &str;

    fn default_language(&self) -> &str;

    fn supported_languages(&self) -> &[&'static str];

    /// Option keys accepted by [`SpeechProvider::get_tts_audio`].
    fn supported_options(&self) -> &[&'static str] {
        &[]
    }

    /// Synthesize `message`, returning `None` on any failure.
    async fn get_tts_audio(
        &self,
        message: &str,
        language: &str,
        options: Option<&SynthesisOptions>,
    ) -> Option<AudioOutput>;
}

#[async_trait]
impl SpeechProvider for SpokestackClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn default_language(&self) -> &str {
        self.language()
    }

    fn supported_languages(&self) -> &[&'static str] {
        SUPPORTED_LANGUAGES
    }

    fn supported_options(&self) -> &[&'static str] {
        SUPPORTED_OPTIONS
    }

    async fn get_tts_audio(
        &self,
        message: &str,
        language: &str,
        options: Option<&SynthesisOptions>,
    ) -> Option<AudioOutput> {
        let defaults = SynthesisOptions::default();
        match self
            .synthesize(message, language, options.unwrap_or(&defaults))
            .await
        {
            Ok(audio) => Some(audio),
            Err(e) => {
                debug!(error = %e, "Spokestack TTS produced no audio");
                None
            }
        }
    }
}
