//! Spokestack TTS client.

use super::request::SynthesisRequest;
use super::response::SynthesisResponse;
use super::signing::ClientCredentials;
use super::types::{AudioFormat, AudioOutput, SynthesisMode, SynthesisOptions};
use crate::config::{is_supported_language, SpokestackConfig, SpokestackSettings};
use crate::transport::{HttpTransport, TransportError};
use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

/// Synthesis endpoint of the Spokestack API.
pub const SPOKESTACK_URL: &str = "https://api.spokestack.io/v1";

/// Client for Spokestack speech synthesis.
///
/// Holds only immutable credentials and defaults, so one instance can serve
/// concurrent calls (share it behind an `Arc`).
pub struct SpokestackClient {
    transport: HttpTransport,
    endpoint: Url,
    credentials: ClientCredentials,
    language: String,
    default_mode: String,
    default_voice: String,
}

impl SpokestackClient {
    pub fn builder() -> SpokestackClientBuilder {
        SpokestackClientBuilder::new()
    }

    /// Create a client over the host's shared HTTP client.
    pub fn new(settings: SpokestackSettings, http_client: reqwest::Client) -> Result<Self> {
        let endpoint = parse_endpoint(SPOKESTACK_URL)?;
        Ok(Self::from_parts(settings, http_client, endpoint))
    }

    fn from_parts(
        settings: SpokestackSettings,
        http_client: reqwest::Client,
        endpoint: Url,
    ) -> Self {
        Self {
            transport: HttpTransport::new(http_client, settings.timeout),
            endpoint,
            credentials: settings.credentials,
            language: settings.language,
            default_mode: settings.mode,
            default_voice: settings.voice,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn client_id(&self) -> &str {
        self.credentials.client_id()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    /// Resolve options against the configured defaults.
    pub fn request_for(
        &self,
        message: &str,
        options: &SynthesisOptions,
    ) -> Result<SynthesisRequest> {
        let voice = options.voice.as_deref().unwrap_or(&self.default_voice);
        let mode = options.mode.as_deref().unwrap_or(&self.default_mode);
        let mode = SynthesisMode::from_str(mode)?;
        Ok(SynthesisRequest::new(message, voice, mode))
    }

    /// Submit `message` for synthesis and download the resulting audio.
    ///
    /// Each of the two HTTP exchanges is bounded by the configured timeout.
    /// No retries are attempted. Every failure is logged before it is returned.
    pub async fn synthesize(
        &self,
        message: &str,
        language: &str,
        options: &SynthesisOptions,
    ) -> Result<AudioOutput> {
        if !is_supported_language(language) {
            warn!(language, "Unsupported language requested; synthesizing anyway");
        }

        let request = self.request_for(message, options).map_err(|e| {
            error!(error = %e, "Spokestack TTS request rejected");
            e
        })?;
        let stream_url = self.submit(&request).await?;
        let data = self.download(&stream_url).await?;

        debug!(
            operation = request.operation_name(),
            bytes = data.len(),
            "Spokestack TTS audio received"
        );
        Ok(AudioOutput {
            data,
            format: AudioFormat::Mp3,
        })
    }

    async fn submit(&self, request: &SynthesisRequest) -> Result<Url> {
        let operation = request.operation_name();
        let envelope = self.credentials.seal(request.to_body()?);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let authorization = HeaderValue::from_str(&self.credentials.authorization(&envelope))
            .map_err(|e| {
                Error::validation_with_context(
                    format!("Invalid Authorization header: {}", e),
                    ErrorContext::new().with_source("submit"),
                )
            })?;
        headers.insert(AUTHORIZATION, authorization);

        debug!(operation, voice = %request.voice, "Submitting Spokestack synthesis request");
        let reply = self
            .transport
            .post(&self.endpoint, headers, envelope.body)
            .await
            .map_err(|e| log_transport_failure("submit", e))?;

        if !reply.is_success() {
            let body = reply.text();
            error!(status = reply.status.as_u16(), body = %body, "Spokestack TTS error");
            return Err(Error::submit(Some(reply.status.as_u16()), body.into_owned()));
        }

        let response = SynthesisResponse::from_slice(&reply.body).map_err(|e| {
            error!(error = %e, body = %reply.text(), "Spokestack TTS response is not valid JSON");
            Error::submit(None, format!("Malformed synthesis response: {}", e))
        })?;

        let Some(stream_url) = response.stream_url(operation) else {
            let detail = response
                .error_summary()
                .unwrap_or_else(|| reply.text().into_owned());
            error!(operation, response = %detail, "No TTS URL found");
            return Err(Error::submit(
                None,
                format!("No stream URL for {}: {}", operation, detail),
            ));
        };

        Url::parse(stream_url).map_err(|e| {
            error!(url = stream_url, error = %e, "Spokestack TTS stream URL is invalid");
            Error::submit(None, format!("Invalid stream URL '{}': {}", stream_url, e))
        })
    }

    async fn download(&self, stream_url: &Url) -> Result<Vec<u8>> {
        debug!(url = %stream_url, "Downloading Spokestack TTS audio");
        let reply = self
            .transport
            .get(stream_url)
            .await
            .map_err(|e| log_transport_failure("download", e))?;

        if !reply.is_success() {
            let body = reply.text();
            error!(status = reply.status.as_u16(), body = %body, "Spokestack TTS audio error");
            return Err(Error::download(Some(reply.status.as_u16()), body.into_owned()));
        }

        Ok(reply.body.to_vec())
    }
}

fn log_transport_failure(stage: &'static str, e: TransportError) -> Error {
    if e.is_timeout() {
        error!(stage, "Spokestack TTS timed out");
    } else {
        error!(stage, error = %e, "Spokestack TTS transport failure");
    }
    Error::Transport(e)
}

fn parse_endpoint(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid endpoint URL '{}': {}", url, e),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_source("config"),
        )
    })
}

pub struct SpokestackClientBuilder {
    client_id: Option<String>,
    secret: Option<String>,
    language: Option<String>,
    mode: Option<String>,
    voice: Option<String>,
    timeout: Option<Duration>,
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl SpokestackClientBuilder {
    pub fn new() -> Self {
        Self {
            client_id: None,
            secret: None,
            language: None,
            mode: None,
            voice: None,
            timeout: None,
            base_url: None,
            http_client: None,
        }
    }

    /// Seed every field from a raw config.
    pub fn from_config(config: SpokestackConfig) -> Self {
        Self {
            client_id: Some(config.client_id),
            secret: Some(config.secret),
            language: Some(config.language),
            mode: Some(config.mode),
            voice: Some(config.voice),
            timeout: Some(Duration::from_secs(config.timeout_secs)),
            base_url: None,
            http_client: None,
        }
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Default synthesis mode for calls that do not pass one.
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Default voice for calls that do not pass one.
    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Bound applied separately to the submit and download exchanges.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the synthesis endpoint (primarily for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Use the host's shared HTTP client instead of creating one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<SpokestackClient> {
        let client_id = self
            .client_id
            .ok_or_else(|| Error::configuration("Client ID must be specified"))?;
        let secret = self
            .secret
            .ok_or_else(|| Error::configuration("Secret must be specified"))?;

        let mut config = SpokestackConfig::new(client_id, secret);
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(voice) = self.voice {
            config.voice = voice;
        }
        let mut settings = config.validate()?;

        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                return Err(Error::configuration_with_context(
                    "Timeout must be greater than 0",
                    ErrorContext::new()
                        .with_field_path("timeout_secs")
                        .with_source("config"),
                ));
            }
            settings.timeout = timeout;
        }

        let endpoint = parse_endpoint(self.base_url.as_deref().unwrap_or(SPOKESTACK_URL))?;
        let http_client = match self.http_client {
            Some(client) => client,
            None => HttpTransport::default_client()?,
        };

        Ok(SpokestackClient::from_parts(settings, http_client, endpoint))
    }
}

impl Default for SpokestackClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
