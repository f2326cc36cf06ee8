//! # spokestack-tts
//!
//! Client adapter for the Spokestack text-to-speech API.
//!
//! ## Overview
//!
//! A synthesis call is two sequential HTTP exchanges:
//!
//! 1. a GraphQL request, signed with `HMAC-SHA256` over the body, is POSTed to the
//!    synthesis endpoint and answers with a short-lived stream URL;
//! 2. the stream URL is downloaded and its MP3 bytes are returned.
//!
//! Each exchange has its own timeout (10 seconds by default). Nothing is retried
//! or cached, and the client holds no mutable state, so one instance can serve
//! concurrent calls.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spokestack_tts::{SpeechProvider, SpokestackClient, SynthesisOptions};
//!
//! #[tokio::main]
//! async fn main() -> spokestack_tts::Result<()> {
//!     let client = SpokestackClient::builder()
//!         .client_id("8d7b5b7e-3f4a-4c1e-9b2d-6a1f0e3c5d7b")
//!         .secret("your-api-secret")
//!         .build()?;
//!
//!     // Typed errors
//!     let audio = client
//!         .synthesize("Hello world", "en", &SynthesisOptions::default())
//!         .await?;
//!     println!("{} bytes of {}", audio.data.len(), audio.format);
//!
//!     // Host-style surface: failures are logged and become `None`
//!     let _maybe_audio = client.get_tts_audio("Hello again", "en", None).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Raw and validated client configuration |
//! | [`tts`] | Request construction, signing, response decoding and the client |
//! | [`provider`] | [`SpeechProvider`] trait implemented for hosts |
//! | [`transport`] | Time-bounded HTTP exchanges |

pub mod config;
pub mod provider;
pub mod transport;
pub mod tts;

pub use config::{SpokestackConfig, SpokestackSettings};
pub use provider::SpeechProvider;
pub use tts::{
    AudioFormat, AudioOutput, ClientCredentials, SpokestackClient, SpokestackClientBuilder,
    SynthesisMode, SynthesisOptions,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
