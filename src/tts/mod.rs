//! Spokestack text-to-speech: request construction, signing, submission and
//! audio download.

mod client;
mod request;
mod response;
mod signing;
mod types;

pub use client::{SpokestackClient, SpokestackClientBuilder, SPOKESTACK_URL};
pub use request::SynthesisRequest;
pub use response::{GraphqlError, StreamLocation, SynthesisResponse};
pub use signing::{ClientCredentials, SignedEnvelope};
pub use types::{AudioFormat, AudioOutput, SynthesisMode, SynthesisOptions};
