//! Request signing: `base64(HMAC-SHA256(secret, body))`.

use crate::{Error, ErrorContext, Result};
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Client identity and signing key.
///
/// The secret is only kept as a keyed MAC state and never rendered by `Debug`.
#[derive(Clone)]
pub struct ClientCredentials {
    client_id: String,
    mac: HmacSha256,
}

impl ClientCredentials {
    /// `client_id` must parse as a UUID; it is stored in canonical hyphenated form.
    pub fn new(client_id: &str, secret: &[u8]) -> Result<Self> {
        let client_id = Uuid::parse_str(client_id)
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("Client ID is not a valid UUID: {}", e),
                    ErrorContext::new()
                        .with_field_path("client_id")
                        .with_source("config"),
                )
            })?
            .to_string();
        let mac = HmacSha256::new_from_slice(secret).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid secret: {}", e),
                ErrorContext::new()
                    .with_field_path("secret")
                    .with_source("config"),
            )
        })?;
        Ok(Self { client_id, mac })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(body);
        base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
    }

    pub fn seal(&self, body: String) -> SignedEnvelope {
        let signature = self.sign(body.as_bytes());
        SignedEnvelope { body, signature }
    }

    /// `Authorization` header value for a sealed body.
    pub fn authorization(&self, envelope: &SignedEnvelope) -> String {
        format!("Spokestack {}:{}", self.client_id, envelope.signature)
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Serialized request body and its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    pub body: String,
    pub signature: String,
}
