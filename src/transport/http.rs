use bytes::{Bytes, BytesMut};
use futures::TryStreamExt;
use reqwest::header::HeaderMap;
use reqwest::{Proxy, StatusCode};
use std::borrow::Cow;
use std::env;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: Bytes,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body decoded lossily, for diagnostics.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Wrap a shared client. Every exchange is bounded by `timeout`.
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Build a standalone client for callers that do not share one.
    ///
    /// Env overrides:
    /// - `SPOKESTACK_HTTP_POOL_MAX_IDLE_PER_HOST` (default 8)
    /// - `SPOKESTACK_PROXY_URL`
    pub fn default_client() -> Result<reqwest::Client, TransportError> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(
                env::var("SPOKESTACK_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(8),
            )
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Ok(proxy_url) = env::var("SPOKESTACK_PROXY_URL") {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        builder
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {}", e)))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn post(
        &self,
        url: &Url,
        headers: HeaderMap,
        body: String,
    ) -> Result<HttpReply, TransportError> {
        let request = self.client.post(url.clone()).headers(headers).body(body);
        self.bounded(async move { read_reply(request.send().await?).await })
            .await
    }

    pub async fn get(&self, url: &Url) -> Result<HttpReply, TransportError> {
        let request = self.client.get(url.clone());
        self.bounded(async move { read_reply(request.send().await?).await })
            .await
    }

    async fn bounded<F>(&self, exchange: F) -> Result<HttpReply, TransportError>
    where
        F: Future<Output = Result<HttpReply, reqwest::Error>>,
    {
        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(reply) => reply.map_err(TransportError::Http),
            Err(_) => Err(TransportError::Timeout(self.timeout)),
        }
    }
}

// Chunks are appended in arrival order; no size cap.
async fn read_reply(response: reqwest::Response) -> Result<HttpReply, reqwest::Error> {
    let status = response.status();
    let mut chunks = Box::pin(response.bytes_stream());
    let mut body = BytesMut::new();
    while let Some(chunk) = chunks.try_next().await? {
        body.extend_from_slice(&chunk);
    }
    Ok(HttpReply {
        status,
        body: body.freeze(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Timeout(_) => true,
            TransportError::Http(e) => e.is_timeout(),
            TransportError::Other(_) => false,
        }
    }
}
