//! Each exchange is bounded by its own timeout.

use crate::mock_server::{silent_endpoint, MockServerFixture, CLIENT_ID, SECRET, SUBMIT_PATH};
use spokestack_tts::{SpeechProvider, SpokestackClient, SynthesisMode, SynthesisOptions};
use std::io::Write;
use std::time::{Duration, Instant};

const TIMEOUT: Duration = Duration::from_millis(200);

#[tokio::test]
async fn test_submit_timeout_returns_none() {
    let (_listener, base) = silent_endpoint().await;
    let client = SpokestackClient::builder()
        .client_id(CLIENT_ID)
        .secret(SECRET)
        .base_url(format!("{}/v1", base))
        .timeout(TIMEOUT)
        .build()
        .unwrap();

    let started = Instant::now();
    let err = client
        .synthesize("Hello world", "en", &SynthesisOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "{}", err);
    assert!(started.elapsed() < Duration::from_secs(5));

    assert!(client.get_tts_audio("Hello world", "en", None).await.is_none());
}

#[tokio::test]
async fn test_download_timeout_returns_none() {
    let (_listener, silent) = silent_endpoint().await;
    let mut fixture = MockServerFixture::new().await;
    let response = serde_json::json!({
        "data": { "synthesizeText": { "url": format!("{}/stream/slow", silent) } }
    })
    .to_string();
    let _submit = fixture.mock_submit(200, &response).await;

    let client = fixture.client_with_timeout(TIMEOUT);
    let started = Instant::now();
    let err = client
        .synthesize("Hello world", "en", &SynthesisOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "{}", err);
    assert!(started.elapsed() < Duration::from_secs(5));

    assert!(client.get_tts_audio("Hello world", "en", None).await.is_none());
}

#[tokio::test]
async fn test_slow_exchanges_within_their_own_bounds_succeed() {
    // Each exchange takes more than half the timeout; together they exceed it.
    let delay = Duration::from_millis(250);
    let mut fixture = MockServerFixture::new().await;
    let response = fixture.stream_response(SynthesisMode::Text, "/stream/slow-ok");
    let _submit = fixture
        .server
        .mock("POST", SUBMIT_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_chunked_body(move |w| {
            std::thread::sleep(delay);
            w.write_all(response.as_bytes())
        })
        .create_async()
        .await;
    let _stream = fixture
        .server
        .mock("GET", "/stream/slow-ok")
        .with_status(200)
        .with_chunked_body(move |w| {
            std::thread::sleep(delay);
            w.write_all(b"abc")
        })
        .create_async()
        .await;

    let client = fixture.client_with_timeout(Duration::from_millis(400));
    let started = Instant::now();
    let audio = client
        .synthesize("Hello world", "en", &SynthesisOptions::default())
        .await
        .unwrap();
    assert_eq!(audio.data, b"abc".to_vec());
    assert!(started.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_dropping_the_call_abandons_it() {
    let (_listener, base) = silent_endpoint().await;
    let client = SpokestackClient::builder()
        .client_id(CLIENT_ID)
        .secret(SECRET)
        .base_url(format!("{}/v1", base))
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap();

    let outcome = tokio::time::timeout(
        Duration::from_millis(100),
        client.get_tts_audio("Hello world", "en", None),
    )
    .await;
    assert!(outcome.is_err());
}
