//! Successful synthesis against the mock API.

use crate::mock_server::MockServerFixture;
use spokestack_tts::tts::SynthesisRequest;
use spokestack_tts::{AudioFormat, SpeechProvider, SynthesisMode, SynthesisOptions};
use std::io::Write;
use std::sync::Arc;

const MP3_FRAME: &[u8] = b"\xff\xfb\x90\x64\x00\x0f\xf0\x00\x00\x69\x00\x00\x00\x08";

#[tokio::test]
async fn test_hello_world_end_to_end() {
    let mut fixture = MockServerFixture::new().await;
    let request = SynthesisRequest::new("Hello world", "demo-male", SynthesisMode::Text);
    let response = fixture.stream_response(SynthesisMode::Text, "/stream/1");
    let submit = fixture.mock_signed_submit(&request, 200, &response).await;
    let stream = fixture.mock_stream("/stream/1", 200, MP3_FRAME).await;

    let client = fixture.client();
    let audio = client
        .get_tts_audio("Hello world", "en", None)
        .await
        .expect("audio");

    assert_eq!(audio.format, AudioFormat::Mp3);
    assert_eq!(audio.format.as_str(), "mp3");
    assert_eq!(audio.data, MP3_FRAME);
    submit.assert_async().await;
    stream.assert_async().await;
}

#[tokio::test]
async fn test_options_select_voice_and_operation() {
    let mut fixture = MockServerFixture::new().await;
    let request = SynthesisRequest::new("# Release notes", "demo-female", SynthesisMode::Markdown);
    let response = fixture.stream_response(SynthesisMode::Markdown, "/stream/md");
    let submit = fixture.mock_signed_submit(&request, 200, &response).await;
    let stream = fixture.mock_stream("/stream/md", 200, MP3_FRAME).await;

    let options = SynthesisOptions::new()
        .with_voice("demo-female")
        .with_mode("markdown");
    let audio = fixture
        .client()
        .synthesize("# Release notes", "en", &options)
        .await
        .expect("audio");

    assert_eq!(audio.data, MP3_FRAME);
    submit.assert_async().await;
    stream.assert_async().await;
}

#[tokio::test]
async fn test_ssml_request() {
    let mut fixture = MockServerFixture::new().await;
    let message = "<speak>Hi <break time=\"1s\"/> there</speak>";
    let request = SynthesisRequest::new(message, "demo-male", SynthesisMode::Ssml);
    let response = fixture.stream_response(SynthesisMode::Ssml, "/stream/ssml");
    let submit = fixture.mock_signed_submit(&request, 200, &response).await;
    let _stream = fixture.mock_stream("/stream/ssml", 200, MP3_FRAME).await;

    let options = SynthesisOptions::new().with_mode("ssml");
    let audio = fixture.client().get_tts_audio(message, "en-us", Some(&options)).await;

    assert_eq!(audio.map(|a| a.data), Some(MP3_FRAME.to_vec()));
    submit.assert_async().await;
}

#[tokio::test]
async fn test_chunked_download_is_accumulated_in_order() {
    let mut fixture = MockServerFixture::new().await;
    let response = fixture.stream_response(SynthesisMode::Text, "/stream/chunked");
    let _submit = fixture.mock_submit(200, &response).await;
    let _stream = fixture
        .server
        .mock("GET", "/stream/chunked")
        .with_status(200)
        .with_chunked_body(|w| {
            w.write_all(b"\xff\xfb")?;
            w.write_all(b"first-")?;
            w.write_all(b"second-")?;
            w.write_all(b"third")
        })
        .create_async()
        .await;

    let audio = fixture
        .client()
        .get_tts_audio("Hello world", "en", None)
        .await
        .expect("audio");

    assert_eq!(audio.data, b"\xff\xfbfirst-second-third".to_vec());
}

#[tokio::test]
async fn test_unsupported_language_still_synthesizes() {
    let mut fixture = MockServerFixture::new().await;
    let response = fixture.stream_response(SynthesisMode::Text, "/stream/fr");
    let _submit = fixture.mock_submit(200, &response).await;
    let _stream = fixture.mock_stream("/stream/fr", 200, MP3_FRAME).await;

    let audio = fixture.client().get_tts_audio("Bonjour", "fr", None).await;
    assert!(audio.is_some());
}

#[tokio::test]
async fn test_concurrent_calls_do_not_interfere() {
    let mut fixture = MockServerFixture::new().await;
    let first = SynthesisRequest::new("first message", "demo-male", SynthesisMode::Text);
    let second = SynthesisRequest::new("second message", "demo-male", SynthesisMode::Text);
    let first_response = fixture.stream_response(SynthesisMode::Text, "/stream/a");
    let second_response = fixture.stream_response(SynthesisMode::Text, "/stream/b");
    let _first_submit = fixture.mock_signed_submit(&first, 200, &first_response).await;
    let _second_submit = fixture.mock_signed_submit(&second, 200, &second_response).await;
    let _a = fixture.mock_stream("/stream/a", 200, b"audio-a").await;
    let _b = fixture.mock_stream("/stream/b", 200, b"audio-b").await;

    let provider: Arc<dyn SpeechProvider> = Arc::new(fixture.client());
    let (a, b) = tokio::join!(
        provider.get_tts_audio("first message", "en", None),
        provider.get_tts_audio("second message", "en", None),
    );

    assert_eq!(a.map(|a| a.data), Some(b"audio-a".to_vec()));
    assert_eq!(b.map(|b| b.data), Some(b"audio-b".to_vec()));
}
