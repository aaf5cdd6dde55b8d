//! Integration tests for the Translate TTS adapter
//!
//! A local wiremock server stands in for the backend, so these tests cover
//! request shape, chunk concatenation and error mapping without network
//! access.

use std::time::Duration;

use bytes::Bytes;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prosody_tts::core::generator::SpeechGenerator;
use prosody_tts::core::prosody::{PresetCatalog, ProsodyPipeline, SLOW_CHANT_PRESET};
use prosody_tts::core::synthesis::{
    SynthesisAdapter, SynthesisConfig, SynthesisError, TranslateTts, create_synthesis_adapter,
};
use prosody_tts::errors::ProsodyError;

fn config_for(server: &MockServer) -> SynthesisConfig {
    SynthesisConfig {
        base_url: server.uri(),
        timeout_seconds: 2,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_single_chunk_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("q", "hello. ."))
        .and(query_param("tl", "en"))
        .and(query_param("client", "tw-ob"))
        .and(query_param("ttsspeed", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3audio".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let tts = TranslateTts::new(config_for(&server)).unwrap();
    let audio = tts.synthesize("hello. . ", false).await.unwrap();

    assert_eq!(audio, Bytes::from_static(b"ID3audio"));
}

#[tokio::test]
async fn test_slow_flag_sets_speed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("ttsspeed", "0.3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"slow".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let tts = TranslateTts::new(config_for(&server)).unwrap();
    let audio = tts.synthesize("sun", true).await.unwrap();
    assert_eq!(audio, Bytes::from_static(b"slow"));
}

#[tokio::test]
async fn test_long_text_is_chunked_and_concatenated_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("idx", "0"))
        .and(query_param("total", "2"))
        .and(query_param("q", "aaaa bbbb"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first-".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("idx", "1"))
        .and(query_param("total", "2"))
        .and(query_param("q", "cccc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"second".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let config = SynthesisConfig {
        max_chunk_chars: 10,
        ..config_for(&server)
    };
    let tts = TranslateTts::new(config).unwrap();
    let audio = tts.synthesize("aaaa bbbb cccc", false).await.unwrap();

    assert_eq!(audio, Bytes::from_static(b"first-second"));
}

#[tokio::test]
async fn test_backend_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let tts = TranslateTts::new(config_for(&server)).unwrap();
    let err = tts.synthesize("hello", false).await.unwrap_err();

    assert_eq!(
        err,
        SynthesisError::Backend {
            status: 503,
            message: "overloaded".to_string()
        }
    );
}

#[tokio::test]
async fn test_failed_chunk_fails_whole_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("idx", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"partial".to_vec()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("idx", "1"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let config = SynthesisConfig {
        max_chunk_chars: 10,
        ..config_for(&server)
    };
    let tts = TranslateTts::new(config).unwrap();
    let result = tts.synthesize("aaaa bbbb cccc", false).await;

    assert!(matches!(
        result,
        Err(SynthesisError::Backend { status: 429, .. })
    ));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"late".to_vec())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = SynthesisConfig {
        timeout_seconds: 1,
        ..config_for(&server)
    };
    let tts = TranslateTts::new(config).unwrap();
    let err = tts.synthesize("hello", false).await.unwrap_err();

    assert_eq!(err, SynthesisError::Timeout(1));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let config = SynthesisConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    };
    let tts = TranslateTts::new(config).unwrap();
    let err = tts.synthesize("hello", false).await.unwrap_err();

    assert!(matches!(err, SynthesisError::Network(_)));
}

#[tokio::test]
async fn test_generator_sends_final_text_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("q", "SUUN ~ riisees. ."))
        .and(query_param("ttsspeed", "0.3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"chant".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = create_synthesis_adapter("gtts", config_for(&server)).unwrap();
    let generator = SpeechGenerator::new(ProsodyPipeline::default(), adapter);
    let params = PresetCatalog::builtin().resolve(SLOW_CHANT_PRESET).unwrap();

    let speech = generator.generate("sun rises", &params).await.unwrap();

    assert!(speech.slow);
    assert_eq!(speech.final_text.as_str(), "SUUN ~ riisees. . ");
    assert_eq!(speech.audio, Bytes::from_static(b"chant"));
    assert_eq!(speech.provider, "google-translate");
}

#[tokio::test]
async fn test_generator_wraps_backend_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = create_synthesis_adapter("google-translate", config_for(&server)).unwrap();
    let generator = SpeechGenerator::new(ProsodyPipeline::default(), adapter);

    let result = generator.generate("hello", &Default::default()).await;

    assert!(matches!(
        result,
        Err(ProsodyError::Synthesis(SynthesisError::Backend { status: 500, .. }))
    ));
}
