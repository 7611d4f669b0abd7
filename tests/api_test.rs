use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use voicegate::application::ports::{
    EmbeddingError, SpeechToText, TranscriptionError, VoiceEmbedder,
};
use voicegate::application::services::AuthenticationService;
use voicegate::domain::{StagedAudio, Voiceprint};
use voicegate::infrastructure::audio::{FsScratchStore, WavFormatValidator};
use voicegate::infrastructure::persistence::InMemoryCredentialRepository;
use voicegate::presentation::{create_router, AppState};

const TEST_THRESHOLD: f32 = 0.75;
const BOUNDARY: &str = "----voicegate-test-boundary";

struct MockSpeech {
    transcript: String,
}

#[async_trait::async_trait]
impl SpeechToText for MockSpeech {
    async fn transcribe(&self, _audio: &StagedAudio) -> Result<String, TranscriptionError> {
        Ok(self.transcript.clone())
    }
}

struct MockEmbedder {
    values: Vec<f32>,
}

#[async_trait::async_trait]
impl VoiceEmbedder for MockEmbedder {
    async fn embed(&self, _audio: &StagedAudio) -> Result<Voiceprint, EmbeddingError> {
        Ok(Voiceprint::new(self.values.clone()))
    }
}

fn wav_bytes() -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for _ in 0..3200 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

fn multipart_body(text_fields: &[(&str, &str)], audio: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in text_fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some(audio) = audio {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"audio\"; filename=\"sample.wav\"\r\nContent-Type: audio/wav\r\n\r\n",
                BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(audio);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn create_test_app(transcript: &str, embedding: Vec<f32>, scratch_dir: &std::path::Path) -> axum::Router {
    let auth_service = Arc::new(AuthenticationService::new(
        Arc::new(WavFormatValidator::new(1, 16, 16_000)),
        Arc::new(MockSpeech {
            transcript: transcript.to_string(),
        }),
        Arc::new(MockEmbedder { values: embedding }),
        Arc::new(InMemoryCredentialRepository::new()),
        Arc::new(FsScratchStore::new(scratch_dir)),
        TEST_THRESHOLD,
    ));

    create_router(AppState { auth_service })
}

fn enroll_fields<'a>(username: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("username", username),
        ("fullname", "Alice Liddell"),
        ("email", "alice@example.com"),
        ("dob", "1990-05-17"),
    ]
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app("open sesame", vec![0.6, 0.8], dir.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_valid_upload_when_enrolling_then_returns_ok() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app("open sesame", vec![0.6, 0.8], dir.path());

    let body = multipart_body(&enroll_fields("alice"), Some(&wav_bytes()));
    let response = app
        .oneshot(multipart_request("/api/v1/enroll", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_missing_audio_when_enrolling_then_returns_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app("open sesame", vec![0.6, 0.8], dir.path());

    let body = multipart_body(&enroll_fields("alice"), None);
    let response = app
        .oneshot(multipart_request("/api/v1/enroll", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_enrolled_identity_when_enrolling_again_then_returns_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app("open sesame", vec![0.6, 0.8], dir.path());

    let body = multipart_body(&enroll_fields("alice"), Some(&wav_bytes()));
    let first = app
        .clone()
        .oneshot(multipart_request("/api/v1/enroll", body))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let body = multipart_body(&enroll_fields("alice"), Some(&wav_bytes()));
    let second = app
        .oneshot(multipart_request("/api/v1/enroll", body))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn given_enrolled_identity_when_verifying_then_returns_ok() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app("open sesame", vec![0.6, 0.8], dir.path());

    let body = multipart_body(&enroll_fields("alice"), Some(&wav_bytes()));
    let enroll = app
        .clone()
        .oneshot(multipart_request("/api/v1/enroll", body))
        .await
        .unwrap();
    assert_eq!(enroll.status(), StatusCode::OK);

    let body = multipart_body(&[("username", "alice")], Some(&wav_bytes()));
    let verify = app
        .oneshot(multipart_request("/api/v1/verify", body))
        .await
        .unwrap();
    assert_eq!(verify.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_unknown_identity_when_verifying_then_returns_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app("open sesame", vec![0.6, 0.8], dir.path());

    let body = multipart_body(&[("username", "bob")], Some(&wav_bytes()));
    let response = app
        .oneshot(multipart_request("/api/v1/verify", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_non_wav_audio_when_verifying_then_returns_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app("open sesame", vec![0.6, 0.8], dir.path());

    let body = multipart_body(&enroll_fields("alice"), Some(&wav_bytes()));
    let enroll = app
        .clone()
        .oneshot(multipart_request("/api/v1/enroll", body))
        .await
        .unwrap();
    assert_eq!(enroll.status(), StatusCode::OK);

    let body = multipart_body(&[("username", "alice")], Some(b"not a wav file"));
    let response = app
        .oneshot(multipart_request("/api/v1/verify", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
