use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{SpeechToText, TranscriptionError};
use crate::domain::StagedAudio;

/// Client for the remote speech-recognition service. The staged WAV is
/// posted as multipart form data and the service answers with a plain-text
/// transcript. The service may calibrate against ambient noise over the
/// leading segment of the same sample; the window is forwarded as a form
/// field and is invisible to callers of the port.
pub struct HttpSpeechEngine {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    calibration_ms: Option<u64>,
}

impl HttpSpeechEngine {
    pub fn new(
        base_url: String,
        model: String,
        api_key: Option<String>,
        timeout: Duration,
        calibration_ms: Option<u64>,
    ) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranscriptionError::ServiceError(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            model,
            api_key,
            calibration_ms,
        })
    }
}

#[async_trait]
impl SpeechToText for HttpSpeechEngine {
    async fn transcribe(&self, audio: &StagedAudio) -> Result<String, TranscriptionError> {
        let data = tokio::fs::read(&audio.path)
            .await
            .map_err(|e| TranscriptionError::ServiceError(format!("read staged audio: {}", e)))?;

        let url = format!("{}/v1/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(data)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::ServiceError(format!("mime: {}", e)))?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);

        if let Some(ms) = self.calibration_ms {
            form = form.text("calibration_ms", ms.to_string());
        }

        tracing::debug!(
            model = %self.model,
            duration_secs = audio.format.duration_secs,
            "Sending audio to speech service"
        );

        let mut request = self.client.post(&url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranscriptionError::ServiceError(format!("request: {}", e)))?;

        // The service answers 422 when it produced no confident transcript.
        if response.status() == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Err(TranscriptionError::Unintelligible);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ServiceError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| TranscriptionError::ServiceError(format!("body: {}", e)))?;
        let transcript = transcript.trim().to_string();

        if transcript.is_empty() {
            return Err(TranscriptionError::Unintelligible);
        }

        tracing::info!(chars = transcript.len(), "Transcription completed");

        Ok(transcript)
    }
}
