use async_trait::async_trait;

use crate::domain::StagedAudio;

/// Speech recognition over a validated, staged sample. No internal retries;
/// a failed transcription is terminal for the current attempt.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio: &StagedAudio) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio could not be understood")]
    Unintelligible,
    #[error("transcription service error: {0}")]
    ServiceError(String),
}
