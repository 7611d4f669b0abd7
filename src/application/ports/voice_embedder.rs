use async_trait::async_trait;

use crate::domain::{StagedAudio, Voiceprint};

/// Speaker-embedding extraction over a validated, staged sample. The
/// returned vector is not normalized; normalization happens at scoring
/// time.
#[async_trait]
pub trait VoiceEmbedder: Send + Sync {
    async fn embed(&self, audio: &StagedAudio) -> Result<Voiceprint, EmbeddingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("audio preprocessing failed: {0}")]
    Preprocessing(String),
    #[error("embedding model inference failed: {0}")]
    Model(String),
}
