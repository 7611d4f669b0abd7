use async_trait::async_trait;

use crate::domain::{AudioFormat, StagedAudio};

/// Lifecycle owner for the transient audio artifacts a pipeline invocation
/// creates. Every staged artifact belongs to exactly one invocation and is
/// discarded when that invocation ends, on every exit path.
#[async_trait]
pub trait ScratchStore: Send + Sync {
    async fn stage(
        &self,
        identity: &str,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<StagedAudio, ScratchStoreError>;

    /// Remove a staged artifact. Implementations retry transient failures a
    /// bounded number of times before giving up.
    async fn discard(&self, audio: &StagedAudio) -> Result<(), ScratchStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ScratchStoreError {
    #[error("staging failed: {0}")]
    StagingFailed(String),
    #[error("cleanup failed after {attempts} attempts: {source}")]
    CleanupFailed {
        attempts: u32,
        #[source]
        source: std::io::Error,
    },
}
