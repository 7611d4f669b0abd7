use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::application::ports::{ScratchStore, ScratchStoreError};
use crate::domain::{AudioFormat, StagedAudio};

const CLEANUP_ATTEMPTS: u32 = 3;
const CLEANUP_BACKOFF: Duration = Duration::from_millis(100);

// Tie-breaker for stagings that land on the same timestamp.
static STAGE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Filesystem scratch space for in-flight pipeline audio. Filenames combine
/// the identity with a nanosecond timestamp and a process-wide sequence
/// number, so concurrent invocations sharing the directory never collide.
pub struct FsScratchStore {
    dir: PathBuf,
}

impl FsScratchStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn scratch_file_name(identity: &str) -> String {
        let sanitized: String = identity
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let sequence = STAGE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}_{}.wav", sanitized, nanos, sequence)
    }
}

#[async_trait]
impl ScratchStore for FsScratchStore {
    async fn stage(
        &self,
        identity: &str,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<StagedAudio, ScratchStoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ScratchStoreError::StagingFailed(format!("create scratch dir: {}", e)))?;

        let path = self.dir.join(Self::scratch_file_name(identity));
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| {
                ScratchStoreError::StagingFailed(format!("write {}: {}", path.display(), e))
            })?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Staged scratch audio");

        Ok(StagedAudio { path, format })
    }

    async fn discard(&self, audio: &StagedAudio) -> Result<(), ScratchStoreError> {
        let path = audio.path.clone();
        remove_with_retry(CLEANUP_ATTEMPTS, CLEANUP_BACKOFF, || {
            let path = path.clone();
            async move {
                match tokio::fs::remove_file(&path).await {
                    // Already gone is a successful discard.
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                    other => other,
                }
            }
        })
        .await
    }
}

/// Bounded-retry removal: transient failures (another process briefly
/// holding the file) get `attempts` tries with a fixed backoff between
/// them; the last error is returned once the budget is spent.
pub async fn remove_with_retry<F, Fut>(
    attempts: u32,
    backoff: Duration,
    mut remove: F,
) -> Result<(), ScratchStoreError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::io::Result<()>>,
{
    let mut last_error = None;

    for attempt in 1..=attempts {
        match remove().await {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!(attempt, error = %e, "Scratch removal attempt failed");
                last_error = Some(e);
                if attempt < attempts {
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    Err(ScratchStoreError::CleanupFailed {
        attempts,
        source: last_error.unwrap_or_else(|| std::io::Error::other("removal failed")),
    })
}
