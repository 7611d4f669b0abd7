use std::path::PathBuf;

/// Format metadata derived from an uploaded sample's WAV header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioFormat {
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_rate: u32,
    pub duration_secs: f32,
}

/// One pipeline invocation's on-disk audio artifact. Owned exclusively by
/// that invocation and discarded when it ends.
#[derive(Debug, Clone)]
pub struct StagedAudio {
    pub path: PathBuf,
    pub format: AudioFormat,
}
