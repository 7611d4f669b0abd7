use crate::domain::AudioFormat;

/// Format gate that runs before any model inference. Pure check over header
/// metadata; rejected audio never reaches the expensive ports.
pub trait AudioValidator: Send + Sync {
    fn validate(&self, data: &[u8]) -> Result<AudioFormat, AudioValidationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioValidationError {
    #[error("audio must be mono, got {0} channels")]
    NotMono(u16),
    #[error("audio must be 16-bit, got {0} bits per sample")]
    NotSixteenBit(u16),
    #[error("sample rate must be at least {min} Hz, got {got} Hz")]
    SampleRateTooLow { got: u32, min: u32 },
    #[error("unreadable audio header: {0}")]
    UnreadableHeader(String),
}
