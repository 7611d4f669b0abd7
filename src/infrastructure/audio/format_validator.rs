use std::io::Cursor;

use crate::application::ports::{AudioValidationError, AudioValidator};
use crate::domain::AudioFormat;

/// WAV-header gate. The transport boundary guarantees a decodable WAV; this
/// checks the cheap preconditions (mono, 16-bit, minimum sample rate) from
/// the header alone, before any model inference runs.
pub struct WavFormatValidator {
    required_channels: u16,
    required_bits_per_sample: u16,
    min_sample_rate: u32,
}

impl WavFormatValidator {
    pub fn new(required_channels: u16, required_bits_per_sample: u16, min_sample_rate: u32) -> Self {
        Self {
            required_channels,
            required_bits_per_sample,
            min_sample_rate,
        }
    }
}

impl AudioValidator for WavFormatValidator {
    fn validate(&self, data: &[u8]) -> Result<AudioFormat, AudioValidationError> {
        let reader = hound::WavReader::new(Cursor::new(data))
            .map_err(|e| AudioValidationError::UnreadableHeader(e.to_string()))?;
        let spec = reader.spec();

        if spec.channels != self.required_channels {
            return Err(AudioValidationError::NotMono(spec.channels));
        }
        if spec.bits_per_sample != self.required_bits_per_sample {
            return Err(AudioValidationError::NotSixteenBit(spec.bits_per_sample));
        }
        if spec.sample_rate < self.min_sample_rate {
            return Err(AudioValidationError::SampleRateTooLow {
                got: spec.sample_rate,
                min: self.min_sample_rate,
            });
        }

        let duration_secs = reader.duration() as f32 / spec.sample_rate as f32;

        tracing::debug!(
            channels = spec.channels,
            bits_per_sample = spec.bits_per_sample,
            sample_rate = spec.sample_rate,
            duration_secs,
            "Audio sample passed format validation"
        );

        Ok(AudioFormat {
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            sample_rate: spec.sample_rate,
            duration_secs,
        })
    }
}
