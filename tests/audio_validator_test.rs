use std::io::Cursor;

use voicegate::application::ports::{AudioValidationError, AudioValidator};
use voicegate::infrastructure::audio::WavFormatValidator;

fn wav_bytes(channels: u16, bits_per_sample: u16, sample_rate: u32, seconds: f32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        let frames = (sample_rate as f32 * seconds) as u32;
        for _ in 0..frames * channels as u32 {
            if bits_per_sample == 8 {
                writer.write_sample(0i8).unwrap();
            } else {
                writer.write_sample(0i16).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

fn validator() -> WavFormatValidator {
    WavFormatValidator::new(1, 16, 16_000)
}

#[test]
fn given_mono_sixteen_bit_sixteen_khz_when_validating_then_accepts_with_metadata() {
    let data = wav_bytes(1, 16, 16_000, 1.0);

    let format = validator().validate(&data).unwrap();

    assert_eq!(format.channels, 1);
    assert_eq!(format.bits_per_sample, 16);
    assert_eq!(format.sample_rate, 16_000);
    assert!((format.duration_secs - 1.0).abs() < 0.01);
}

#[test]
fn given_higher_sample_rate_when_validating_then_accepts() {
    let data = wav_bytes(1, 16, 44_100, 0.5);

    assert!(validator().validate(&data).is_ok());
}

#[test]
fn given_stereo_audio_when_validating_then_rejects_naming_channel_rule() {
    let data = wav_bytes(2, 16, 16_000, 0.5);

    let error = validator().validate(&data).unwrap_err();
    assert!(matches!(error, AudioValidationError::NotMono(2)));
    assert!(error.to_string().contains("mono"));
}

#[test]
fn given_eight_bit_audio_when_validating_then_rejects_naming_bit_depth_rule() {
    let data = wav_bytes(1, 8, 16_000, 0.5);

    let error = validator().validate(&data).unwrap_err();
    assert!(matches!(error, AudioValidationError::NotSixteenBit(8)));
    assert!(error.to_string().contains("16-bit"));
}

#[test]
fn given_low_sample_rate_when_validating_then_rejects_naming_rate_rule() {
    let data = wav_bytes(1, 16, 8_000, 0.5);

    let error = validator().validate(&data).unwrap_err();
    assert!(matches!(
        error,
        AudioValidationError::SampleRateTooLow {
            got: 8_000,
            min: 16_000
        }
    ));
    assert!(error.to_string().contains("sample rate"));
}

#[test]
fn given_garbage_bytes_when_validating_then_rejects_as_unreadable() {
    let error = validator().validate(b"definitely not a wav file").unwrap_err();
    assert!(matches!(error, AudioValidationError::UnreadableHeader(_)));
}
