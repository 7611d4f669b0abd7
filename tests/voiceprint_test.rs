use voicegate::domain::{match_percentage, normalize_passphrase, Voiceprint, VoiceprintError};

#[test]
fn given_identical_vectors_when_computing_similarity_then_returns_one() {
    let a = Voiceprint::new(vec![0.6, 0.8, 0.0]);
    let b = Voiceprint::new(vec![0.6, 0.8, 0.0]);

    let similarity = a.cosine_similarity(&b).unwrap();
    assert!((similarity - 1.0).abs() < 0.001);
}

#[test]
fn given_opposite_vectors_when_computing_similarity_then_returns_negative_one() {
    let a = Voiceprint::new(vec![1.0, 2.0, -3.0]);
    let b = Voiceprint::new(vec![-1.0, -2.0, 3.0]);

    let similarity = a.cosine_similarity(&b).unwrap();
    assert!((similarity + 1.0).abs() < 0.001);
}

#[test]
fn given_two_vectors_when_computing_similarity_then_is_symmetric() {
    let a = Voiceprint::new(vec![0.3, -0.7, 2.0]);
    let b = Voiceprint::new(vec![1.5, 0.2, 0.4]);

    assert_eq!(
        a.cosine_similarity(&b).unwrap(),
        b.cosine_similarity(&a).unwrap()
    );
}

#[test]
fn given_zero_vector_when_computing_similarity_then_returns_degenerate_error() {
    let zero = Voiceprint::new(vec![0.0, 0.0, 0.0]);
    let other = Voiceprint::new(vec![1.0, 0.0, 0.0]);

    let result = zero.cosine_similarity(&other);
    assert_eq!(result, Err(VoiceprintError::DegenerateEmbedding));

    let result = other.cosine_similarity(&zero);
    assert_eq!(result, Err(VoiceprintError::DegenerateEmbedding));
}

#[test]
fn given_mismatched_lengths_when_computing_similarity_then_returns_dimension_error() {
    let a = Voiceprint::new(vec![1.0, 0.0]);
    let b = Voiceprint::new(vec![1.0, 0.0, 0.0]);

    let result = a.cosine_similarity(&b);
    assert_eq!(
        result,
        Err(VoiceprintError::DimensionMismatch { left: 2, right: 3 })
    );
}

#[test]
fn given_full_similarity_when_rescaling_then_returns_one_hundred() {
    assert_eq!(match_percentage(1.0), 100.0);
}

#[test]
fn given_half_similarity_when_rescaling_then_rounds_to_two_decimals() {
    assert_eq!(match_percentage(0.5), 50.0);
    assert_eq!(match_percentage(0.123456), 12.35);
}

#[test]
fn given_negative_similarity_when_rescaling_then_sign_is_preserved() {
    assert_eq!(match_percentage(-0.25), -25.0);
}

#[test]
fn given_voiceprint_when_round_tripping_le_bytes_then_values_survive() {
    let original = Voiceprint::new(vec![0.1, -2.5, 3.75, 0.0]);

    let bytes = original.to_le_bytes();
    let restored = Voiceprint::from_le_bytes(&bytes).unwrap();

    assert_eq!(original, restored);
}

#[test]
fn given_truncated_bytes_when_decoding_voiceprint_then_returns_encoding_error() {
    let result = Voiceprint::from_le_bytes(&[0u8, 1, 2]);
    assert!(matches!(result, Err(VoiceprintError::InvalidEncoding(_))));
}

#[test]
fn given_mixed_case_and_spacing_when_normalizing_passphrase_then_forms_match() {
    assert_eq!(normalize_passphrase("  Open   Sesame "), "open sesame");
    assert_eq!(
        normalize_passphrase("open sesame"),
        normalize_passphrase("OPEN\tSESAME")
    );
}
