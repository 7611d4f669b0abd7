use std::sync::Arc;

use crate::application::ports::{
    AudioValidator, CredentialRepository, RepositoryError, ScratchStore, ScratchStoreError,
    SpeechToText, VoiceEmbedder,
};
use crate::domain::{match_percentage, StagedAudio, UserProfile, VoiceCredential, VoiceprintError};

/// Orchestrates the enrollment and verification pipelines. Each call is an
/// independent unit of work: steps run strictly in sequence, the first
/// failing step ends the attempt with a typed outcome, and the staged audio
/// artifact is discarded on every exit path.
pub struct AuthenticationService {
    validator: Arc<dyn AudioValidator>,
    speech: Arc<dyn SpeechToText>,
    embedder: Arc<dyn VoiceEmbedder>,
    credentials: Arc<dyn CredentialRepository>,
    scratch: Arc<dyn ScratchStore>,
    accept_threshold: f32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthFailure {
    #[error("invalid audio format: {reason}")]
    InvalidAudioFormat { reason: String },
    #[error("speech recognition failed")]
    SpeechRecognitionFailed,
    #[error("voice embedding generation failed")]
    EmbeddingGenerationFailed,
    #[error("passphrase does not match")]
    PassphraseMismatch,
    #[error("voiceprint does not match")]
    VoiceprintMismatch,
    #[error("identity not found")]
    IdentityNotFound,
    #[error("identity already enrolled")]
    DuplicateIdentity,
    #[error("degenerate voice embedding")]
    DegenerateEmbedding,
}

impl AuthFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            AuthFailure::InvalidAudioFormat { .. } => "invalid_audio_format",
            AuthFailure::SpeechRecognitionFailed => "speech_recognition_failed",
            AuthFailure::EmbeddingGenerationFailed => "embedding_generation_failed",
            AuthFailure::PassphraseMismatch => "passphrase_mismatch",
            AuthFailure::VoiceprintMismatch => "voiceprint_mismatch",
            AuthFailure::IdentityNotFound => "identity_not_found",
            AuthFailure::DuplicateIdentity => "duplicate_identity",
            AuthFailure::DegenerateEmbedding => "degenerate_embedding",
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    pub success: bool,
    pub match_percentage: f32,
    pub reason: String,
    pub failure: Option<AuthFailure>,
}

impl VerificationOutcome {
    fn accepted(match_percentage: f32) -> Self {
        Self {
            success: true,
            match_percentage,
            reason: "login successful".to_string(),
            failure: None,
        }
    }

    fn rejected(failure: AuthFailure, match_percentage: f32) -> Self {
        Self {
            success: false,
            match_percentage,
            reason: failure.to_string(),
            failure: Some(failure),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnrollmentOutcome {
    pub success: bool,
    pub passphrase: Option<String>,
    pub reason: String,
    pub failure: Option<AuthFailure>,
}

impl EnrollmentOutcome {
    fn accepted(passphrase: String) -> Self {
        Self {
            success: true,
            passphrase: Some(passphrase),
            reason: "enrollment successful".to_string(),
            failure: None,
        }
    }

    fn rejected(failure: AuthFailure) -> Self {
        Self {
            success: false,
            passphrase: None,
            reason: failure.to_string(),
            failure: Some(failure),
        }
    }
}

/// Infrastructure faults outside the authentication taxonomy. These map to
/// an operational error at the boundary, not to a decision outcome.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("credential store: {0}")]
    Repository(RepositoryError),
    #[error("scratch store: {0}")]
    Scratch(#[from] ScratchStoreError),
}

impl AuthenticationService {
    pub fn new(
        validator: Arc<dyn AudioValidator>,
        speech: Arc<dyn SpeechToText>,
        embedder: Arc<dyn VoiceEmbedder>,
        credentials: Arc<dyn CredentialRepository>,
        scratch: Arc<dyn ScratchStore>,
        accept_threshold: f32,
    ) -> Self {
        Self {
            validator,
            speech,
            embedder,
            credentials,
            scratch,
            accept_threshold,
        }
    }

    pub async fn enroll(
        &self,
        username: &str,
        profile: UserProfile,
        audio: &[u8],
    ) -> Result<EnrollmentOutcome, AuthServiceError> {
        let format = match self.validator.validate(audio) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(username, error = %e, "Enrollment audio rejected");
                return Ok(EnrollmentOutcome::rejected(AuthFailure::InvalidAudioFormat {
                    reason: e.to_string(),
                }));
            }
        };

        let staged = self.scratch.stage(username, audio, format).await?;
        let outcome = self.enroll_staged(username, profile, &staged).await;
        self.discard_artifact(&staged).await;
        outcome
    }

    async fn enroll_staged(
        &self,
        username: &str,
        profile: UserProfile,
        staged: &StagedAudio,
    ) -> Result<EnrollmentOutcome, AuthServiceError> {
        let transcript = match self.speech.transcribe(staged).await {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(username, error = %e, "Enrollment transcription failed");
                return Ok(EnrollmentOutcome::rejected(
                    AuthFailure::SpeechRecognitionFailed,
                ));
            }
        };

        let voiceprint = match self.embedder.embed(staged).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(username, error = %e, "Enrollment embedding failed");
                return Ok(EnrollmentOutcome::rejected(
                    AuthFailure::EmbeddingGenerationFailed,
                ));
            }
        };

        let credential =
            VoiceCredential::new(username.to_string(), profile, &transcript, voiceprint);

        // A credential with an empty passphrase could never be verified.
        if credential.passphrase.is_empty() {
            tracing::warn!(username, "Transcription produced an empty passphrase");
            return Ok(EnrollmentOutcome::rejected(
                AuthFailure::SpeechRecognitionFailed,
            ));
        }

        match self.credentials.create(&credential).await {
            Ok(()) => {
                tracing::info!(
                    username,
                    dimensions = credential.voiceprint.dimensions(),
                    "Enrollment completed"
                );
                Ok(EnrollmentOutcome::accepted(credential.passphrase))
            }
            Err(RepositoryError::Duplicate(_)) => {
                tracing::warn!(username, "Enrollment for already-enrolled identity");
                Ok(EnrollmentOutcome::rejected(AuthFailure::DuplicateIdentity))
            }
            Err(e) => Err(AuthServiceError::Repository(e)),
        }
    }

    pub async fn verify(
        &self,
        username: &str,
        audio: &[u8],
    ) -> Result<VerificationOutcome, AuthServiceError> {
        let credential = match self.credentials.find_by_username(username).await {
            Ok(Some(c)) => c,
            Ok(None) => {
                tracing::warn!(username, "Verification for unknown identity");
                return Ok(VerificationOutcome::rejected(
                    AuthFailure::IdentityNotFound,
                    0.0,
                ));
            }
            Err(e) => return Err(AuthServiceError::Repository(e)),
        };

        let format = match self.validator.validate(audio) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(username, error = %e, "Verification audio rejected");
                return Ok(VerificationOutcome::rejected(
                    AuthFailure::InvalidAudioFormat {
                        reason: e.to_string(),
                    },
                    0.0,
                ));
            }
        };

        let staged = self.scratch.stage(username, audio, format).await?;
        let outcome = self.verify_staged(&credential, &staged).await;
        self.discard_artifact(&staged).await;
        outcome
    }

    async fn verify_staged(
        &self,
        credential: &VoiceCredential,
        staged: &StagedAudio,
    ) -> Result<VerificationOutcome, AuthServiceError> {
        let username = credential.username.as_str();

        let transcript = match self.speech.transcribe(staged).await {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(username, error = %e, "Verification transcription failed");
                return Ok(VerificationOutcome::rejected(
                    AuthFailure::SpeechRecognitionFailed,
                    0.0,
                ));
            }
        };

        // Text gate before embedding extraction: when the spoken phrase is
        // wrong there is no reason to pay for model inference.
        if !credential.passphrase_matches(&transcript) {
            tracing::warn!(username, "Spoken passphrase does not match enrollment");
            return Ok(VerificationOutcome::rejected(
                AuthFailure::PassphraseMismatch,
                0.0,
            ));
        }

        let voiceprint = match self.embedder.embed(staged).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(username, error = %e, "Verification embedding failed");
                return Ok(VerificationOutcome::rejected(
                    AuthFailure::EmbeddingGenerationFailed,
                    0.0,
                ));
            }
        };

        let similarity = match voiceprint.cosine_similarity(&credential.voiceprint) {
            Ok(s) => s,
            Err(VoiceprintError::DegenerateEmbedding) => {
                tracing::error!(username, "Degenerate embedding during verification");
                return Ok(VerificationOutcome::rejected(
                    AuthFailure::DegenerateEmbedding,
                    0.0,
                ));
            }
            Err(e) => {
                tracing::error!(username, error = %e, "Stored and probe embeddings are incompatible");
                return Ok(VerificationOutcome::rejected(
                    AuthFailure::EmbeddingGenerationFailed,
                    0.0,
                ));
            }
        };

        let percentage = match_percentage(similarity);

        if similarity >= self.accept_threshold {
            tracing::info!(username, match_percentage = percentage, "Verification accepted");
            Ok(VerificationOutcome::accepted(percentage))
        } else {
            tracing::warn!(
                username,
                match_percentage = percentage,
                threshold = self.accept_threshold,
                "Voiceprint below acceptance threshold"
            );
            Ok(VerificationOutcome::rejected(
                AuthFailure::VoiceprintMismatch,
                percentage,
            ))
        }
    }

    /// Cleanup failure is operational noise, never part of the verdict.
    async fn discard_artifact(&self, staged: &StagedAudio) {
        if let Err(e) = self.scratch.discard(staged).await {
            tracing::warn!(
                path = %staged.path.display(),
                error = %e,
                "Failed to discard scratch audio"
            );
        }
    }
}
