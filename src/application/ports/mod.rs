mod audio_validator;
mod credential_repository;
mod scratch_store;
mod speech_to_text;
mod voice_embedder;

pub use audio_validator::{AudioValidationError, AudioValidator};
pub use credential_repository::{CredentialRepository, RepositoryError};
pub use scratch_store::{ScratchStore, ScratchStoreError};
pub use speech_to_text::{SpeechToText, TranscriptionError};
pub use voice_embedder::{EmbeddingError, VoiceEmbedder};
