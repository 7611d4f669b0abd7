mod audio;
mod passphrase;
mod voice_credential;
mod voiceprint;

pub use audio::{AudioFormat, StagedAudio};
pub use passphrase::normalize_passphrase;
pub use voice_credential::{UserProfile, VoiceCredential};
pub use voiceprint::{match_percentage, Voiceprint, VoiceprintError};
