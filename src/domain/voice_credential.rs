use chrono::{DateTime, NaiveDate, Utc};

use super::passphrase::normalize_passphrase;
use super::Voiceprint;

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
}

/// An enrolled identity: the normalized passphrase text paired with the
/// speaker embedding captured at enrollment. Created whole at enrollment
/// and never mutated; re-enrollment replaces the record.
#[derive(Debug, Clone)]
pub struct VoiceCredential {
    pub username: String,
    pub profile: UserProfile,
    pub passphrase: String,
    pub voiceprint: Voiceprint,
    pub created_at: DateTime<Utc>,
}

impl VoiceCredential {
    pub fn new(
        username: String,
        profile: UserProfile,
        passphrase: &str,
        voiceprint: Voiceprint,
    ) -> Self {
        Self {
            username,
            profile,
            passphrase: normalize_passphrase(passphrase),
            voiceprint,
            created_at: Utc::now(),
        }
    }

    pub fn passphrase_matches(&self, transcript: &str) -> bool {
        normalize_passphrase(transcript) == self.passphrase
    }
}
