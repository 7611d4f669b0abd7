use async_trait::async_trait;

use crate::domain::VoiceCredential;

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<VoiceCredential>, RepositoryError>;

    /// Atomic insert. At most one credential may exist per username; a
    /// concurrent second insert for the same username fails with
    /// [`RepositoryError::Duplicate`], never a partial record.
    async fn create(&self, credential: &VoiceCredential) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("identity already enrolled: {0}")]
    Duplicate(String),
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("corrupt credential record: {0}")]
    CorruptRecord(String),
}
