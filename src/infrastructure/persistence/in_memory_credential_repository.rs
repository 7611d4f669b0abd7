use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{CredentialRepository, RepositoryError};
use crate::domain::VoiceCredential;

/// Map-backed repository for tests and local runs. Keeps the same
/// atomic-create guarantee as the Postgres adapter: concurrent enrollments
/// for one username admit exactly one winner.
#[derive(Default)]
pub struct InMemoryCredentialRepository {
    credentials: Mutex<HashMap<String, VoiceCredential>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<VoiceCredential>, RepositoryError> {
        let credentials = self
            .credentials
            .lock()
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        Ok(credentials.get(username).cloned())
    }

    async fn create(&self, credential: &VoiceCredential) -> Result<(), RepositoryError> {
        let mut credentials = self
            .credentials
            .lock()
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if credentials.contains_key(&credential.username) {
            return Err(RepositoryError::Duplicate(credential.username.clone()));
        }

        credentials.insert(credential.username.clone(), credential.clone());
        Ok(())
    }
}
