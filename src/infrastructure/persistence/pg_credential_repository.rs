use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{CredentialRepository, RepositoryError};
use crate::domain::{UserProfile, VoiceCredential, Voiceprint};

pub struct PgCredentialRepository {
    pool: PgPool,
}

impl PgCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    username: String,
    full_name: String,
    email: String,
    date_of_birth: NaiveDate,
    passphrase: String,
    voiceprint: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_domain(self) -> Result<VoiceCredential, RepositoryError> {
        let voiceprint = Voiceprint::from_le_bytes(&self.voiceprint)
            .map_err(|e| RepositoryError::CorruptRecord(e.to_string()))?;

        Ok(VoiceCredential {
            username: self.username,
            profile: UserProfile {
                full_name: self.full_name,
                email: self.email,
                date_of_birth: self.date_of_birth,
            },
            passphrase: self.passphrase,
            voiceprint,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl CredentialRepository for PgCredentialRepository {
    #[instrument(skip(self))]
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<VoiceCredential>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT username, full_name, email, date_of_birth, passphrase, voiceprint, created_at
            FROM voice_credentials
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(CredentialRow::into_domain).transpose()
    }

    #[instrument(skip(self, credential), fields(username = %credential.username))]
    async fn create(&self, credential: &VoiceCredential) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO voice_credentials
                (username, full_name, email, date_of_birth, passphrase, voiceprint, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&credential.username)
        .bind(&credential.profile.full_name)
        .bind(&credential.profile.email)
        .bind(credential.profile.date_of_birth)
        .bind(&credential.passphrase)
        .bind(credential.voiceprint.to_le_bytes())
        .bind(credential.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(credential.username.clone())
            }
            _ => RepositoryError::QueryFailed(e.to_string()),
        })?;

        Ok(())
    }
}
