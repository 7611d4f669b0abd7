mod in_memory_credential_repository;
mod pg_credential_repository;

pub use in_memory_credential_repository::InMemoryCredentialRepository;
pub use pg_credential_repository::PgCredentialRepository;
