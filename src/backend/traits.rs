//! Trait abstractions for the backend, enabling mocking in tests

use async_trait::async_trait;
use thiserror::Error;

use crate::state::wizard::FileHandle;
use crate::state::Establishment;

/// Backend call failures, surfaced to the user as transient notices
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend rejected the request ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("could not read file: {0}")]
    File(#[from] std::io::Error),
    #[error("not signed in")]
    NotSignedIn,
}

/// Row lookups and inserts against backend collections
#[allow(dead_code)]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Whether any row of `collection` has `column` equal to `value`
    async fn exists(
        &self,
        collection: &str,
        column: &str,
        value: &str,
    ) -> Result<bool, BackendError>;

    /// Insert a record, returning its id
    async fn create(
        &self,
        collection: &str,
        record: serde_json::Value,
    ) -> Result<String, BackendError>;

    /// Establishments owned by the given user
    async fn list_establishments(&self, owner_id: &str)
        -> Result<Vec<Establishment>, BackendError>;
}

/// Document storage for wizard attachments
#[allow(dead_code)]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store a chosen file under the owner/record prefix, returning the
    /// stored path
    async fn upload(
        &self,
        owner_id: &str,
        record_id: &str,
        field: &str,
        file: &FileHandle,
    ) -> Result<String, BackendError>;
}

/// Identity of the signed-in user
#[allow(dead_code)]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The acting user's id, if a session is active
    async fn current_user(&self) -> Option<String>;
}
