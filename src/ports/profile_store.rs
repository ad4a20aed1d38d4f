//! ProfileStore port - Interface for the durable profile store.
//!
//! The store holds exactly one profile. Callers treat every failure as
//! non-fatal: the controller keeps working from memory and the cache mirror.

use async_trait::async_trait;

use crate::domain::tracking::UserProfile;

/// Errors that can occur during durable store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store is unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize profile: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize profile: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for the durable profile store
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Prepare the store for use (open the database, create directories).
    ///
    /// # Errors
    /// Returns `StoreError::Unavailable` if the store cannot be used this session
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Read the stored profile
    ///
    /// # Returns
    /// `None` if nothing has been stored yet
    async fn read_profile(&self) -> Result<Option<UserProfile>, StoreError>;

    /// Replace the stored profile
    ///
    /// # Errors
    /// Returns `StoreError` if the write fails
    async fn write_profile(&self, profile: &UserProfile) -> Result<(), StoreError>;
}
