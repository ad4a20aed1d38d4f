//! ProfileCache port - Interface for the fast local mirror of the profile.
//!
//! The cache is read synchronously at startup so a profile is available
//! before the durable store has been touched, and it is rewritten after
//! every committed mutation.

use crate::domain::tracking::UserProfile;

/// Errors that can occur while reading or writing the cache mirror
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cached profile is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to serialize profile: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for the profile cache mirror
pub trait ProfileCache: Send + Sync {
    /// Load the cached profile, `None` if the cache is empty.
    fn load(&self) -> Result<Option<UserProfile>, CacheError>;

    /// Overwrite the cached profile.
    fn store(&self, profile: &UserProfile) -> Result<(), CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ProfileCache) {}

    #[test]
    fn cache_error_corrupt_displays_reason() {
        let err = CacheError::Corrupt("expected value at line 1".to_string());
        assert!(err.to_string().starts_with("Cached profile is corrupt"));
    }
}
