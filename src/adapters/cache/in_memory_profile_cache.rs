//! In-memory cache mirror for tests and development.

use std::sync::{Arc, RwLock};

use crate::domain::tracking::UserProfile;
use crate::ports::{CacheError, ProfileCache};

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileCache {
    profile: Arc<RwLock<Option<UserProfile>>>,
}

impl InMemoryProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            profile: Arc::new(RwLock::new(Some(profile))),
        }
    }
}

fn poisoned() -> CacheError {
    CacheError::IoError("cache lock poisoned".to_string())
}

impl ProfileCache for InMemoryProfileCache {
    fn load(&self) -> Result<Option<UserProfile>, CacheError> {
        Ok(self.profile.read().map_err(|_| poisoned())?.clone())
    }

    fn store(&self, profile: &UserProfile) -> Result<(), CacheError> {
        *self.profile.write().map_err(|_| poisoned())? = Some(profile.clone());
        Ok(())
    }
}
