//! JSON file cache mirror.
//!
//! Synchronous counterpart of the durable store, read once at startup so the
//! profile is available before any async work has happened.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::tracking::UserProfile;
use crate::ports::{CacheError, ProfileCache};

/// Profile cache backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileProfileCache {
    path: PathBuf,
}

impl JsonFileProfileCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileCache for JsonFileProfileCache {
    fn load(&self) -> Result<Option<UserProfile>, CacheError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::IoError(e.to_string())),
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| CacheError::Corrupt(e.to_string()))
    }

    fn store(&self, profile: &UserProfile) -> Result<(), CacheError> {
        let json = serde_json::to_string(profile)
            .map_err(|e| CacheError::SerializationFailed(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CacheError::IoError(e.to_string()))?;
        }
        fs::write(&self.path, json).map_err(|e| CacheError::IoError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let cache = JsonFileProfileCache::new(temp_dir.path().join("cache.json"));

        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn store_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let cache = JsonFileProfileCache::new(temp_dir.path().join("sub/cache.json"));
        let profile = UserProfile::new("Ada");

        cache.store(&profile).unwrap();

        assert_eq!(cache.load().unwrap(), Some(profile));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        fs::write(&path, "[]").unwrap();
        let cache = JsonFileProfileCache::new(&path);

        assert!(matches!(cache.load(), Err(CacheError::Corrupt(_))));
    }
}
