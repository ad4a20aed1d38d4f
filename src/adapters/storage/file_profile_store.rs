//! File-based Profile Store Adapter
//!
//! Stores the profile as a pretty-printed JSON document on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::tracking::UserProfile;
use crate::ports::{ProfileStore, StoreError};

/// File-based durable store for the user profile
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    /// Create a store backed by the JSON file at `path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileProfileStore::new("./data/profile.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        fs::create_dir_all(dir)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", dir.display(), e)))?;

        let metadata = fs::metadata(dir)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        if metadata.permissions().readonly() {
            return Err(StoreError::Unavailable(format!(
                "{} is read-only",
                dir.display()
            )));
        }
        Ok(())
    }

    async fn read_profile(&self) -> Result<Option<UserProfile>, StoreError> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::IoError(e.to_string())),
        };

        let profile = serde_json::from_str(&json)
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(profile))
    }

    async fn write_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(profile)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        // Write to a sibling temp file, then rename over the real one
        let temp_path = self.temp_path();
        fs::write(&temp_path, json)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        Ok(())
    }
}
