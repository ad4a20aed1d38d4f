//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the durable store and the cache mirror live on disk
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding both files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Durable store file name
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Cache mirror file name
    #[serde(default = "default_cache_file")]
    pub cache_file: String,
}

impl StorageConfig {
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join(&self.cache_file)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.store_file.trim().is_empty() {
            return Err(ValidationError::MissingRequired("storage.store_file"));
        }
        if self.cache_file.trim().is_empty() {
            return Err(ValidationError::MissingRequired("storage.cache_file"));
        }
        if self.store_file == self.cache_file {
            return Err(ValidationError::StoreAndCacheCollide);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store_file: default_store_file(),
            cache_file: default_cache_file(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_store_file() -> String {
    "profile.json".to_string()
}

fn default_cache_file() -> String {
    "profile-cache.json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.store_path(), PathBuf::from("./data/profile.json"));
        assert_eq!(config.cache_path(), PathBuf::from("./data/profile-cache.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_same_file() {
        let config = StorageConfig {
            cache_file: "profile.json".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::StoreAndCacheCollide));
    }

    #[test]
    fn test_validation_empty_file_name() {
        let config = StorageConfig {
            store_file: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
