//! Storage Adapters
//!
//! Implementations of the ProfileStore port.
//!
//! ## Available Adapters
//!
//! - **FileProfileStore** - Stores the profile as a JSON file on disk
//! - **InMemoryProfileStore** - Stores the profile in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileProfileStore, InMemoryProfileStore};
//!
//! // Production: file-based storage
//! let store = FileProfileStore::new("./data/profile.json");
//!
//! // Testing: in-memory storage
//! let store = InMemoryProfileStore::new();
//! ```

mod file_profile_store;
mod in_memory_profile_store;

pub use file_profile_store::FileProfileStore;
pub use in_memory_profile_store::InMemoryProfileStore;
