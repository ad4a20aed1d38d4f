//! Cache Mirror Adapters
//!
//! Implementations of the ProfileCache port.
//!
//! - **JsonFileProfileCache** - JSON file, read synchronously at startup
//! - **InMemoryProfileCache** - in-memory mirror (testing/development)

mod in_memory_profile_cache;
mod json_file_profile_cache;

pub use in_memory_profile_cache::InMemoryProfileCache;
pub use json_file_profile_cache::JsonFileProfileCache;
