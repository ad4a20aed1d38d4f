//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to the outside world:
//! - `storage` - durable profile store (JSON file, in-memory)
//! - `cache` - local cache mirror read at startup (JSON file, in-memory)
//! - `notifications` - user-facing notifications (tracing, in-memory)
//! - `clock` - the current calendar day (system, fixed)

pub mod cache;
pub mod clock;
pub mod notifications;
pub mod storage;

pub use cache::{InMemoryProfileCache, JsonFileProfileCache};
pub use clock::{FixedClock, SystemClock};
pub use notifications::{InMemoryNotifier, TracingNotifier};
pub use storage::{FileProfileStore, InMemoryProfileStore};
