//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProfileStore` - durable store holding the one user profile
//! - `ProfileCache` - fast local mirror read at startup
//! - `Notifier` - user-visible reminders
//! - `Clock` - current calendar day

mod clock;
mod notifier;
mod profile_cache;
mod profile_store;

pub use clock::Clock;
pub use notifier::{Notification, Notifier};
pub use profile_cache::{CacheError, ProfileCache};
pub use profile_store::{ProfileStore, StoreError};
