//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `tracking` - User profile aggregate, cycle history and the prediction engine

pub mod foundation;
pub mod tracking;
