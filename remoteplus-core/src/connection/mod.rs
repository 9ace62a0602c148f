//! Connection store module
//!
//! This module provides the `ConnectionStore` for CRUD operations on groups
//! and profiles, with persistence through `ConfigManager`.

mod search;
mod store;

pub use search::filter_profiles;
pub use store::{ConnectionStore, MoveDirection};
