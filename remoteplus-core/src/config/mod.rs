//! Configuration management for `Remote++`
//!
//! This module provides the `ConfigManager` for loading and saving the
//! connections file in JSON format, the `StoreDocument` it holds, the records
//! owned by the host client, and profile input validation.

pub mod document;
pub mod host_config;
mod manager;
mod validation;

pub use document::StoreDocument;
pub use host_config::{AutoConnectConfig, RemoteUiSettings};
pub use manager::{ConfigManager, CONNECTIONS_FILE};
pub use validation::{validate_profile_input, ProfileInput};
