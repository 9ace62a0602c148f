//! Error types for `Remote++`
//!
//! This module defines the error types used throughout the core library,
//! providing descriptive error messages for configuration persistence,
//! address parsing, profile validation and key generation.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for `Remote++` operations
#[derive(Debug, Error)]
pub enum RemotePlusError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Address parsing errors
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    /// Profile input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Connection key generation errors
    #[error("Key generation error: {0}")]
    Key(#[from] KeyError),
}

/// Errors related to configuration file operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {reason}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// The reason for validation failure
        reason: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to write configuration file
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// Failed to deserialize configuration
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(String),
}

/// Errors produced while parsing a `host[:port]` address string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The hostname part is empty
    #[error("Address has no hostname: {0:?}")]
    EmptyHost(String),

    /// The port part is not a number in 0..=65535
    #[error("Invalid port {port:?} in address {address:?}")]
    InvalidPort {
        /// The full address that was parsed
        address: String,
        /// The offending port text
        port: String,
    },

    /// An IPv6 literal was opened with `[` but never closed
    #[error("Unterminated IPv6 literal in address {0:?}")]
    UnterminatedBracket(String),
}

/// Errors reported by the profile editor validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Host is required for profiles that are not self-hosted
    #[error("Please fill in Name, Host and Key.")]
    MissingHost,

    /// Name and key are always required
    #[error("Please fill in Name and Key.")]
    MissingNameOrKey,

    /// Port outside 1..=65535
    #[error("Port must be a number between 1 and 65535.")]
    PortOutOfRange(u32),
}

/// Errors related to connection key generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The system random number generator failed
    #[error("Random number generation failed")]
    RngError,
}

/// Result type alias for `Remote++` operations
pub type Result<T> = std::result::Result<T, RemotePlusError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for address parsing
pub type AddressResult<T> = std::result::Result<T, AddressError>;
