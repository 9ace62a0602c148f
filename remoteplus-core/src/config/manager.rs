//! Configuration manager for JSON file operations
//!
//! This module provides the `ConfigManager` which locates, loads and atomically
//! saves the connections file, and validates stored profiles.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::models::Profile;
use crate::tracing::span_names;

use super::document::StoreDocument;

/// File name of the connections file
pub const CONNECTIONS_FILE: &str = "remotePlusPlus_connections.json";

/// Suffix of the temporary file used for atomic replacement
const TMP_SUFFIX: &str = ".tmp";

/// Name of the default configuration subdirectory
const APP_DIR: &str = "remoteplus";

/// Configuration manager for `Remote++`
///
/// Handles loading and saving the connections file in JSON format.
/// Configuration is stored in `~/.config/remoteplus/` by default.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Base directory for configuration files
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new `ConfigManager` with the default configuration directory
    ///
    /// The default directory is `~/.config/remoteplus/`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined.
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from("~/.config")))?
            .join(APP_DIR);
        Ok(Self { config_dir })
    }

    /// Creates a new `ConfigManager` with a custom configuration directory
    ///
    /// This is how a host passes its own profile directory, and how tests
    /// point the store at a temporary directory.
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the configuration directory path
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Full path of the connections file
    #[must_use]
    pub fn connections_path(&self) -> PathBuf {
        self.config_dir.join(CONNECTIONS_FILE)
    }

    /// Path of the temporary file written before the atomic rename
    #[must_use]
    pub fn temp_path(&self) -> PathBuf {
        self.config_dir
            .join(format!("{CONNECTIONS_FILE}{TMP_SUFFIX}"))
    }

    /// Ensures the configuration directory exists
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> ConfigResult<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).map_err(|e| {
                ConfigError::Write(format!(
                    "Failed to create config directory {}: {}",
                    self.config_dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    // ========== Connections File ==========

    /// Loads the connections file
    ///
    /// Returns `None` if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_document(&self) -> ConfigResult<Option<StoreDocument>> {
        let path = self.connections_path();
        let _span = tracing::info_span!(span_names::CONFIG_LOAD, path = %path.display()).entered();

        if !path.exists() {
            tracing::debug!("No connections file, using defaults");
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read {}: {}", path.display(), e)))?;

        let document = StoreDocument::from_json_str(&content).map_err(|e| match e {
            ConfigError::Deserialize(reason) | ConfigError::Parse(reason) => {
                ConfigError::Deserialize(format!("Failed to parse {}: {}", path.display(), reason))
            }
            other => other,
        })?;

        for group in &document.groups {
            for (index, e) in Self::validate_profiles(&group.connections) {
                tracing::warn!(group = %group.name, index, error = %e, "Stored profile is incomplete");
            }
        }
        tracing::debug!(groups = document.groups.len(), "Loaded connections file");
        Ok(Some(document))
    }

    /// Saves the connections file atomically
    ///
    /// The document is written to a temporary file in the same directory which
    /// then replaces the real file. On failure the temporary file is removed and
    /// the previous file is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_document(&self, document: &StoreDocument) -> ConfigResult<()> {
        let path = self.connections_path();
        let _span = tracing::info_span!(span_names::CONFIG_SAVE, path = %path.display()).entered();

        let content = document.to_json_string()?;
        self.ensure_config_dir()?;

        let tmp_path = self.temp_path();
        let result = Self::write_and_replace(&tmp_path, &path, &content);
        if result.is_err() && tmp_path.exists() {
            if let Err(e) = fs::remove_file(&tmp_path) {
                tracing::debug!(error = %e, "Failed to remove temporary file");
            }
        }
        result
    }

    fn write_and_replace(tmp_path: &Path, path: &Path, content: &str) -> ConfigResult<()> {
        let mut file = fs::File::create(tmp_path).map_err(|e| {
            ConfigError::Write(format!("Failed to create {}: {}", tmp_path.display(), e))
        })?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| {
                ConfigError::Write(format!("Failed to write {}: {}", tmp_path.display(), e))
            })?;
        drop(file);

        fs::rename(tmp_path, path).map_err(|e| {
            ConfigError::Write(format!(
                "Failed to replace {} with {}: {}",
                path.display(),
                tmp_path.display(),
                e
            ))
        })
    }

    // ========== Validation ==========

    /// Validates a stored profile
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid.
    pub fn validate_profile(profile: &Profile) -> ConfigResult<()> {
        if profile.name.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "name".to_string(),
                reason: "Profile name cannot be empty".to_string(),
            });
        }

        if profile.key.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "key".to_string(),
                reason: "Connection key cannot be empty".to_string(),
            });
        }

        // Self-hosted profiles always connect to localhost
        if !profile.self_hosted && profile.host.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "host".to_string(),
                reason: "Host cannot be empty".to_string(),
            });
        }

        if profile.port == 0 {
            return Err(ConfigError::Validation {
                field: "port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Validates a list of profiles, returning the index and error of each invalid one
    #[must_use]
    pub fn validate_profiles(profiles: &[Profile]) -> Vec<(usize, ConfigError)> {
        profiles
            .iter()
            .enumerate()
            .filter_map(|(i, p)| Self::validate_profile(p).err().map(|e| (i, e)))
            .collect()
    }
}
