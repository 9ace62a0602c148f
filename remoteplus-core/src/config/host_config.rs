//! Records owned by the host remote client
//!
//! The host keeps a single auto-connect record and a small UI section. This
//! crate reads and writes them through [`crate::host::RemoteHost`] and never
//! caches them.

use serde::{Deserialize, Serialize};

use crate::address::parse_address;
use crate::error::AddressResult;
use crate::models::{ConnectionInfo, ConnectionMode, Profile, DEFAULT_PORT, LOCALHOST};

/// The host's "connect on startup" configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoConnectConfig {
    /// Whether auto-connect is enabled
    #[serde(default)]
    pub autoconnect: bool,
    /// `host` or `host:port`; unused when self-hosted
    #[serde(default)]
    pub host: String,
    /// Listening port for self-hosted servers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Shared connection key
    #[serde(default)]
    pub key: String,
    /// Role to connect as, stored numerically by the host
    #[serde(default, with = "mode_as_number")]
    pub connection_mode: ConnectionMode,
    /// Whether the host starts a local server before connecting
    #[serde(default)]
    pub self_hosted: bool,
}

impl Default for AutoConnectConfig {
    fn default() -> Self {
        Self {
            autoconnect: false,
            host: String::new(),
            port: None,
            key: String::new(),
            connection_mode: ConnectionMode::Leader,
            self_hosted: false,
        }
    }
}

impl AutoConnectConfig {
    /// True when enabled, keyed, and pointing at a host or a local server
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.autoconnect && !self.key.is_empty() && (!self.host.is_empty() || self.self_hosted)
    }

    /// Port of the local server, defaulting to 6837
    #[must_use]
    pub fn local_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolves the target hostname and port.
    ///
    /// Self-hosted records resolve to `localhost` and the stored port.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not self-hosted and its host string
    /// cannot be parsed.
    pub fn resolve_target(&self) -> AddressResult<(String, u16)> {
        if self.self_hosted {
            Ok((LOCALHOST.to_string(), self.local_port()))
        } else {
            parse_address(&self.host)
        }
    }

    /// Connect descriptor for this record
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be resolved.
    pub fn connection_info(&self) -> AddressResult<ConnectionInfo> {
        let (hostname, port) = self.resolve_target()?;
        Ok(ConnectionInfo::new(
            self.connection_mode,
            hostname,
            port,
            self.key.clone(),
            self.self_hosted,
        ))
    }

    /// Makes `profile` the auto-connect target.
    ///
    /// Self-hosted profiles store their port and leave `host` alone; others
    /// store `host` (with `:port` only when the port is not 6837) and leave
    /// `port` alone.
    pub fn apply_profile(&mut self, profile: &Profile) {
        self.autoconnect = true;
        self.self_hosted = profile.self_hosted;
        self.connection_mode = profile.mode;
        self.key = profile.key.clone();

        if profile.self_hosted {
            self.port = Some(profile.port);
        } else if profile.port == DEFAULT_PORT {
            self.host = profile.host.clone();
        } else {
            self.host = format!("{}:{}", profile.host, profile.port);
        }
    }
}

/// The host's remote UI preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUiSettings {
    /// Ask before disconnecting a follower session; unset means yes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_disconnect_as_follower: Option<bool>,
}

impl RemoteUiSettings {
    /// Resolved confirmation preference
    #[must_use]
    pub fn confirm_disconnect_as_follower(&self) -> bool {
        self.confirm_disconnect_as_follower.unwrap_or(true)
    }
}

/// `connectionMode` is stored as 1 (leader) or 0 (follower)
mod mode_as_number {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::models::ConnectionMode;

    pub fn serialize<S: Serializer>(mode: &ConnectionMode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(mode.config_value())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ConnectionMode, D::Error> {
        u8::deserialize(deserializer).map(ConnectionMode::from_config_value)
    }
}
