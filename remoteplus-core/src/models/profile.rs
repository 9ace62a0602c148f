//! Connection profile model representing a saved remote access target.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{ConnectionInfo, ConnectionMode};

/// Default port of the remote access relay protocol
pub const DEFAULT_PORT: u16 = 6837;

/// Hostname used for self-hosted profiles
pub const LOCALHOST: &str = "localhost";

/// A saved remote connection profile
///
/// Field order matches the on-disk key order. Keys this version does not know
/// about are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Stable identifier, generated once when the profile is created
    pub id: Uuid,
    /// Display name, not required to be unique
    pub name: String,
    /// Hostname or IP address; ignored when `self_hosted` is set
    pub host: String,
    /// Shared connection key
    pub key: String,
    /// Server port
    pub port: u16,
    /// Role taken when connecting with this profile
    pub mode: ConnectionMode,
    /// Whether this machine starts the server itself on `localhost`
    #[serde(rename = "selfHosted")]
    pub self_hosted: bool,
    /// Unknown keys preserved from disk
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Creates a profile with a freshly generated id
    #[must_use]
    pub fn new(fields: ProfileFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    /// Creates a profile with a known id
    #[must_use]
    pub fn with_id(id: Uuid, fields: ProfileFields) -> Self {
        Self {
            id,
            name: fields.name,
            host: fields.host,
            key: fields.key,
            port: fields.port,
            mode: fields.mode,
            self_hosted: fields.self_hosted,
            extra: Map::new(),
        }
    }

    /// Host actually used for connecting: `localhost` for self-hosted
    /// profiles, the stored host otherwise
    #[must_use]
    pub fn effective_host(&self) -> &str {
        if self.self_hosted {
            LOCALHOST
        } else {
            &self.host
        }
    }

    /// Connect descriptor for this profile in its stored mode
    #[must_use]
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo::new(
            self.mode,
            self.effective_host(),
            self.port,
            self.key.clone(),
            self.self_hosted,
        )
    }

    /// Connect descriptor with the mode flipped ("connect reversed")
    #[must_use]
    pub fn reversed_connection_info(&self) -> ConnectionInfo {
        let mut info = self.connection_info();
        info.mode = info.mode.flipped();
        info
    }

    /// Merges a partial update into this profile in place
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(host) = update.host {
            self.host = host;
        }
        if let Some(key) = update.key {
            self.key = key;
        }
        if let Some(port) = update.port {
            self.port = port;
        }
        if let Some(mode) = update.mode {
            self.mode = mode;
        }
        if let Some(self_hosted) = update.self_hosted {
            self.self_hosted = self_hosted;
        }
    }
}

/// Values for a new profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    /// Display name
    pub name: String,
    /// Hostname or IP address
    pub host: String,
    /// Shared connection key
    pub key: String,
    /// Server port (default 6837)
    pub port: u16,
    /// Connection role (default leader)
    pub mode: ConnectionMode,
    /// Self-hosted flag (default false)
    pub self_hosted: bool,
}

impl ProfileFields {
    /// Creates the field set with default port, mode and self-hosted flag
    #[must_use]
    pub fn new(name: impl Into<String>, host: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            key: key.into(),
            port: DEFAULT_PORT,
            mode: ConnectionMode::Leader,
            self_hosted: false,
        }
    }

    /// Sets the port
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the connection mode
    #[must_use]
    pub const fn with_mode(mut self, mode: ConnectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the self-hosted flag
    #[must_use]
    pub const fn with_self_hosted(mut self, self_hosted: bool) -> Self {
        self.self_hosted = self_hosted;
        self
    }
}

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New host
    pub host: Option<String>,
    /// New key
    pub key: Option<String>,
    /// New port
    pub port: Option<u16>,
    /// New mode
    pub mode: Option<ConnectionMode>,
    /// New self-hosted flag
    pub self_hosted: Option<bool>,
}

impl ProfileUpdate {
    /// Creates an empty update
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the host
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the key
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the port
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the mode
    #[must_use]
    pub const fn mode(mut self, mode: ConnectionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the self-hosted flag
    #[must_use]
    pub const fn self_hosted(mut self, self_hosted: bool) -> Self {
        self.self_hosted = Some(self_hosted);
        self
    }

    /// Returns true if no field is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.host.is_none()
            && self.key.is_none()
            && self.port.is_none()
            && self.mode.is_none()
            && self.self_hosted.is_none()
    }
}

impl From<ProfileFields> for ProfileUpdate {
    /// Full replacement of every editable field, as produced by the editor dialog
    fn from(fields: ProfileFields) -> Self {
        Self {
            name: Some(fields.name),
            host: Some(fields.host),
            key: Some(fields.key),
            port: Some(fields.port),
            mode: Some(fields.mode),
            self_hosted: Some(fields.self_hosted),
        }
    }
}
