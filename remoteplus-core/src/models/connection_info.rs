//! Connect descriptor exchanged with the host remote client.

use crate::address::format_address;

use super::ConnectionMode;

/// URL scheme of shareable connect links
pub const URL_SCHEME: &str = "nvdaremote";

/// Everything the remote client needs to open (or describe) a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Role of the local side
    pub mode: ConnectionMode,
    /// Server hostname or IP address
    pub hostname: String,
    /// Server port
    pub port: u16,
    /// Shared connection key
    pub key: String,
    /// Whether the transport skips certificate checks (local servers)
    pub insecure: bool,
}

impl ConnectionInfo {
    /// Creates a new descriptor
    #[must_use]
    pub fn new(
        mode: ConnectionMode,
        hostname: impl Into<String>,
        port: u16,
        key: impl Into<String>,
        insecure: bool,
    ) -> Self {
        Self {
            mode,
            hostname: hostname.into(),
            port,
            key: key.into(),
            insecure,
        }
    }

    /// Returns a copy of this descriptor with a different mode
    #[must_use]
    pub fn with_mode(&self, mode: ConnectionMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// `host[:port]` form of the server address
    #[must_use]
    pub fn address(&self) -> String {
        format_address(&self.hostname, self.port)
    }

    /// Link another machine can open to join this session.
    ///
    /// The peer takes the opposite role, so the mode in the link is flipped.
    #[must_use]
    pub fn url_to_connect(&self) -> String {
        format!(
            "{URL_SCHEME}://{}?key={}&mode={}",
            self.address(),
            form_encode(&self.key),
            self.mode.flipped().as_str()
        )
    }
}

/// Form-style query encoding: spaces become `+`, other reserved bytes are
/// percent-encoded
fn form_encode(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}
