//! Connection decision service
//!
//! `ConnectionService` answers every state-dependent question the
//! presentation layer asks: is the client running, is the active session the
//! auto-connect default, what does a leader/follower swap target. It reads
//! live state from the host on every call and never touches the profile store.

use std::rc::Rc;

use crate::config::AutoConnectConfig;
use crate::host::RemoteHost;
use crate::models::{ConnectionInfo, ConnectionMode, Profile, LOCALHOST};
use crate::tracing::span_names;

/// Stateless decision layer over the host remote client
#[derive(Clone)]
pub struct ConnectionService {
    /// Host remote client; `None` when the host offers none
    host: Option<Rc<dyn RemoteHost>>,
}

impl std::fmt::Debug for ConnectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionService")
            .field("has_host", &self.host.is_some())
            .finish()
    }
}

impl ConnectionService {
    /// Creates a service backed by `host`
    #[must_use]
    pub fn new(host: Rc<dyn RemoteHost>) -> Self {
        Self { host: Some(host) }
    }

    /// Creates a service with no host; every query returns its safe default
    #[must_use]
    pub const fn detached() -> Self {
        Self { host: None }
    }

    /// The host client, only while it is running
    fn client(&self) -> Option<&dyn RemoteHost> {
        self.host.as_deref().filter(|host| host.is_running())
    }

    // ========== State Queries ==========

    /// Whether the remote client is running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.client().is_some()
    }

    /// Whether a session is active; always false when not running
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.client().is_some_and(|host| host.is_connected())
    }

    /// Descriptor of the active session, if any
    #[must_use]
    pub fn current_connection_info(&self) -> Option<ConnectionInfo> {
        self.client().and_then(|host| host.current_session())
    }

    /// The host's auto-connect record, if any
    #[must_use]
    pub fn auto_connect_config(&self) -> Option<AutoConnectConfig> {
        self.host.as_deref().and_then(|host| host.auto_connect_config())
    }

    /// Whether auto-connect is enabled, regardless of the rest of the record
    #[must_use]
    pub fn is_auto_connect_enabled(&self) -> bool {
        self.auto_connect_config().is_some_and(|c| c.autoconnect)
    }

    /// Whether the auto-connect record is enabled, keyed and has a target
    #[must_use]
    pub fn is_auto_connect_configured(&self) -> bool {
        self.auto_connect_config()
            .is_some_and(|config| config.is_configured())
    }

    /// Whether the active session matches the auto-connect record on
    /// hostname, port, key and mode. A malformed record never matches.
    #[must_use]
    pub fn is_current_connection_default(&self) -> bool {
        if !self.is_connected() {
            return false;
        }
        let Some(config) = self.auto_connect_config() else {
            return false;
        };
        let Some(current) = self.current_connection_info() else {
            return false;
        };
        let Ok((hostname, port)) = config.resolve_target() else {
            return false;
        };

        current.hostname == hostname
            && current.port == port
            && current.key == config.key
            && current.mode == config.connection_mode
    }

    /// Whether `info` points at a server this machine hosts
    #[must_use]
    pub fn is_self_hosted_connection(&self, info: &ConnectionInfo) -> bool {
        info.insecure && info.hostname == LOCALHOST
    }

    /// Target of a leader/follower swap: the active session with its mode
    /// flipped, together with the new mode. `None` without a session.
    #[must_use]
    pub fn swap_target_info(&self) -> Option<(ConnectionInfo, ConnectionMode)> {
        let current = self.current_connection_info()?;
        let new_mode = current.mode.flipped();
        Some((current.with_mode(new_mode), new_mode))
    }

    /// Whether leaving a follower session needs confirmation (default true)
    #[must_use]
    pub fn should_confirm_disconnect_as_follower(&self) -> bool {
        self.host
            .as_deref()
            .map_or(true, |host| host.ui_settings().confirm_disconnect_as_follower())
    }

    // ========== Host Actions ==========

    /// Starts connecting; no-op when the client is not running
    pub fn connect(&self, info: &ConnectionInfo) {
        if let Some(host) = self.client() {
            let _span = tracing::info_span!(
                span_names::CONNECTION_ESTABLISH,
                host = %info.hostname,
                port = info.port,
                mode = %info.mode
            )
            .entered();
            host.connect(info);
        }
    }

    /// Ends the active session; no-op when the client is not running
    pub fn disconnect(&self, silent: bool) {
        if let Some(host) = self.client() {
            host.disconnect(silent);
        }
    }

    /// Starts a local server; no-op when the client is not running
    pub fn start_local_server(&self, port: u16, key: &str) {
        if let Some(host) = self.client() {
            tracing::debug!(port, "Starting local server");
            host.start_local_server(port, key);
        }
    }

    /// Connects using the auto-connect record.
    ///
    /// Self-hosted records start the local server first and connect to
    /// `localhost` as insecure. A host string that cannot be parsed is
    /// logged and nothing is started. Returns true if a connect was issued.
    pub fn perform_auto_connect(&self) -> bool {
        let _span = tracing::info_span!(span_names::AUTO_CONNECT).entered();

        if !self.is_running() {
            return false;
        }
        let Some(config) = self.auto_connect_config() else {
            return false;
        };

        let info = match config.connection_info() {
            Ok(info) => info,
            Err(e) => {
                tracing::error!(error = %e, "Invalid host in auto-connect config, cannot connect");
                return false;
            }
        };

        if config.self_hosted {
            self.start_local_server(info.port, &info.key);
        }
        self.connect(&info);
        true
    }

    /// Makes `profile` the host's auto-connect target
    pub fn set_as_auto_connect(&self, profile: &Profile) {
        let Some(host) = self.host.as_deref() else {
            return;
        };
        let mut config = host.auto_connect_config().unwrap_or_default();
        config.apply_profile(profile);
        tracing::info!(connection_id = %profile.id, "Set auto-connect profile");
        host.set_auto_connect_config(config);
    }

    /// Connects with a saved profile.
    ///
    /// Any active session is ended silently first, and self-hosted profiles
    /// start the local server. With `reversed` the profile's mode is flipped.
    pub fn connect_profile(&self, profile: &Profile, reversed: bool) {
        if !self.is_running() {
            return;
        }
        if self.is_connected() {
            self.disconnect(true);
        }
        if profile.self_hosted {
            self.start_local_server(profile.port, &profile.key);
        }
        let info = if reversed {
            profile.reversed_connection_info()
        } else {
            profile.connection_info()
        };
        self.connect(&info);
    }
}
