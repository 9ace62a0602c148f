//! User-facing connection actions
//!
//! The parts of the presentation layer that do not need a toolkit: the swap
//! and connect-to-default flows and the host menu integration. Dialogs are
//! supplied by the caller as confirmation callbacks, and each flow reports an
//! outcome whose `Display` text is the message to announce.

mod menu;

pub use menu::{
    MenuAction, MenuController, MenuState, CONNECT_DEFAULT_LABEL, MANAGE_LABEL, SWAP_LABEL,
};

use std::fmt;

use thiserror::Error;

use crate::models::{ConnectionInfo, ConnectionMode};
use crate::service::ConnectionService;
use crate::tracing::span_names;

/// The remote client is not running, so no action is possible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Action unavailable when Remote Access is disabled")]
pub struct RemoteDisabled;

/// Result of a leader/follower swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The remote client is not running
    RemoteDisabled,
    /// There is no session to swap
    NotConnected,
    /// The user declined to leave the follower session
    Cancelled,
    /// Reconnected with this descriptor
    Swapped(ConnectionInfo),
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteDisabled => fmt::Display::fmt(&RemoteDisabled, f),
            Self::NotConnected => write!(f, "Not connected"),
            Self::Cancelled => write!(f, "Swap cancelled"),
            Self::Swapped(info) => write!(f, "Switching to {} mode", info.mode.display_name()),
        }
    }
}

/// Result of "connect to default server"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectDefaultOutcome {
    /// The remote client is not running
    RemoteDisabled,
    /// The auto-connect record is incomplete or disabled
    NotConfigured,
    /// Was disconnected; connecting to the default now
    Connected,
    /// The active session already is the default
    AlreadyDefault,
    /// The user declined to leave the active session
    Cancelled,
    /// Left the active session and connecting to the default
    Switched,
    /// The auto-connect record could not be used
    Failed,
}

impl fmt::Display for ConnectDefaultOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteDisabled => fmt::Display::fmt(&RemoteDisabled, f),
            Self::NotConfigured => write!(f, "Auto-connect parameters not configured."),
            Self::Connected | Self::Switched => write!(f, "Connecting to default server"),
            Self::AlreadyDefault => write!(f, "Already connected to default server."),
            Self::Cancelled => write!(f, "Switch to default server cancelled"),
            Self::Failed => write!(f, "Invalid host in auto-connect configuration"),
        }
    }
}

/// What the switch-to-default confirmation shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchToDefaultPrompt {
    /// Target host as configured; `None` for a local server
    pub target_host: Option<String>,
    /// Target mode
    pub target_mode: ConnectionMode,
    /// Current hostname; `None` for a local server
    pub current_host: Option<String>,
    /// Current mode
    pub current_mode: ConnectionMode,
}

impl SwitchToDefaultPrompt {
    /// Text shown for a local server
    pub const LOCAL_SERVER: &'static str = "Local Server";

    /// Dialog title
    pub const TITLE: &'static str = "Switch to Default Connection";

    /// Full confirmation message
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Connect to default server: {} ({})\n\n\
             This will disconnect the active session: {} ({})\n\n\
             Do you want to continue?",
            self.target_host.as_deref().unwrap_or(Self::LOCAL_SERVER),
            self.target_mode.display_name(),
            self.current_host.as_deref().unwrap_or(Self::LOCAL_SERVER),
            self.current_mode.display_name(),
        )
    }
}

/// Orchestrates connection actions over a [`ConnectionService`]
#[derive(Debug, Clone)]
pub struct RemoteActions {
    service: ConnectionService,
}

impl RemoteActions {
    /// Creates the action set
    #[must_use]
    pub const fn new(service: ConnectionService) -> Self {
        Self { service }
    }

    /// The underlying service
    #[must_use]
    pub const fn service(&self) -> &ConnectionService {
        &self.service
    }

    /// Checks that the connection manager may be opened
    ///
    /// # Errors
    ///
    /// Returns [`RemoteDisabled`] if the remote client is not running.
    pub fn can_show_manager(&self) -> Result<(), RemoteDisabled> {
        if self.service.is_running() {
            Ok(())
        } else {
            Err(RemoteDisabled)
        }
    }

    /// Swaps the active session between leader and follower.
    ///
    /// `confirm` is asked only when leaving a follower session with the
    /// confirmation preference enabled.
    pub fn perform_swap(&self, confirm: impl FnOnce() -> bool) -> SwapOutcome {
        let _span = tracing::info_span!(span_names::SWAP_MODE).entered();

        if !self.service.is_running() {
            return SwapOutcome::RemoteDisabled;
        }
        if !self.service.is_connected() {
            return SwapOutcome::NotConnected;
        }

        let target = self.service.swap_target_info();

        let leaving_follower = self
            .service
            .current_connection_info()
            .is_some_and(|info| info.mode == ConnectionMode::Follower);
        if leaving_follower && self.service.should_confirm_disconnect_as_follower() && !confirm() {
            return SwapOutcome::Cancelled;
        }

        let Some((target, mode)) = target else {
            return SwapOutcome::NotConnected;
        };
        tracing::info!(mode = %mode, "Swapping control mode");
        self.service.disconnect(true);
        self.service.connect(&target);
        SwapOutcome::Swapped(target)
    }

    /// Connects to the auto-connect default.
    ///
    /// When another session is active, `confirm` decides whether to leave it.
    pub fn perform_connect_to_default(
        &self,
        confirm: impl FnOnce(&SwitchToDefaultPrompt) -> bool,
    ) -> ConnectDefaultOutcome {
        let _span = tracing::info_span!(span_names::CONNECT_DEFAULT).entered();

        if !self.service.is_running() {
            return ConnectDefaultOutcome::RemoteDisabled;
        }
        if !self.service.is_auto_connect_configured() {
            return ConnectDefaultOutcome::NotConfigured;
        }

        if !self.service.is_connected() {
            return if self.service.perform_auto_connect() {
                ConnectDefaultOutcome::Connected
            } else {
                ConnectDefaultOutcome::Failed
            };
        }

        if self.service.is_current_connection_default() {
            return ConnectDefaultOutcome::AlreadyDefault;
        }

        let Some(prompt) = self.switch_prompt() else {
            return ConnectDefaultOutcome::Cancelled;
        };
        if !confirm(&prompt) {
            return ConnectDefaultOutcome::Cancelled;
        }

        self.service.disconnect(true);
        if self.service.perform_auto_connect() {
            ConnectDefaultOutcome::Switched
        } else {
            ConnectDefaultOutcome::Failed
        }
    }

    /// Builds the switch-to-default confirmation contents
    #[must_use]
    pub fn switch_prompt(&self) -> Option<SwitchToDefaultPrompt> {
        let config = self.service.auto_connect_config()?;
        let current = self.service.current_connection_info()?;

        let target_host = (!config.self_hosted).then(|| config.host.clone());
        let current_host = (!self.service.is_self_hosted_connection(&current))
            .then(|| current.hostname.clone());

        Some(SwitchToDefaultPrompt {
            target_host,
            target_mode: config.connection_mode,
            current_host,
            current_mode: current.mode,
        })
    }
}
