//! Host capability interface
//!
//! The screen reader's remote client is an external collaborator. This
//! module defines the narrow interface the core uses to talk to it:
//! [`RemoteHost`] for session state, connect actions and configuration
//! records, [`HostMenu`] for the client's menu, and [`HostEvent`] for the
//! lifecycle notifications the host emits.
//!
//! All calls happen on the host's UI thread. Implementations take `&self`
//! and use interior mutability, the same way GUI-side helpers share state
//! through `Rc`.

mod events;
mod memory;

pub use events::{HostEvent, HostEventListener, HostEvents};
pub use memory::{HostCall, InMemoryHost, MenuEntry};

use crate::config::{AutoConnectConfig, RemoteUiSettings};
use crate::models::ConnectionInfo;

/// Identifier of an item appended to the host menu
pub type MenuItemId = u32;

/// The host's remote client
pub trait RemoteHost {
    /// Whether the remote client is running
    fn is_running(&self) -> bool;

    /// Whether a session is active
    fn is_connected(&self) -> bool;

    /// Descriptor of the active leader or follower session, with the
    /// transport's insecure flag
    fn current_session(&self) -> Option<ConnectionInfo>;

    /// Starts connecting; the outcome arrives later as a host event
    fn connect(&self, info: &ConnectionInfo);

    /// Ends the active session; `silent` suppresses user notifications
    fn disconnect(&self, silent: bool);

    /// Starts a local relay server on `port` with `key`
    fn start_local_server(&self, port: u16, key: &str);

    /// The auto-connect record, if the host has one
    fn auto_connect_config(&self) -> Option<AutoConnectConfig>;

    /// Replaces the auto-connect record
    fn set_auto_connect_config(&self, config: AutoConnectConfig);

    /// The remote UI preferences
    fn ui_settings(&self) -> RemoteUiSettings;
}

/// The remote client's menu
pub trait HostMenu {
    /// Appends a separator
    fn append_separator(&self) -> MenuItemId;

    /// Appends an item with the given label
    fn append_item(&self, label: &str) -> MenuItemId;

    /// Removes an item; returns false if it was already gone
    fn remove_item(&self, id: MenuItemId) -> bool;

    /// Enables or disables an item
    fn set_enabled(&self, id: MenuItemId, enabled: bool);
}
