//! In-process host implementation.
//!
//! `InMemoryHost` implements [`RemoteHost`] and [`HostMenu`] without a real
//! remote client. Connects succeed immediately and every call is recorded, so
//! embedders can drive the decision logic headless and tests can assert on
//! exactly what was asked of the host.

use std::cell::RefCell;

use crate::config::{AutoConnectConfig, RemoteUiSettings};
use crate::models::ConnectionInfo;

use super::{HostMenu, MenuItemId, RemoteHost};

/// A call made into the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// `connect` with this descriptor
    Connect(ConnectionInfo),
    /// `disconnect`
    Disconnect {
        /// Whether notifications were suppressed
        silent: bool,
    },
    /// `start_local_server`
    StartLocalServer {
        /// Listening port
        port: u16,
        /// Connection key
        key: String,
    },
}

/// An item in the in-memory menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Item id
    pub id: MenuItemId,
    /// Label, `None` for separators
    pub label: Option<String>,
    /// Whether the item is enabled
    pub enabled: bool,
}

#[derive(Debug, Default)]
struct HostState {
    running: bool,
    session: Option<ConnectionInfo>,
    auto_connect: Option<AutoConnectConfig>,
    ui: RemoteUiSettings,
    calls: Vec<HostCall>,
    menu: Vec<MenuEntry>,
    next_menu_id: MenuItemId,
}

/// Host remote client kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryHost {
    state: RefCell<HostState>,
}

impl InMemoryHost {
    /// Creates a running host with no session
    #[must_use]
    pub fn new() -> Self {
        let host = Self::default();
        host.state.borrow_mut().running = true;
        host
    }

    /// Creates a host whose remote client is not running
    #[must_use]
    pub fn stopped() -> Self {
        Self::default()
    }

    /// Starts or stops the remote client; stopping ends the session
    pub fn set_running(&self, running: bool) {
        let mut state = self.state.borrow_mut();
        state.running = running;
        if !running {
            state.session = None;
        }
    }

    /// Replaces the active session
    pub fn set_session(&self, session: Option<ConnectionInfo>) {
        self.state.borrow_mut().session = session;
    }

    /// Replaces the auto-connect record
    pub fn set_auto_connect(&self, config: Option<AutoConnectConfig>) {
        self.state.borrow_mut().auto_connect = config;
    }

    /// Replaces the UI preferences
    pub fn set_ui_settings(&self, settings: RemoteUiSettings) {
        self.state.borrow_mut().ui = settings;
    }

    /// Calls recorded so far
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.state.borrow().calls.clone()
    }

    /// Returns and clears the recorded calls
    pub fn take_calls(&self) -> Vec<HostCall> {
        std::mem::take(&mut self.state.borrow_mut().calls)
    }

    /// Current menu contents
    #[must_use]
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        self.state.borrow().menu.clone()
    }

    /// Menu item with the given label
    #[must_use]
    pub fn menu_entry(&self, label: &str) -> Option<MenuEntry> {
        self.state
            .borrow()
            .menu
            .iter()
            .find(|e| e.label.as_deref() == Some(label))
            .cloned()
    }
}

impl RemoteHost for InMemoryHost {
    fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    fn is_connected(&self) -> bool {
        let state = self.state.borrow();
        state.running && state.session.is_some()
    }

    fn current_session(&self) -> Option<ConnectionInfo> {
        self.state.borrow().session.clone()
    }

    fn connect(&self, info: &ConnectionInfo) {
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::Connect(info.clone()));
        if state.running {
            state.session = Some(info.clone());
        }
    }

    fn disconnect(&self, silent: bool) {
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::Disconnect { silent });
        state.session = None;
    }

    fn start_local_server(&self, port: u16, key: &str) {
        self.state
            .borrow_mut()
            .calls
            .push(HostCall::StartLocalServer {
                port,
                key: key.to_string(),
            });
    }

    fn auto_connect_config(&self) -> Option<AutoConnectConfig> {
        self.state.borrow().auto_connect.clone()
    }

    fn set_auto_connect_config(&self, config: AutoConnectConfig) {
        self.state.borrow_mut().auto_connect = Some(config);
    }

    fn ui_settings(&self) -> RemoteUiSettings {
        self.state.borrow().ui.clone()
    }
}

impl HostMenu for InMemoryHost {
    fn append_separator(&self) -> MenuItemId {
        self.append(None)
    }

    fn append_item(&self, label: &str) -> MenuItemId {
        self.append(Some(label.to_string()))
    }

    fn remove_item(&self, id: MenuItemId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.menu.len();
        state.menu.retain(|e| e.id != id);
        state.menu.len() != before
    }

    fn set_enabled(&self, id: MenuItemId, enabled: bool) {
        if let Some(entry) = self.state.borrow_mut().menu.iter_mut().find(|e| e.id == id) {
            entry.enabled = enabled;
        }
    }
}

impl InMemoryHost {
    fn append(&self, label: Option<String>) -> MenuItemId {
        let mut state = self.state.borrow_mut();
        state.next_menu_id += 1;
        let id = state.next_menu_id;
        state.menu.push(MenuEntry {
            id,
            label,
            enabled: true,
        });
        id
    }
}
