//! Host menu integration.

use std::rc::Rc;

use crate::host::{HostEvent, HostEventListener, HostMenu, MenuItemId};
use crate::service::ConnectionService;

/// Label of the connection manager item
pub const MANAGE_LABEL: &str = "Connection &Manager...";
/// Label of the swap item
pub const SWAP_LABEL: &str = "&Swap Control Mode";
/// Label of the connect-to-default item
pub const CONNECT_DEFAULT_LABEL: &str = "Connect &to Default Server";

/// Which injected item was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Open the connection manager
    Manage,
    /// Swap leader and follower
    Swap,
    /// Connect to the auto-connect default
    ConnectDefault,
}

/// Enabled state of the injected items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    /// Connection manager item
    pub manage: bool,
    /// Swap item
    pub swap: bool,
    /// Connect-to-default item
    pub connect_default: bool,
}

impl MenuState {
    /// Computes item state for the given connection status.
    ///
    /// The manager is always available, swapping needs a session, and
    /// connecting to the default is pointless while already on it.
    #[must_use]
    pub fn compute(service: &ConnectionService, connected: bool) -> Self {
        Self {
            manage: true,
            swap: connected,
            connect_default: !(connected && service.is_current_connection_default()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct InjectedItems {
    separator: MenuItemId,
    manage: MenuItemId,
    swap: MenuItemId,
    connect_default: Option<MenuItemId>,
}

impl InjectedItems {
    fn ids(self) -> impl Iterator<Item = MenuItemId> {
        [Some(self.separator), Some(self.manage), Some(self.swap), self.connect_default]
            .into_iter()
            .flatten()
    }
}

/// Keeps the add-on's items in the host menu in step with the client
pub struct MenuController {
    service: ConnectionService,
    menu: Rc<dyn HostMenu>,
    items: Option<InjectedItems>,
}

impl std::fmt::Debug for MenuController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuController")
            .field("service", &self.service)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl MenuController {
    /// Creates a controller; nothing is injected until [`Self::inject`]
    #[must_use]
    pub fn new(service: ConnectionService, menu: Rc<dyn HostMenu>) -> Self {
        Self {
            service,
            menu,
            items: None,
        }
    }

    /// Whether the items are currently in the menu
    #[must_use]
    pub const fn is_injected(&self) -> bool {
        self.items.is_some()
    }

    /// Appends the items to the host menu.
    ///
    /// Does nothing while the client is not running or when already injected.
    /// The connect-to-default item is only added when an auto-connect default
    /// is configured.
    pub fn inject(&mut self) {
        if self.items.is_some() || !self.service.is_running() {
            return;
        }

        let separator = self.menu.append_separator();
        let manage = self.menu.append_item(MANAGE_LABEL);
        let swap = self.menu.append_item(SWAP_LABEL);
        let connect_default = self
            .service
            .is_auto_connect_configured()
            .then(|| self.menu.append_item(CONNECT_DEFAULT_LABEL));

        self.items = Some(InjectedItems {
            separator,
            manage,
            swap,
            connect_default,
        });
        tracing::debug!("Menu items injected");
        self.refresh(self.service.is_connected());
    }

    /// Takes the items out of the menu; items the host already dropped are
    /// skipped
    pub fn remove(&mut self) {
        let Some(items) = self.items.take() else {
            return;
        };
        for id in items.ids() {
            if !self.menu.remove_item(id) {
                tracing::debug!(id, "Menu item already removed");
            }
        }
    }

    /// Updates enabled states
    pub fn refresh(&self, connected: bool) {
        let Some(items) = self.items else {
            return;
        };
        let state = MenuState::compute(&self.service, connected);
        self.menu.set_enabled(items.manage, state.manage);
        self.menu.set_enabled(items.swap, state.swap);
        if let Some(id) = items.connect_default {
            self.menu.set_enabled(id, state.connect_default);
        }
    }

    /// Maps an activated menu item to its action
    #[must_use]
    pub fn activate(&self, id: MenuItemId) -> Option<MenuAction> {
        let items = self.items?;
        if id == items.manage {
            Some(MenuAction::Manage)
        } else if id == items.swap {
            Some(MenuAction::Swap)
        } else if items.connect_default == Some(id) {
            Some(MenuAction::ConnectDefault)
        } else {
            None
        }
    }
}

impl HostEventListener for MenuController {
    fn on_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::ClientStarted => self.inject(),
            HostEvent::ClientStopped => self.remove(),
            HostEvent::ConnectionChanged { connected, .. } => self.refresh(connected),
        }
    }
}
