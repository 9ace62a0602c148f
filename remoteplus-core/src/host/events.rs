//! Host lifecycle events and their subscribers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::models::ConnectionMode;

/// Notifications emitted by the host remote client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The remote client has been started
    ClientStarted,
    /// The remote client is about to stop
    ClientStopped,
    /// A session was established or ended
    ConnectionChanged {
        /// Role of the session
        mode: ConnectionMode,
        /// Whether the session is now active
        connected: bool,
    },
}

/// Receiver of host events
pub trait HostEventListener {
    /// Handles one event
    fn on_host_event(&mut self, event: HostEvent);
}

/// Subscriber list owned by the host side
///
/// Listeners are held weakly: dropping the last strong reference ends the
/// subscription.
#[derive(Default)]
pub struct HostEvents {
    listeners: Vec<Weak<RefCell<dyn HostEventListener>>>,
}

impl HostEvents {
    /// Creates an empty subscriber list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a listener
    pub fn subscribe(&mut self, listener: &Rc<RefCell<dyn HostEventListener>>) {
        self.listeners.push(Rc::downgrade(listener));
    }

    /// Number of live subscriptions
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.strong_count() > 0)
            .count()
    }

    /// Returns true if no live listener remains
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers `event` to every live listener in subscription order
    pub fn emit(&mut self, event: HostEvent) {
        self.listeners.retain(|l| l.strong_count() > 0);
        for listener in self.listeners.iter().filter_map(Weak::upgrade) {
            match listener.try_borrow_mut() {
                Ok(mut listener) => listener.on_host_event(event),
                Err(_) => {
                    tracing::warn!(?event, "Listener is busy, dropping reentrant host event");
                }
            }
        }
    }
}

impl std::fmt::Debug for HostEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostEvents")
            .field("listeners", &self.len())
            .finish()
    }
}
