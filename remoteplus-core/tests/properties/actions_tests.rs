//! Tests for the user-facing actions and the host menu
//!
//! These drive a full session through host events: the client starts, the
//! menu appears, the user connects and swaps, and the client stops.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use remoteplus_core::actions::{CONNECT_DEFAULT_LABEL, SWAP_LABEL};
use remoteplus_core::{
    AutoConnectConfig, ConnectDefaultOutcome, ConnectionMode, ConnectionService, HostEvent,
    HostEventListener, HostEvents, InMemoryHost, MenuAction, MenuController, RemoteActions,
    RemoteHost, SwapOutcome,
};

fn default_config() -> AutoConnectConfig {
    AutoConnectConfig {
        autoconnect: true,
        host: "relay.example:7000".to_string(),
        key: "shared".to_string(),
        ..AutoConnectConfig::default()
    }
}

fn connected_event(host: &InMemoryHost) -> HostEvent {
    let session = host.current_session();
    HostEvent::ConnectionChanged {
        mode: session.as_ref().map_or(ConnectionMode::Leader, |s| s.mode),
        connected: session.is_some(),
    }
}

#[test]
fn test_full_session_lifecycle() {
    let host = Rc::new(InMemoryHost::new());
    host.set_auto_connect(Some(default_config()));

    let service = ConnectionService::new(host.clone());
    let actions = RemoteActions::new(service.clone());
    let menu = Rc::new(RefCell::new(MenuController::new(service, host.clone())));
    let listener: Rc<RefCell<dyn HostEventListener>> = menu.clone();
    let mut events = HostEvents::new();
    events.subscribe(&listener);

    events.emit(HostEvent::ClientStarted);
    let swap_entry = host.menu_entry(SWAP_LABEL).unwrap();
    assert!(!swap_entry.enabled);
    let default_entry = host.menu_entry(CONNECT_DEFAULT_LABEL).unwrap();
    assert!(default_entry.enabled);

    assert_eq!(
        menu.borrow().activate(default_entry.id),
        Some(MenuAction::ConnectDefault)
    );
    assert_eq!(
        actions.perform_connect_to_default(|_| true),
        ConnectDefaultOutcome::Connected
    );
    events.emit(connected_event(&host));
    assert!(host.menu_entry(SWAP_LABEL).unwrap().enabled);
    assert!(!host.menu_entry(CONNECT_DEFAULT_LABEL).unwrap().enabled);

    assert_eq!(
        menu.borrow().activate(swap_entry.id),
        Some(MenuAction::Swap)
    );
    let outcome = actions.perform_swap(|| true);
    let SwapOutcome::Swapped(info) = outcome.clone() else {
        panic!("expected a swap, got {outcome:?}");
    };
    assert_eq!(info.mode, ConnectionMode::Follower);
    assert_eq!(info.hostname, "relay.example");
    assert_eq!(info.port, 7000);
    events.emit(connected_event(&host));
    assert!(host.menu_entry(CONNECT_DEFAULT_LABEL).unwrap().enabled);

    events.emit(HostEvent::ClientStopped);
    host.set_running(false);
    assert!(host.menu_entries().is_empty());
    assert_eq!(
        actions.perform_swap(|| true),
        SwapOutcome::RemoteDisabled
    );
}

#[test]
fn test_dropped_menu_stops_listening() {
    let host = Rc::new(InMemoryHost::new());
    let menu = Rc::new(RefCell::new(MenuController::new(
        ConnectionService::new(host.clone()),
        host.clone(),
    )));
    let listener: Rc<RefCell<dyn HostEventListener>> = menu.clone();
    let mut events = HostEvents::new();
    events.subscribe(&listener);
    drop(listener);
    drop(menu);

    events.emit(HostEvent::ClientStarted);
    assert!(events.is_empty());
    assert!(host.menu_entries().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// The follower confirmation is asked exactly when leaving a follower
    /// session with the preference enabled
    #[test]
    fn swap_confirmation_rule(
        follower in any::<bool>(),
        preference in prop::option::of(any::<bool>()),
        accept in any::<bool>(),
    ) {
        let host = Rc::new(InMemoryHost::new());
        let mode = if follower { ConnectionMode::Follower } else { ConnectionMode::Leader };
        host.set_session(Some(remoteplus_core::ConnectionInfo::new(
            mode, "peer.example", 6837, "k", false,
        )));
        host.set_ui_settings(remoteplus_core::RemoteUiSettings {
            confirm_disconnect_as_follower: preference,
        });
        let actions = RemoteActions::new(ConnectionService::new(host.clone()));

        let mut asked = false;
        let outcome = actions.perform_swap(|| {
            asked = true;
            accept
        });

        let should_ask = follower && preference.unwrap_or(true);
        prop_assert_eq!(asked, should_ask);
        if should_ask && !accept {
            prop_assert_eq!(outcome, SwapOutcome::Cancelled);
            prop_assert!(host.calls().is_empty());
        } else {
            let swapped = matches!(outcome, SwapOutcome::Swapped(ref info) if info.mode == mode.flipped());
            prop_assert!(swapped);
        }
    }
}
