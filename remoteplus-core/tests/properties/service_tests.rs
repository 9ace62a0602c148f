//! Property-based tests for the connection service
//!
//! The service is driven against an in-memory host that records every call.

use std::rc::Rc;

use proptest::prelude::*;
use remoteplus_core::{
    AutoConnectConfig, ConnectionInfo, ConnectionMode, ConnectionService, HostCall, InMemoryHost,
    Profile, ProfileFields, RemoteHost, DEFAULT_PORT, LOCALHOST,
};

fn create_test_service() -> (ConnectionService, Rc<InMemoryHost>) {
    let host = Rc::new(InMemoryHost::new());
    (ConnectionService::new(host.clone()), host)
}

// ========== Generators ==========

fn arb_mode() -> impl Strategy<Value = ConnectionMode> {
    prop_oneof![Just(ConnectionMode::Leader), Just(ConnectionMode::Follower)]
}

fn arb_profile() -> impl Strategy<Value = Profile> {
    (
        "[a-z]{1,8}",
        "[a-z0-9]{1,10}\\.example",
        "[A-Za-z0-9]{1,12}",
        1u16..=65535u16,
        arb_mode(),
        any::<bool>(),
    )
        .prop_map(|(name, host, key, port, mode, self_hosted)| {
            Profile::new(
                ProfileFields::new(name, host, key)
                    .with_port(port)
                    .with_mode(mode)
                    .with_self_hosted(self_hosted),
            )
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A profile set as auto-connect is recognised as the default once connected
    #[test]
    fn auto_connect_profile_becomes_default(profile in arb_profile()) {
        let (service, host) = create_test_service();
        service.set_as_auto_connect(&profile);
        prop_assert!(service.is_auto_connect_configured());

        prop_assert!(service.perform_auto_connect());
        prop_assert!(service.is_connected());
        prop_assert!(service.is_current_connection_default());

        let session = host.current_session().unwrap();
        prop_assert_eq!(session.port, profile.port);
        prop_assert_eq!(session.mode, profile.mode);
        prop_assert_eq!(session.insecure, profile.self_hosted);
        prop_assert_eq!(session.hostname.as_str(), profile.effective_host());
    }

    /// Connecting with a profile issues exactly the expected host calls
    #[test]
    fn connect_profile_calls(profile in arb_profile(), reversed in any::<bool>(), busy in any::<bool>()) {
        let (service, host) = create_test_service();
        if busy {
            host.set_session(Some(ConnectionInfo::new(
                ConnectionMode::Leader,
                "busy.example",
                DEFAULT_PORT,
                "k",
                false,
            )));
        }

        service.connect_profile(&profile, reversed);

        let mut expected = Vec::new();
        if busy {
            expected.push(HostCall::Disconnect { silent: true });
        }
        if profile.self_hosted {
            expected.push(HostCall::StartLocalServer {
                port: profile.port,
                key: profile.key.clone(),
            });
        }
        let info = if reversed {
            profile.reversed_connection_info()
        } else {
            profile.connection_info()
        };
        expected.push(HostCall::Connect(info));
        prop_assert_eq!(host.calls(), expected);
    }

    /// Swapping twice returns to the original mode
    #[test]
    fn swap_target_is_an_involution(profile in arb_profile()) {
        let (service, host) = create_test_service();
        host.set_session(Some(profile.connection_info()));

        let (first, mode) = service.swap_target_info().unwrap();
        prop_assert_eq!(mode, profile.mode.flipped());
        host.set_session(Some(first));

        let (second, _) = service.swap_target_info().unwrap();
        prop_assert_eq!(second, profile.connection_info());
    }

    /// Any difference in key or mode means the session is not the default
    #[test]
    fn changed_session_is_not_default(profile in arb_profile()) {
        let (service, host) = create_test_service();
        service.set_as_auto_connect(&profile);

        let mut session = profile.connection_info();
        session.key.push('x');
        host.set_session(Some(session));
        prop_assert!(!service.is_current_connection_default());

        host.set_session(Some(profile.reversed_connection_info()));
        prop_assert!(!service.is_current_connection_default());
    }
}

#[test]
fn test_detached_service_does_nothing() {
    let service = ConnectionService::detached();
    assert!(!service.is_running());
    assert!(!service.perform_auto_connect());
    assert_eq!(service.swap_target_info(), None);
    service.connect_profile(
        &Profile::new(ProfileFields::new("n", "h", "k")),
        false,
    );
}

#[test]
fn test_malformed_auto_connect_host_is_not_used() {
    let (service, host) = create_test_service();
    host.set_auto_connect(Some(AutoConnectConfig {
        autoconnect: true,
        host: "example.org:notaport".to_string(),
        key: "k".to_string(),
        ..AutoConnectConfig::default()
    }));

    assert!(service.is_auto_connect_configured());
    assert!(!service.perform_auto_connect());
    assert!(host.calls().is_empty());
    assert!(!service.is_current_connection_default());
}

#[test]
fn test_self_hosted_auto_connect_keeps_remote_host() {
    let (service, host) = create_test_service();
    host.set_auto_connect(Some(AutoConnectConfig {
        host: "remote.example".to_string(),
        ..AutoConnectConfig::default()
    }));

    let profile = Profile::new(
        ProfileFields::new("local", LOCALHOST, "k")
            .with_port(7000)
            .with_self_hosted(true),
    );
    service.set_as_auto_connect(&profile);

    let config = host.auto_connect_config().unwrap();
    assert!(config.autoconnect);
    assert!(config.self_hosted);
    assert_eq!(config.host, "remote.example");
    assert_eq!(config.port, Some(7000));
}
