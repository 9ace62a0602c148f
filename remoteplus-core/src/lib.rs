//! `Remote++` Core Library
//!
//! This crate provides the core of the `Remote++` screen-reader add-on: a
//! persistent store of named remote-access connection profiles organized
//! into groups, and a decision service that sits between that store and the
//! host screen reader's remote-access client.
//!
//! The host client is reached only through the traits in [`host`]; the
//! [`actions`] module turns user commands into host calls and keeps the
//! host menu in step with the client.

pub mod actions;
pub mod address;
pub mod config;
pub mod connection;
pub mod error;
pub mod host;
pub mod key;
pub mod models;
pub mod service;
pub mod tracing;

pub use actions::{
    ConnectDefaultOutcome, MenuAction, MenuController, MenuState, RemoteActions, RemoteDisabled,
    SwapOutcome, SwitchToDefaultPrompt,
};
pub use address::{format_address, parse_address};
pub use config::{
    validate_profile_input, AutoConnectConfig, ConfigManager, ProfileInput, RemoteUiSettings,
    StoreDocument,
};
pub use connection::{filter_profiles, ConnectionStore, MoveDirection};
pub use error::{
    AddressError, AddressResult, ConfigError, ConfigResult, KeyError, RemotePlusError,
    ValidationError,
};
pub use host::{
    HostCall, HostEvent, HostEventListener, HostEvents, HostMenu, InMemoryHost, MenuEntry,
    MenuItemId, RemoteHost,
};
pub use key::generate_key;
pub use models::{
    ConnectionGroup, ConnectionInfo, ConnectionMode, Profile, ProfileFields, ProfileUpdate,
    DEFAULT_GROUP, DEFAULT_PORT, LOCALHOST, URL_SCHEME,
};
pub use service::ConnectionService;
pub use self::tracing::{init_tracing, TracingConfig, TracingError, TracingLevel, TracingOutput};
