//! Core data models for `Remote++`
//!
//! This module defines the data structures shared by the store and the
//! connection service: profiles, groups, session roles and connect descriptors.

mod connection_info;
mod group;
mod mode;
mod profile;

pub use connection_info::{ConnectionInfo, URL_SCHEME};
pub use group::{ConnectionGroup, DEFAULT_GROUP};
pub use mode::ConnectionMode;
pub use profile::{Profile, ProfileFields, ProfileUpdate, DEFAULT_PORT, LOCALHOST};
