//! Profile editor input validation.

use crate::address::parse_address;
use crate::error::ValidationError;
use crate::models::{ConnectionMode, ProfileFields, DEFAULT_PORT, LOCALHOST};

/// Raw values from the profile editor, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInput {
    /// Display name as typed
    pub name: String,
    /// Host or `host:port` as typed
    pub host: String,
    /// Connection key as typed
    pub key: String,
    /// Port field value
    pub port: u32,
    /// Selected mode
    pub mode: ConnectionMode,
    /// Whether "local server" is selected
    pub self_hosted: bool,
}

impl Default for ProfileInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            host: String::new(),
            key: String::new(),
            port: u32::from(DEFAULT_PORT),
            mode: ConnectionMode::Leader,
            self_hosted: false,
        }
    }
}

/// Validates editor input and produces the values to store.
///
/// Name, key and host are trimmed. Self-hosted profiles always get the host
/// `localhost`. A host typed as `host:port` overrides the port field; if it
/// cannot be parsed the raw host and the port field are kept.
///
/// # Errors
///
/// Returns an error if the host is missing for a remote server, the name or
/// key is missing, or the port is outside `1..=65535`.
pub fn validate_profile_input(input: &ProfileInput) -> Result<ProfileFields, ValidationError> {
    let name = input.name.trim();
    let key = input.key.trim();
    let mut port = input.port;

    let host = if input.self_hosted {
        LOCALHOST.to_string()
    } else {
        let host_input = input.host.trim();
        if host_input.is_empty() {
            return Err(ValidationError::MissingHost);
        }
        if host_input.contains(':') {
            match parse_address(host_input) {
                Ok((parsed_host, parsed_port)) => {
                    port = u32::from(parsed_port);
                    parsed_host
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Keeping unparsed host as typed");
                    host_input.to_string()
                }
            }
        } else {
            host_input.to_string()
        }
    };

    if name.is_empty() || key.is_empty() {
        return Err(ValidationError::MissingNameOrKey);
    }

    let port = u16::try_from(port)
        .ok()
        .filter(|p| *p != 0)
        .ok_or(ValidationError::PortOutOfRange(port))?;

    Ok(ProfileFields::new(name, host, key)
        .with_port(port)
        .with_mode(input.mode)
        .with_self_hosted(input.self_hosted))
}
