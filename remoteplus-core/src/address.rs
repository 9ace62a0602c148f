//! Address string parsing
//!
//! Converts between the `host`, `host:port` and `[ipv6]:port` strings stored in
//! the host's auto-connect record and typed in the profile editor, and a
//! `(hostname, port)` pair.

use crate::error::{AddressError, AddressResult};
use crate::models::DEFAULT_PORT;

/// Parses an address into a lower-cased hostname and a port.
///
/// A missing, empty or zero port yields the default port 6837.
///
/// # Errors
///
/// Returns an error if the hostname is empty, an IPv6 literal is not closed,
/// or the port is not a decimal number in `0..=65535`.
pub fn parse_address(address: &str) -> AddressResult<(String, u16)> {
    let trimmed = address.trim();

    let (host, port_text) = if let Some(rest) = trimmed.strip_prefix('[') {
        let (host, after) = rest
            .split_once(']')
            .ok_or_else(|| AddressError::UnterminatedBracket(address.to_string()))?;
        let port_text = match after.strip_prefix(':') {
            Some(port) => port,
            None if after.is_empty() => "",
            None => {
                return Err(AddressError::InvalidPort {
                    address: address.to_string(),
                    port: after.to_string(),
                })
            }
        };
        (host, port_text)
    } else {
        trimmed.split_once(':').unwrap_or((trimmed, ""))
    };

    if host.is_empty() {
        return Err(AddressError::EmptyHost(address.to_string()));
    }

    let port = parse_port(address, port_text)?;
    Ok((host.to_lowercase(), port))
}

fn parse_port(address: &str, text: &str) -> AddressResult<u16> {
    if text.is_empty() {
        return Ok(DEFAULT_PORT);
    }
    let invalid = || AddressError::InvalidPort {
        address: address.to_string(),
        port: text.to_string(),
    };
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match text.parse::<u16>() {
        Ok(0) => Ok(DEFAULT_PORT),
        Ok(port) => Ok(port),
        Err(_) => Err(invalid()),
    }
}

/// Formats a hostname and port as an address string.
///
/// The port is omitted when it is the default; IPv6 literals are bracketed.
#[must_use]
pub fn format_address(host: &str, port: u16) -> String {
    let host = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_string()
    };
    if port == DEFAULT_PORT {
        host
    } else {
        format!("{host}:{port}")
    }
}
