//! Property-based tests for address parsing and formatting

use proptest::prelude::*;
use remoteplus_core::{format_address, parse_address, AddressError, DEFAULT_PORT};

// ========== Generators ==========

// Strategy for generating DNS-style hostnames
fn arb_hostname() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]([a-zA-Z0-9-]{0,15}[a-zA-Z0-9])?(\\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,15}[a-zA-Z0-9])?){0,3}"
}

// Strategy for generating IPv6 literals without brackets
fn arb_ipv6() -> impl Strategy<Value = String> {
    prop::collection::vec("[0-9a-f]{1,4}", 3..=8).prop_map(|parts| parts.join(":"))
}

// Strategy for generating valid ports
fn arb_port() -> impl Strategy<Value = u16> {
    1u16..=65535u16
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Formatting then parsing yields the lower-cased host and the same port
    #[test]
    fn format_then_parse_hostname(host in arb_hostname(), port in arb_port()) {
        let address = format_address(&host, port);
        let (parsed_host, parsed_port) = parse_address(&address).unwrap();

        prop_assert_eq!(parsed_host, host.to_lowercase());
        prop_assert_eq!(parsed_port, port);
    }

    /// IPv6 literals are bracketed and survive parsing
    #[test]
    fn format_then_parse_ipv6(host in arb_ipv6(), port in arb_port()) {
        let address = format_address(&host, port);
        prop_assert!(address.starts_with('['));

        let (parsed_host, parsed_port) = parse_address(&address).unwrap();
        prop_assert_eq!(parsed_host, host);
        prop_assert_eq!(parsed_port, port);
    }

    /// The default port is never written out
    #[test]
    fn default_port_is_omitted(host in arb_hostname()) {
        let address = format_address(&host, DEFAULT_PORT);
        prop_assert_eq!(&address, &host);
        prop_assert_eq!(parse_address(&address).unwrap().1, DEFAULT_PORT);
    }

    /// Ports above the u16 range are rejected
    #[test]
    fn out_of_range_port_is_rejected(host in arb_hostname(), port in 65_536u32..10_000_000u32) {
        let result = parse_address(&format!("{host}:{port}"));
        let is_invalid_port = matches!(result, Err(AddressError::InvalidPort { .. }));
        prop_assert!(is_invalid_port);
    }

    /// Surrounding whitespace is ignored
    #[test]
    fn whitespace_is_trimmed(host in arb_hostname(), port in arb_port()) {
        let padded = format!("  {}\t", format_address(&host, port));
        prop_assert_eq!(
            parse_address(&padded).unwrap(),
            (host.to_lowercase(), port)
        );
    }

    /// Parsing arbitrary text never panics and never yields an empty host
    #[test]
    fn parse_never_yields_empty_host(text in ".{0,40}") {
        if let Ok((host, _)) = parse_address(&text) {
            prop_assert!(!host.is_empty());
        }
    }
}
