//! Connection key generator
//!
//! Produces the random 7-digit keys offered by the profile editor.

use ring::rand::{SecureRandom, SystemRandom};

use crate::error::KeyError;

/// Smallest generated key
const KEY_MIN: u32 = 1_000_000;

/// Number of distinct keys (1000000..=9999999)
const KEY_SPAN: u32 = 9_000_000;

/// Largest multiple of `KEY_SPAN` that fits in a `u32`; draws at or above it
/// are rejected so every key is equally likely
const REJECTION_LIMIT: u32 = u32::MAX - (u32::MAX % KEY_SPAN);

/// Generates a uniformly random 7-digit decimal key
///
/// # Errors
///
/// Returns an error if the system random number generator fails.
pub fn generate_key() -> Result<String, KeyError> {
    let rng = SystemRandom::new();
    loop {
        let mut buf = [0u8; 4];
        rng.fill(&mut buf).map_err(|_| KeyError::RngError)?;
        if let Some(key) = key_from_draw(u32::from_le_bytes(buf)) {
            return Ok(key);
        }
    }
}

/// Maps a raw 32-bit draw onto a key, or `None` if the draw must be rejected
fn key_from_draw(draw: u32) -> Option<String> {
    (draw < REJECTION_LIMIT).then(|| (KEY_MIN + draw % KEY_SPAN).to_string())
}
