//! Confirmation token generation.

use rand::rngs::OsRng;
use rand::RngCore;

/// Generate an unguessable confirmation token: 16 bytes from the OS entropy
/// source, hex-encoded (32 characters).
///
/// Tokens act as bearer credentials in confirmation and history links, so
/// they must come from a cryptographically secure source. An unavailable
/// entropy source aborts the process; there is no safe fallback.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
