//! One-time token generation for the reset and confirmation flows.
//!
//! Raw tokens leave the system exactly once, inside an email; only their
//! sha256 hex digests are stored, so a leaked database dump cannot be
//! replayed against the reset endpoints.

use rand::Rng;
use sha2::{Digest, Sha256};

/// sha256 of the input, hex-encoded
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill(buf.as_mut_slice());
    hex::encode(buf)
}

/// Generates a password-reset token: `(raw, stored_hash)`
pub fn reset_token() -> (String, String) {
    let raw = random_hex(20);
    let hash = sha256_hex(&raw);
    (raw, hash)
}

/// Generates an email-confirmation token: `(raw, stored_hash)`.
///
/// The raw form is `{id}.{extension}` where only the id part is hashed and
/// stored; the extension pads the emailed token without growing the stored
/// digest.
pub fn confirm_token() -> (String, String) {
    let id = random_hex(20);
    let extension = random_hex(100);
    let hash = sha256_hex(&id);
    (format!("{id}.{extension}"), hash)
}

/// Recovers the stored hash from a presented confirmation token
pub fn confirm_token_hash(raw: &str) -> String {
    let id = raw.split('.').next().unwrap_or(raw);
    sha256_hex(id)
}
