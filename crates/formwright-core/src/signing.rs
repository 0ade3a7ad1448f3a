//! Keyed digests and encoding helpers.
//!
//! The captcha challenge is derived from an HMAC over request identity
//! signals; its expected characters are compared on the client in base64
//! form (`btoa`), so the standard base64 alphabet is used here.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes HMAC-SHA256 of `message` under `key` and returns it as lowercase hex.
///
/// # Examples
///
/// ```
/// use formwright_core::signing::keyed_hex_digest;
///
/// let a = keyed_hex_digest("secret", "agent|host");
/// assert_eq!(a.len(), 64);
/// assert_eq!(a, keyed_hex_digest("secret", "agent|host"));
/// assert_ne!(a, keyed_hex_digest("other", "agent|host"));
/// ```
pub fn keyed_hex_digest(key: &str, message: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    hex_encode(&mac.finalize().into_bytes())
}

/// Encodes a string with the standard base64 alphabet, matching the browser's `btoa`
/// for ASCII input.
///
/// # Examples
///
/// ```
/// use formwright_core::signing::base64_encode;
///
/// assert_eq!(base64_encode("a"), "YQ==");
/// ```
pub fn base64_encode(s: &str) -> String {
    STANDARD.encode(s.as_bytes())
}

/// Encodes bytes as a hex string.
fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
            let _ = write!(s, "{b:02x}");
            s
        })
}
