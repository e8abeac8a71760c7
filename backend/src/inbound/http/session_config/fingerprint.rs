//! Session key fingerprinting.
//!
//! Startup logs carry a short SHA-256 fingerprint of the active cookie key so
//! operators can tell whether two instances share a key, or whether a
//! rotation took effect, without the key itself reaching the logs.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of the digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Truncated SHA-256 fingerprint of the key's signing half, as lowercase hex.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use wedding_backend::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fingerprint = key_fingerprint(&Key::generate());
/// assert_eq!(fingerprint.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_material_gives_same_fingerprint() {
        let first = Key::derive_from(&[b'a'; 64]);
        let second = Key::derive_from(&[b'a'; 64]);

        assert_eq!(key_fingerprint(&first), key_fingerprint(&second));
    }

    #[rstest]
    fn different_material_gives_different_fingerprints() {
        let first = Key::derive_from(&[b'a'; 64]);
        let second = Key::derive_from(&[b'b'; 64]);

        assert_ne!(key_fingerprint(&first), key_fingerprint(&second));
    }

    #[rstest]
    fn fingerprint_is_short_lowercase_hex() {
        let fingerprint = key_fingerprint(&Key::generate());

        assert_eq!(fingerprint.len(), FINGERPRINT_BYTES * 2);
        assert!(
            fingerprint
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }
}
