//! Session signing key loading.
//!
//! The key is read from a file so it can be mounted as a secret. Losing or
//! rotating the key invalidates every outstanding session cookie.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};

/// Minimum key material length in bytes. `Key::derive_from` stretches the
/// input, but short files are almost always a misconfigured secret.
pub const MIN_KEY_BYTES: usize = 64;

/// Failures while obtaining the session signing key.
#[derive(Debug, Error)]
pub enum SessionKeyError {
    /// The key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The key file held fewer than [`MIN_KEY_BYTES`] bytes.
    #[error("session key at {path} holds {actual} bytes, need at least {MIN_KEY_BYTES}")]
    TooShort { path: String, actual: usize },
}

#[expect(
    clippy::indexing_slicing,
    reason = "SHA-256 digests are always 32 bytes"
)]
fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(&digest[..4])
}

/// Load the session key from `path`, validating its length and logging a
/// short fingerprint so deployments can confirm which key is active.
pub fn load_session_key(path: &str) -> Result<Key, SessionKeyError> {
    let bytes = std::fs::read(path).map_err(|source| SessionKeyError::Unreadable {
        path: path.to_owned(),
        source,
    })?;
    if bytes.len() < MIN_KEY_BYTES {
        return Err(SessionKeyError::TooShort {
            path: path.to_owned(),
            actual: bytes.len(),
        });
    }
    info!(path, fingerprint = %fingerprint(&bytes), "loaded session key");
    Ok(Key::derive_from(&bytes))
}

/// Generate a throwaway key for development runs. Sessions will not survive
/// a restart.
pub fn ephemeral_session_key() -> Key {
    warn!("using an ephemeral session key; sessions reset on restart");
    Key::generate()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn key_file(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(bytes).expect("write key material");
        file
    }

    #[test]
    fn loads_a_key_of_sufficient_length() {
        let file = key_file(&[7u8; MIN_KEY_BYTES]);
        let path = file.path().to_str().expect("utf8 path");
        load_session_key(path).expect("key loads");
    }

    #[test]
    fn rejects_a_short_key_file() {
        let file = key_file(&[7u8; MIN_KEY_BYTES - 1]);
        let path = file.path().to_str().expect("utf8 path");
        let err = load_session_key(path).err().expect("short key rejected");
        assert!(matches!(
            err,
            SessionKeyError::TooShort { actual, .. } if actual == MIN_KEY_BYTES - 1
        ));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = load_session_key("/nonexistent/session_key")
            .err()
            .expect("missing file rejected");
        assert!(matches!(err, SessionKeyError::Unreadable { .. }));
    }

    #[test]
    fn fingerprint_is_stable_and_short() {
        let a = fingerprint(b"key material");
        let b = fingerprint(b"key material");
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }
}
