//! Server configuration loaded from the environment.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::Key;
use thiserror::Error;

use crate::server::session_key::{SessionKeyError, ephemeral_session_key, load_session_key};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Failures while assembling the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `DATABASE_URL` was not set.
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    /// `BIND_ADDR` did not parse as a socket address.
    #[error("BIND_ADDR {value} is not a socket address")]
    InvalidBindAddr { value: String },
    /// The session key could not be obtained.
    #[error(transparent)]
    SessionKey(#[from] SessionKeyError),
}

/// Everything the server needs before it can bind a socket.
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub key: Key,
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Assemble the configuration from the process environment.
    ///
    /// `DATABASE_URL` is required. `BIND_ADDR` defaults to `0.0.0.0:8080`,
    /// `SESSION_KEY_FILE` to `/var/run/secrets/session_key`, and
    /// `SESSION_COOKIE_SECURE` to on (set `0` to disable behind TLS-free
    /// development setups). When the key file is unavailable, debug builds
    /// and `SESSION_ALLOW_EPHEMERAL=1` fall back to a generated key.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a required variable is missing or
    /// malformed, or when the session key cannot be loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr { value: bind_addr })?;

        let key_path =
            env::var("SESSION_KEY_FILE").unwrap_or_else(|_| DEFAULT_SESSION_KEY_FILE.into());
        let allow_ephemeral = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
        let key = match load_session_key(&key_path) {
            Ok(key) => key,
            Err(err) if cfg!(debug_assertions) || allow_ephemeral => {
                tracing::warn!(error = %err, "session key unavailable");
                ephemeral_session_key()
            }
            Err(err) => return Err(err.into()),
        };

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|value| value != "0")
            .unwrap_or(true);

        Ok(Self {
            database_url,
            bind_addr,
            key,
            cookie_secure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_parse_accepts_the_default() {
        let parsed: Result<SocketAddr, _> = DEFAULT_BIND_ADDR.parse();
        assert!(parsed.is_ok());
    }

    #[test]
    fn invalid_bind_addr_names_the_value() {
        let err = ConfigError::InvalidBindAddr {
            value: "not-an-addr".into(),
        };
        assert!(err.to_string().contains("not-an-addr"));
    }
}
