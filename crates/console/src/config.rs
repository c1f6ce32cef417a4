//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required for mutations
//! - `VOICEDESK_ADMIN_PASSWORD` - Shared admin secret gating all writes.
//!   The server starts without it, but login returns 500 until it is set.
//!
//! ## Optional
//! - `VOICEDESK_KV_URL` - Redis connection URL (default: redis://127.0.0.1:6379)
//! - `VOICEDESK_HOST` - Bind address (default: 127.0.0.1)
//! - `VOICEDESK_PORT` - Listen port (default: 3000)
//! - `VOICEDESK_SECURE_COOKIES` - Set the `Secure` attribute on the session
//!   cookie (default: false; enable behind HTTPS)
//! - `VOICEDESK_DEFAULT_PUBLIC_KEY` - Project-default widget public key used
//!   when an agent has none
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Console application configuration.
#[derive(Clone)]
pub struct ConsoleConfig {
    /// Shared admin password. `None` when the env var is unset; login then
    /// fails with a configuration error instead of a credential error.
    pub admin_password: Option<SecretString>,
    /// Redis connection URL for the agent store
    pub kv_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Whether to set the `Secure` attribute on the session cookie
    pub secure_cookies: bool,
    /// Project-default widget public key
    pub default_public_key: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl std::fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "[REDACTED]"),
            )
            .field("kv_url", &self.kv_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure_cookies", &self.secure_cookies)
            .field("default_public_key", &self.default_public_key)
            .field("sentry_dsn", &self.sentry_dsn)
            .finish()
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let admin_password = get_optional_env("VOICEDESK_ADMIN_PASSWORD").map(SecretString::from);
        let kv_url = get_env_or_default("VOICEDESK_KV_URL", "redis://127.0.0.1:6379");
        let host = get_env_or_default("VOICEDESK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("VOICEDESK_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("VOICEDESK_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("VOICEDESK_PORT".to_owned(), e.to_string()))?;
        let secure_cookies = get_env_or_default("VOICEDESK_SECURE_COOKIES", "false")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("VOICEDESK_SECURE_COOKIES".to_owned(), e.to_string())
            })?;
        let default_public_key = get_optional_env("VOICEDESK_DEFAULT_PUBLIC_KEY");
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            admin_password,
            kv_url,
            host,
            port,
            secure_cookies,
            default_public_key,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn test_config() -> ConsoleConfig {
        ConsoleConfig {
            admin_password: Some(SecretString::from("hunter2-but-longer")),
            kv_url: "redis://127.0.0.1:6379".to_owned(),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            secure_cookies: false,
            default_public_key: None,
            sentry_dsn: None,
        }
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn debug_redacts_admin_password() {
        let config = test_config();
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(
            !debug_output.contains(
                config
                    .admin_password
                    .as_ref()
                    .unwrap()
                    .expose_secret()
            )
        );
    }
}
