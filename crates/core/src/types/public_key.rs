//! Voice widget public key type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PublicKey`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PublicKeyError {
    /// The input is empty after trimming.
    #[error("publicKey cannot be empty")]
    Empty,
    /// The input does not start with the `pub_` prefix.
    #[error("publicKey must start with \"pub_\"")]
    InvalidPrefix,
}

/// A widget public key, as issued by the voice provider.
///
/// Keys are opaque apart from a fixed literal prefix. An agent without a
/// key falls back to the project-default key from configuration.
///
/// ## Examples
///
/// ```
/// use voicedesk_core::PublicKey;
///
/// assert!(PublicKey::parse("pub_123").is_ok());
/// assert!(PublicKey::parse("xyz").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PublicKey(String);

impl PublicKey {
    /// Required prefix for all widget public keys.
    pub const PREFIX: &'static str = "pub_";

    /// Parse a `PublicKey` from a string, trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`PublicKeyError::Empty`] if the trimmed input is empty, or
    /// [`PublicKeyError::InvalidPrefix`] if it does not start with `pub_`.
    pub fn parse(raw: &str) -> Result<Self, PublicKeyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PublicKeyError::Empty);
        }
        if !trimmed.starts_with(Self::PREFIX) {
            return Err(PublicKeyError::InvalidPrefix);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PublicKey` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_prefixed_keys() {
        assert_eq!(PublicKey::parse(" pub_123 ").unwrap().as_str(), "pub_123");
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(PublicKey::parse("   "), Err(PublicKeyError::Empty));
    }

    #[test]
    fn parse_rejects_wrong_prefix() {
        assert_eq!(PublicKey::parse("xyz"), Err(PublicKeyError::InvalidPrefix));
        assert_eq!(
            PublicKey::parse("PUB_123"),
            Err(PublicKeyError::InvalidPrefix)
        );
    }
}
