//! Agent name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Names that can never be used for agents because they collide with
/// console routes.
pub const RESERVED_AGENT_NAMES: &[&str] = &[
    "admin", "api", "auth", "login", "logout", "health", "static", "public",
];

/// Errors that can occur when parsing an [`AgentName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentNameError {
    /// The normalized name is outside the allowed length range.
    #[error("name must be between {min} and {max} characters")]
    InvalidLength {
        /// Minimum allowed length.
        min: usize,
        /// Maximum allowed length.
        max: usize,
    },
    /// The name contains characters outside `[a-z0-9-]`.
    #[error("name can only include lowercase letters, numbers, and hyphens")]
    InvalidCharset,
    /// The name starts or ends with a hyphen.
    #[error("name cannot start or end with a hyphen")]
    EdgeHyphen,
    /// The name collides with a console route.
    #[error("name is reserved")]
    Reserved,
}

/// A validated, normalized agent name.
///
/// The name acts both as the store key (`agent:<name>`) and as the public
/// URL slug for the agent, so the rules are strict: lowercase ASCII
/// letters, digits, and hyphens only.
///
/// ## Constraints
///
/// - Length: 2-50 characters after trimming and lowercasing
/// - Charset: `[a-z0-9-]`
/// - May not start or end with a hyphen
/// - May not be one of [`RESERVED_AGENT_NAMES`] (checked case-insensitively,
///   since input is lowercased first)
///
/// ## Examples
///
/// ```
/// use voicedesk_core::AgentName;
///
/// // Input is trimmed and lowercased before validation
/// assert_eq!(AgentName::parse(" Sales-Bot ").unwrap().as_str(), "sales-bot");
///
/// assert!(AgentName::parse("a").is_err());     // too short
/// assert!(AgentName::parse("-abc").is_err());  // edge hyphen
/// assert!(AgentName::parse("a_b").is_err());   // bad charset
/// assert!(AgentName::parse("Admin").is_err()); // reserved
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AgentName(String);

impl AgentName {
    /// Minimum length of an agent name.
    pub const MIN_LENGTH: usize = 2;
    /// Maximum length of an agent name.
    pub const MAX_LENGTH: usize = 50;

    /// Trim and lowercase a raw name without validating it.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Parse an `AgentName` from a string, normalizing first.
    ///
    /// # Errors
    ///
    /// Returns an error if the normalized input:
    /// - Is shorter than 2 or longer than 50 characters
    /// - Contains characters outside `[a-z0-9-]`
    /// - Starts or ends with a hyphen
    /// - Is a reserved name
    pub fn parse(raw: &str) -> Result<Self, AgentNameError> {
        let normalized = Self::normalize(raw);

        if normalized.len() < Self::MIN_LENGTH || normalized.len() > Self::MAX_LENGTH {
            return Err(AgentNameError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }

        if !normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(AgentNameError::InvalidCharset);
        }

        if normalized.starts_with('-') || normalized.ends_with('-') {
            return Err(AgentNameError::EdgeHyphen);
        }

        if RESERVED_AGENT_NAMES.contains(&normalized.as_str()) {
            return Err(AgentNameError::Reserved);
        }

        Ok(Self(normalized))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `AgentName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let name = AgentName::parse("  Sales-Bot  ").unwrap();
        assert_eq!(name.as_str(), "sales-bot");
    }

    #[test]
    fn parse_accepts_digits_and_hyphens() {
        assert!(AgentName::parse("agent-007").is_ok());
        assert!(AgentName::parse("a1").is_ok());
    }

    #[test]
    fn parse_rejects_length() {
        assert_eq!(
            AgentName::parse("a"),
            Err(AgentNameError::InvalidLength { min: 2, max: 50 })
        );
        let long = "a".repeat(51);
        assert!(AgentName::parse(&long).is_err());
        // Exactly 50 is fine
        let max = "a".repeat(50);
        assert!(AgentName::parse(&max).is_ok());
    }

    #[test]
    fn parse_rejects_charset() {
        assert_eq!(AgentName::parse("a_b"), Err(AgentNameError::InvalidCharset));
        assert_eq!(
            AgentName::parse("agent bot"),
            Err(AgentNameError::InvalidCharset)
        );
        assert_eq!(
            AgentName::parse("\u{e9}clair"),
            Err(AgentNameError::InvalidCharset)
        );
    }

    #[test]
    fn parse_rejects_edge_hyphens() {
        assert_eq!(AgentName::parse("-abc"), Err(AgentNameError::EdgeHyphen));
        assert_eq!(AgentName::parse("abc-"), Err(AgentNameError::EdgeHyphen));
        // Interior hyphens are fine
        assert!(AgentName::parse("a-b-c").is_ok());
    }

    #[test]
    fn parse_rejects_reserved_names_case_insensitively() {
        assert_eq!(AgentName::parse("admin"), Err(AgentNameError::Reserved));
        assert_eq!(AgentName::parse("Admin"), Err(AgentNameError::Reserved));
        assert_eq!(AgentName::parse("API"), Err(AgentNameError::Reserved));
        assert_eq!(AgentName::parse("logout"), Err(AgentNameError::Reserved));
    }

    #[test]
    fn serde_is_transparent() {
        let name = AgentName::parse("sales-bot").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"sales-bot\"");
    }
}
