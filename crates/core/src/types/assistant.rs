//! Third-party assistant identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`AssistantId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistantIdError {
    /// The input is empty after trimming.
    #[error("assistantId is required")]
    Empty,
}

/// An opaque identifier for a third-party conversational assistant.
///
/// The id is treated as an opaque token owned by the voice provider; the
/// only constraint is that it is non-empty after trimming.
///
/// ## Examples
///
/// ```
/// use voicedesk_core::AssistantId;
///
/// assert_eq!(AssistantId::parse(" asst_1 ").unwrap().as_str(), "asst_1");
/// assert!(AssistantId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AssistantId(String);

impl AssistantId {
    /// Parse an `AssistantId` from a string, trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantIdError::Empty`] if the trimmed input is empty.
    pub fn parse(raw: &str) -> Result<Self, AssistantIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AssistantIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `AssistantId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AssistantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims() {
        assert_eq!(AssistantId::parse("  asst_42  ").unwrap().as_str(), "asst_42");
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(AssistantId::parse(""), Err(AssistantIdError::Empty));
        assert_eq!(AssistantId::parse("   "), Err(AssistantIdError::Empty));
    }

    #[test]
    fn parse_accepts_arbitrary_format() {
        // No format constraint beyond non-empty
        assert!(AssistantId::parse("anything goes here").is_ok());
    }
}
