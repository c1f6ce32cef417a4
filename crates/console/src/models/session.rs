//! Admin session payload carried in the session cookie.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The decoded contents of the admin session cookie.
///
/// A payload is only considered valid when `authenticated` is true and
/// `expires_at` is strictly in the future; see
/// [`crate::session::session_from_value`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub authenticated: bool,
    pub expires_at: DateTime<Utc>,
}

impl SessionPayload {
    /// Whether the session has passed its expiry instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
