//! Admin session cookie encoding and password verification.
//!
//! The session token is a base64url-encoded JSON payload, deliberately
//! reversible and unsigned: the cookie attributes (`HttpOnly`,
//! `SameSite=Strict`, `Secure` behind HTTPS) are the access-control
//! contract, and the payload carries no secrets. Sessions last 24 hours
//! from issuance with no refresh; logout overwrites the cookie with an
//! already-expired value.
//!
//! Authentication is a pure function of the incoming cookie value. Nothing
//! here touches process-global state, so concurrent requests cannot observe
//! each other's sessions.

use axum::http::{HeaderMap, header::COOKIE};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::ConsoleConfig;
use crate::models::SessionPayload;

/// Name of the admin session cookie.
pub const SESSION_COOKIE_NAME: &str = "vd_admin_session";

/// Session lifetime from issuance.
const SESSION_DURATION_HOURS: i64 = 24;

/// The admin password env var is not configured.
#[derive(Debug, Error)]
#[error("VOICEDESK_ADMIN_PASSWORD is not configured")]
pub struct MissingAdminPassword;

/// Encode a session payload into an opaque cookie value.
#[must_use]
pub fn encode_session(payload: &SessionPayload) -> String {
    // Serializing a two-field struct cannot fail
    let json = serde_json::to_vec(payload).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a raw cookie value back into a payload.
///
/// Any failure (bad base64, bad JSON, wrong shape) is `None`; decode
/// problems are indistinguishable from "no session" by design.
#[must_use]
pub fn decode_session(raw: &str) -> Option<SessionPayload> {
    let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Build a fresh authenticated session expiring 24 hours from now.
#[must_use]
pub fn issue_session() -> SessionPayload {
    SessionPayload {
        authenticated: true,
        expires_at: Utc::now() + Duration::hours(SESSION_DURATION_HOURS),
    }
}

/// Validate a raw cookie value into a live session.
///
/// Returns `None` when the value is absent, malformed, not authenticated,
/// or expired at call time.
#[must_use]
pub fn session_from_value(raw: Option<&str>) -> Option<SessionPayload> {
    let payload = decode_session(raw?)?;
    if !payload.authenticated || payload.is_expired(Utc::now()) {
        return None;
    }
    Some(payload)
}

/// Whether the request headers carry a live admin session.
#[must_use]
pub fn is_authenticated(headers: &HeaderMap) -> bool {
    let raw = extract_cookie_value(headers, SESSION_COOKIE_NAME);
    session_from_value(raw.as_deref()).is_some()
}

/// `Set-Cookie` value establishing a session.
#[must_use]
pub fn session_cookie(payload: &SessionPayload, secure: bool) -> String {
    format_cookie(&encode_session(payload), payload.expires_at, secure)
}

/// `Set-Cookie` value that logs out by overwriting any existing cookie
/// with an empty, already-expired value. Safe to send unconditionally.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    format_cookie("", DateTime::UNIX_EPOCH, secure)
}

fn format_cookie(value: &str, expires: DateTime<Utc>, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Strict; Expires={}",
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Pull a single cookie's value out of the `Cookie` request header.
#[must_use]
pub fn extract_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    for part in raw.split(';') {
        let mut pieces = part.trim().splitn(2, '=');
        let key = pieces.next()?.trim();
        let value = pieces.next()?.trim();
        if key == cookie_name && !value.is_empty() {
            return Some(value.to_owned());
        }
    }
    None
}

/// Check a login password against the configured admin secret.
///
/// The password is a shared-secret literal compared by value; there is no
/// per-user credential store to hash against.
///
/// # Errors
///
/// Returns [`MissingAdminPassword`] when no admin password is configured.
pub fn verify_admin_password(
    candidate: &str,
    config: &ConsoleConfig,
) -> Result<bool, MissingAdminPassword> {
    let expected = config.admin_password.as_ref().ok_or(MissingAdminPassword)?;
    Ok(!candidate.is_empty() && candidate == expected.expose_secret())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;
    use secrecy::SecretString;

    use super::*;

    fn config_with_password(password: Option<&str>) -> ConsoleConfig {
        ConsoleConfig {
            admin_password: password.map(SecretString::from),
            kv_url: "redis://127.0.0.1:6379".to_owned(),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            secure_cookies: false,
            default_public_key: None,
            sentry_dsn: None,
        }
    }

    #[test]
    fn issued_session_round_trips_as_valid() {
        let payload = issue_session();
        let encoded = encode_session(&payload);
        let parsed = session_from_value(Some(&encoded)).unwrap();
        assert!(parsed.authenticated);
        assert_eq!(parsed.expires_at, payload.expires_at);
    }

    #[test]
    fn absent_and_malformed_values_are_no_session() {
        assert!(session_from_value(None).is_none());
        assert!(session_from_value(Some("")).is_none());
        assert!(session_from_value(Some("not base64!!")).is_none());
        let not_json = URL_SAFE_NO_PAD.encode(b"hello");
        assert!(session_from_value(Some(&not_json)).is_none());
        let wrong_shape = URL_SAFE_NO_PAD.encode(br#"{"user":"bob"}"#);
        assert!(session_from_value(Some(&wrong_shape)).is_none());
    }

    #[test]
    fn expired_session_is_no_session() {
        let payload = SessionPayload {
            authenticated: true,
            expires_at: Utc::now() - Duration::hours(1),
        };
        let encoded = encode_session(&payload);
        assert!(session_from_value(Some(&encoded)).is_none());
    }

    #[test]
    fn unauthenticated_payload_is_no_session() {
        let payload = SessionPayload {
            authenticated: false,
            expires_at: Utc::now() + Duration::hours(1),
        };
        let encoded = encode_session(&payload);
        assert!(session_from_value(Some(&encoded)).is_none());
    }

    #[test]
    fn session_cookie_carries_required_attributes() {
        let payload = issue_session();
        let cookie = session_cookie(&payload, false);
        assert!(cookie.starts_with("vd_admin_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));

        let secure = session_cookie(&payload, true);
        assert!(secure.ends_with("; Secure"));
    }

    #[test]
    fn clear_cookie_is_idempotent_and_expired() {
        let first = clear_session_cookie(false);
        let second = clear_session_cookie(false);
        assert_eq!(first, second);
        assert!(first.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));

        // The cleared value never authenticates
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("vd_admin_session="));
        assert!(!is_authenticated(&headers));
    }

    #[test]
    fn extract_cookie_value_finds_among_many() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; vd_admin_session=abc123; lang=en"),
        );
        assert_eq!(
            extract_cookie_value(&headers, SESSION_COOKIE_NAME).as_deref(),
            Some("abc123")
        );
        assert!(extract_cookie_value(&headers, "missing").is_none());
    }

    #[test]
    fn verify_password_requires_configuration() {
        let config = config_with_password(None);
        assert!(verify_admin_password("anything", &config).is_err());
    }

    #[test]
    fn verify_password_matches_exactly() {
        let config = config_with_password(Some("open-sesame"));
        assert!(verify_admin_password("open-sesame", &config).unwrap());
        assert!(!verify_admin_password("wrong", &config).unwrap());
        // Empty candidate never matches
        assert!(!verify_admin_password("", &config).unwrap());
    }
}
