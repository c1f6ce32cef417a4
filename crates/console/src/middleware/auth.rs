//! Authentication extractor for mutating routes.
//!
//! Authentication is derived entirely from the request's cookie header;
//! there is no server-side session state to look up.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::models::SessionPayload;
use crate::session::{SESSION_COOKIE_NAME, extract_cookie_value, session_from_value};

/// Extractor that requires a live admin session.
///
/// Rejects with 401 when the session cookie is absent, malformed, or
/// expired. Read-only routes simply omit the extractor.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(session): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     // session.expires_at is known to be in the future here
/// }
/// ```
pub struct RequireAdminAuth(pub SessionPayload);

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = extract_cookie_value(&parts.headers, SESSION_COOKIE_NAME);
        session_from_value(raw.as_deref())
            .map(Self)
            .ok_or(AppError::Unauthorized)
    }
}
