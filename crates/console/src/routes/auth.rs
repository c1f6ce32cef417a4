//! Login and logout route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::session::{clear_session_cookie, issue_session, session_cookie, verify_admin_password};
use crate::state::AppState;

/// Body for the auth endpoint.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub action: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Success body for both login and logout.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
}

/// Handle `POST /api/auth` with `{"action": "login"|"logout"}`.
///
/// Login checks the shared admin password and sets the session cookie.
/// Logout always succeeds and overwrites the cookie with an expired value,
/// regardless of prior auth state.
///
/// # Errors
///
/// 400 malformed body or unsupported action, 401 wrong password, 500 when
/// no admin password is configured.
pub async fn authenticate(
    State(state): State<AppState>,
    body: std::result::Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(body) =
        body.map_err(|_| AppError::Validation("Invalid JSON body".to_owned()))?;

    match body.action.as_str() {
        "login" => {
            let candidate = body.password.unwrap_or_default();
            let matches = verify_admin_password(&candidate, state.config())
                .map_err(|err| AppError::Configuration(err.to_string()))?;
            if !matches {
                return Err(AppError::Unauthorized);
            }

            let session = issue_session();
            let cookie = session_cookie(&session, state.config().secure_cookies);
            tracing::info!("Admin logged in");
            respond_with_cookie(&cookie)
        }
        "logout" => {
            let cookie = clear_session_cookie(state.config().secure_cookies);
            respond_with_cookie(&cookie)
        }
        _ => Err(AppError::Validation("Unsupported action".to_owned())),
    }
}

fn respond_with_cookie(cookie: &str) -> Result<Response> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|_| AppError::Internal("invalid session cookie value".to_owned()))?;
    let mut response = Json(AuthResponse { success: true }).into_response();
    response.headers_mut().insert(SET_COOKIE, value);
    Ok(response)
}
