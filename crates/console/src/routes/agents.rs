//! Agent CRUD route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use voicedesk_core::{AgentName, AssistantId, Patch, PublicKey};

use crate::db::{AgentChanges, AgentRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::Agent;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Body for creating an agent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest {
    pub name: String,
    pub assistant_id: String,
    #[serde(default)]
    pub public_key: Patch<String>,
}

/// Body for partially updating an agent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgentRequest {
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(default)]
    pub public_key: Patch<String>,
}

/// Response wrapping a list of agents.
#[derive(Debug, Serialize)]
pub struct AgentsResponse {
    pub agents: Vec<Agent>,
}

/// Response wrapping a single agent.
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub agent: Agent,
}

/// Response for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Widget configuration handed to the browser-side voice widget.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfigResponse {
    pub assistant_id: AssistantId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Unwrap a JSON body extraction, mapping any rejection to a 400.
fn required_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(inner)| inner)
        .map_err(|_| AppError::Validation("Invalid JSON body".to_owned()))
}

/// Normalize a raw public key patch: an empty-after-trim value means
/// "clear the field", anything else must carry the `pub_` prefix.
fn validate_public_key_patch(raw: Patch<String>) -> Result<Patch<PublicKey>> {
    match raw {
        Patch::Keep => Ok(Patch::Keep),
        Patch::Clear => Ok(Patch::Clear),
        Patch::Set(value) if value.trim().is_empty() => Ok(Patch::Clear),
        Patch::Set(value) => Ok(Patch::Set(PublicKey::parse(&value)?)),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List all agents. Always 200; a store failure degrades to an empty list.
pub async fn list(State(state): State<AppState>) -> Json<AgentsResponse> {
    let agents = AgentRepository::new(state.store()).list_all().await;
    Json(AgentsResponse { agents })
}

/// Create a new agent.
///
/// # Errors
///
/// 401 unauthenticated, 400 invalid body or fields, 409 duplicate name,
/// 500 store failure.
pub async fn create(
    RequireAdminAuth(_session): RequireAdminAuth,
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateAgentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AgentResponse>)> {
    let body = required_body(body)?;

    let name = AgentName::parse(&body.name)?;
    let assistant_id = AssistantId::parse(&body.assistant_id)?;
    let public_key = match validate_public_key_patch(body.public_key)? {
        Patch::Set(key) => Some(key),
        Patch::Keep | Patch::Clear => None,
    };

    let repo = AgentRepository::new(state.store());

    // Check-then-create: uniqueness has no store-side guard, so two
    // concurrent creates for the same name can race. Accepted for an
    // admin-only console.
    if repo.get(&name).await?.is_some() {
        return Err(AppError::Conflict("Agent already exists".to_owned()));
    }

    let agent = repo.create(name, assistant_id, public_key).await?;
    tracing::info!(name = %agent.name, "Agent created");
    Ok((StatusCode::CREATED, Json(AgentResponse { agent })))
}

/// Get a single agent by name.
///
/// # Errors
///
/// 404 when the record is absent or the name is not a valid agent name
/// (an invalid slug can never have a record behind it).
pub async fn show(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AgentResponse>> {
    let name = AgentName::parse(&name).map_err(|_| AppError::NotFound("Agent".to_owned()))?;

    let agent = AgentRepository::new(state.store())
        .get(&name)
        .await?
        .ok_or_else(|| AppError::NotFound("Agent".to_owned()))?;
    Ok(Json(AgentResponse { agent }))
}

/// Partially update an agent.
///
/// Only fields explicitly present in the body change: an omitted
/// `assistantId` keeps the stored value, `"publicKey": null` or an empty
/// string removes the stored key, and a value overwrites it.
///
/// # Errors
///
/// 401 unauthenticated, 400 invalid name/body/fields or no updates at all,
/// 404 absent target, 500 store failure.
pub async fn update(
    RequireAdminAuth(_session): RequireAdminAuth,
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: std::result::Result<Json<UpdateAgentRequest>, JsonRejection>,
) -> Result<Json<AgentResponse>> {
    let name = AgentName::parse(&name)?;
    let body = required_body(body)?;

    if body.assistant_id.is_none() && body.public_key.is_keep() {
        return Err(AppError::Validation("No updates provided".to_owned()));
    }

    let assistant_id = body
        .assistant_id
        .as_deref()
        .map(AssistantId::parse)
        .transpose()?;
    let public_key = validate_public_key_patch(body.public_key)?;

    let agent = AgentRepository::new(state.store())
        .update(
            &name,
            AgentChanges {
                assistant_id,
                public_key,
            },
        )
        .await?;
    tracing::info!(name = %agent.name, "Agent updated");
    Ok(Json(AgentResponse { agent }))
}

/// Delete an agent.
///
/// # Errors
///
/// 401 unauthenticated, 404 when absent (or the name is invalid), 500
/// store failure.
pub async fn remove(
    RequireAdminAuth(_session): RequireAdminAuth,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let name = AgentName::parse(&name).map_err(|_| AppError::NotFound("Agent".to_owned()))?;

    let existed = AgentRepository::new(state.store()).remove(&name).await?;
    if !existed {
        return Err(AppError::NotFound("Agent".to_owned()));
    }
    tracing::info!(%name, "Agent deleted");
    Ok(Json(DeleteResponse { success: true }))
}

/// Widget configuration for one agent.
///
/// Falls back to the project-default public key when the agent has none;
/// the response may omit the key entirely when neither is set.
///
/// # Errors
///
/// 404 when the record is absent or the name is invalid.
pub async fn widget_config(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<WidgetConfigResponse>> {
    let name = AgentName::parse(&name).map_err(|_| AppError::NotFound("Agent".to_owned()))?;

    let agent = AgentRepository::new(state.store())
        .get(&name)
        .await?
        .ok_or_else(|| AppError::NotFound("Agent".to_owned()))?;

    let public_key = agent
        .public_key
        .map(voicedesk_core::PublicKey::into_inner)
        .or_else(|| state.config().default_public_key.clone());

    Ok(Json(WidgetConfigResponse {
        assistant_id: agent.assistant_id,
        public_key,
    }))
}
