//! Validated newtypes for Voicedesk domain values.

mod assistant;
mod name;
mod patch;
mod public_key;

pub use assistant::{AssistantId, AssistantIdError};
pub use name::{AgentName, AgentNameError, RESERVED_AGENT_NAMES};
pub use patch::Patch;
pub use public_key::{PublicKey, PublicKeyError};
