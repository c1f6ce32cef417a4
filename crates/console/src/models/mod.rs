//! Domain models for the console.

pub mod agent;
pub mod session;

pub use agent::Agent;
pub use session::SessionPayload;
