//! Voicedesk Core - Shared types library.
//!
//! This crate provides common types used across all Voicedesk components:
//! - `console` - Admin console and JSON API for agent records
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no store access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Validated newtypes for agent names, assistant ids, and
//!   public keys, plus the three-way [`types::Patch`] used for partial
//!   updates.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
