//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `intake` - Intake conversation: intents, typed contexts, turns, script and records

pub mod intake;
