//! Application layer - turn handling and call policies.
//!
//! This layer orchestrates the intake domain and coordinates calls to the store port.

pub mod handlers;

pub use handlers::intake::{HandleTurnCommand, HandleTurnHandler, TurnOutcome, TurnStatus};
