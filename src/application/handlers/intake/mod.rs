//! Intake handlers.
//!
//! One command handler runs every turn of the intake conversation. Store
//! calls go through the policies in [`call_policy`]: interaction logging is
//! best-effort, the final save is required and bounded.

pub mod call_policy;
mod handle_turn;

pub use call_policy::{BestEffort, Required};
pub use handle_turn::{HandleTurnCommand, HandleTurnHandler, TurnOutcome, TurnStatus};
