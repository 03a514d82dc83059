//! Intake conversation domain.
//!
//! Pure types for the fixed HVAC intake flow:
//!
//! ```text
//! Welcome → Service Selection → Property Type → Collect Name → Save Information
//!              service-context    property-context  name-context    IntakeRecord
//! ```
//!
//! No I/O happens here; the application layer runs the steps and talks to
//! the store.

mod context;
mod errors;
mod intent;
mod record;
mod reference_id;
mod reply;
pub mod script;
mod turn;

pub use context::{
    ActiveContexts, ContextParameters, ContextUpdate, NameContext, PropertyContext,
    ServiceContext, TypedContext, CONTEXT_LIFESPAN,
};
pub use errors::IntakeError;
pub use intent::Intent;
pub use record::IntakeRecord;
pub use reference_id::ReferenceId;
pub use reply::{QuickReplies, Reply};
pub use turn::IntakeTurn;
