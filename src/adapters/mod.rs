//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the intake flow to external systems:
//! - `http` - Fulfillment webhook endpoints (Axum)
//! - `sheets` - Spreadsheet store (Apps Script web app, in-memory)

pub mod http;
pub mod sheets;

pub use sheets::{AppsScriptStore, InMemoryIntakeStore};
