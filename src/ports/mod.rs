//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `IntakeStore` - Spreadsheet-backed store for interaction events and
//!   completed intakes

mod intake_store;

pub use intake_store::{InteractionEvent, IntakeStore, StoreError};
