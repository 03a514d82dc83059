//! Intake store port for the spreadsheet-backed persistence endpoint.
//!
//! Two kinds of writes go to the store:
//!
//! - **Interaction events** (`log_interaction`) are best-effort analytics rows.
//!   Callers detach them and only observe failures.
//! - **Intake records** (`save_intake`) are the completed form. Callers wait
//!   for the result and change their reply when it fails.
//!
//! Implementations should not retry; the caller decides what a failure means.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::intake::IntakeRecord;

/// Port for the external store that keeps intake rows.
#[async_trait]
pub trait IntakeStore: Send + Sync {
    /// Append an interaction event row.
    async fn log_interaction(&self, event: &InteractionEvent) -> Result<(), StoreError>;

    /// Append a completed intake row.
    async fn save_intake(&self, record: &IntakeRecord) -> Result<(), StoreError>;
}

/// Analytics row describing one conversational touchpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionEvent {
    /// Kind of touchpoint, e.g. "New Interaction".
    pub customer_type: String,
    /// What the caller said, or a label for the touchpoint.
    pub query: String,
}

impl InteractionEvent {
    pub fn new(customer_type: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            customer_type: customer_type.into(),
            query: query.into(),
        }
    }

    /// Logged when a conversation opens.
    pub fn new_interaction() -> Self {
        Self::new("New Interaction", "Welcome Intent")
    }

    /// Logged when the caller picks a service.
    pub fn service_selection(query: impl Into<String>) -> Self {
        Self::new("Service Selection", query)
    }
}

/// Failures talking to the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Connection, DNS or transport failure.
    #[error("Store unreachable: {0}")]
    Network(String),

    /// No answer within the allowed time.
    #[error("Store did not answer within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The store answered with a non-success status.
    #[error("Store rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl StoreError {
    pub fn network(message: impl Into<String>) -> Self {
        StoreError::Network(message.into())
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        StoreError::Timeout { timeout_secs }
    }

    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        StoreError::Rejected {
            status,
            body: body.into(),
        }
    }
}
