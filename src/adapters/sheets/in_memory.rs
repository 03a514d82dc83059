//! In-memory intake store.
//!
//! Keeps every row it receives so tests and local runs can inspect what would
//! have been sent to the spreadsheet. Failures can be injected per operation.
//!
//! ```ignore
//! let store = Arc::new(InMemoryIntakeStore::new().failing_saves());
//! // ... drive a conversation ...
//! assert!(store.records().is_empty());
//! ```

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::intake::IntakeRecord;
use crate::ports::{InteractionEvent, IntakeStore, StoreError};

/// Recording store with optional failure injection.
#[derive(Debug, Default)]
pub struct InMemoryIntakeStore {
    events: Mutex<Vec<InteractionEvent>>,
    records: Mutex<Vec<IntakeRecord>>,
    fail_logging: bool,
    fail_saves: bool,
}

impl InMemoryIntakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `log_interaction` call fails after being recorded.
    pub fn failing_logging(mut self) -> Self {
        self.fail_logging = true;
        self
    }

    /// Every `save_intake` call fails and nothing is kept.
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Interaction events received so far, including failed ones.
    pub fn events(&self) -> Vec<InteractionEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Intake records stored so far.
    pub fn records(&self) -> Vec<IntakeRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl IntakeStore for InMemoryIntakeStore {
    async fn log_interaction(&self, event: &InteractionEvent) -> Result<(), StoreError> {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
        if self.fail_logging {
            return Err(StoreError::network("in-memory store configured to fail logging"));
        }
        Ok(())
    }

    async fn save_intake(&self, record: &IntakeRecord) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::rejected(503, "in-memory store configured to fail saves"));
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
        Ok(())
    }
}
