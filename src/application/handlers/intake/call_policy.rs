//! Failure policies for store calls.
//!
//! - [`BestEffort`]: detached from the request; a failure is logged and
//!   never reaches the caller. No timeout.
//! - [`Required`]: awaited on the request path with a bounded wait; the
//!   result (including a timeout) is returned to the step.

use std::future::Future;
use std::time::Duration;

use crate::ports::StoreError;

/// Runs store calls whose outcome must not affect the reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestEffort;

impl BestEffort {
    /// Spawns `call` on the runtime and returns immediately.
    pub fn dispatch<F>(&self, operation: &'static str, call: F)
    where
        F: Future<Output = Result<(), StoreError>> + Send + 'static,
    {
        tokio::spawn(async move {
            match call.await {
                Ok(()) => tracing::debug!(operation, "Best-effort store call completed"),
                Err(e) => tracing::warn!(operation, error = %e, "Best-effort store call failed"),
            }
        });
    }
}

/// Runs store calls the reply depends on.
#[derive(Debug, Clone, Copy)]
pub struct Required {
    timeout: Duration,
}

impl Required {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Awaits `call`, failing with [`StoreError::Timeout`] once the bound
    /// elapses. The in-flight call is dropped on timeout.
    pub async fn call<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_secs = self.timeout.as_secs(),
                    "Required store call timed out"
                );
                Err(StoreError::timeout(self.timeout.as_secs()))
            }
        }
    }
}
