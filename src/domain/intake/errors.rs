//! Intake conversation errors.
//!
//! | Error | Handling |
//! |-------|----------|
//! | UnknownIntent | rejected at the HTTP boundary (400) |
//! | ContextExpired | "conversation timed out" reply, flow restarts |
//! | EmptyAnswer | reprompt, contexts left untouched |

use thiserror::Error;

use super::intent::Intent;

/// Errors raised while resolving a conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// The platform routed an intent this webhook does not fulfil.
    #[error("Unknown intent: '{0}'")]
    UnknownIntent(String),

    /// A prior-turn context was not echoed back, or lacks a required field.
    #[error("Context '{context}' is missing or has no '{field}' parameter")]
    ContextExpired {
        context: &'static str,
        field: &'static str,
    },

    /// The caller's utterance was blank for a step that records it.
    #[error("Empty answer for {intent}")]
    EmptyAnswer { intent: Intent },
}

impl IntakeError {
    pub fn unknown_intent(name: impl Into<String>) -> Self {
        IntakeError::UnknownIntent(name.into())
    }

    pub fn context_expired(context: &'static str, field: &'static str) -> Self {
        IntakeError::ContextExpired { context, field }
    }

    pub fn empty_answer(intent: Intent) -> Self {
        IntakeError::EmptyAnswer { intent }
    }

    /// Stable code for logs and API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            IntakeError::UnknownIntent(_) => "UNKNOWN_INTENT",
            IntakeError::ContextExpired { .. } => "CONTEXT_EXPIRED",
            IntakeError::EmptyAnswer { .. } => "EMPTY_ANSWER",
        }
    }
}
