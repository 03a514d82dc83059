//! HTTP handlers for the fulfillment webhook.
//!
//! These handlers connect Axum routes to the intake turn handler.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::intake::{HandleTurnCommand, HandleTurnHandler};
use crate::domain::intake::{IntakeError, Intent};
use crate::ports::IntakeStore;

use super::dto::{ErrorResponse, WebhookRequest, WebhookResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct IntakeAppState {
    pub store: Arc<dyn IntakeStore>,
    /// Bound on the final save call.
    pub save_timeout: Duration,
}

impl IntakeAppState {
    pub fn new(store: Arc<dyn IntakeStore>, save_timeout: Duration) -> Self {
        Self {
            store,
            save_timeout,
        }
    }

    pub fn handle_turn_handler(&self) -> HandleTurnHandler {
        HandleTurnHandler::new(self.store.clone(), self.save_timeout)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /webhook - Fulfil one classified-intent event
pub async fn handle_webhook(
    State(state): State<IntakeAppState>,
    Json(request): Json<WebhookRequest>,
) -> Result<Json<WebhookResponse>, IntakeApiError> {
    let intent = Intent::from_display_name(&request.query_result.intent.display_name)?;
    tracing::info!(
        intent = %intent,
        intent_resource = request.query_result.intent.name.as_deref().unwrap_or_default(),
        session = %request.session,
        response_id = request.response_id.as_deref().unwrap_or_default(),
        language = request.query_result.language_code.as_deref().unwrap_or_default(),
        "Webhook turn received"
    );

    let cmd = HandleTurnCommand {
        intent,
        utterance: request.query_result.query_text.clone(),
        contexts: request.query_result.active_contexts(),
    };
    let outcome = state.handle_turn_handler().handle(cmd).await?;
    tracing::debug!(intent = %intent, status = ?outcome.status, "Turn handled");

    Ok(Json(WebhookResponse::render(
        &request.session,
        &outcome.reply,
        &outcome.context_updates,
    )))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts intake errors to HTTP responses.
#[derive(Debug)]
pub struct IntakeApiError(IntakeError);

impl From<IntakeError> for IntakeApiError {
    fn from(err: IntakeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for IntakeApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            IntakeError::UnknownIntent(_) => StatusCode::BAD_REQUEST,
            // Recovered inside the handler; reaching here means a bad request.
            IntakeError::ContextExpired { .. } | IntakeError::EmptyAnswer { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };
        tracing::warn!(error = %self.0, status = status.as_u16(), "Rejected webhook request");

        let body = ErrorResponse::new(self.0.code(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}
