//! Axum router configuration for the fulfillment webhook.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{handle_webhook, health, IntakeAppState};

/// Create the intake router.
///
/// # Routes
/// - `POST /webhook` - Fulfil a classified-intent event
/// - `GET /health` - Liveness probe
pub fn intake_routes() -> Router<IntakeAppState> {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/health", get(health))
}
