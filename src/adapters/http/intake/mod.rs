//! HTTP adapter for the intake conversation.
//!
//! - `POST /webhook` - Dialogflow fulfillment webhook
//! - `GET /health` - Liveness probe

pub mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, WebhookRequest, WebhookResponse};
pub use handlers::{IntakeApiError, IntakeAppState};
pub use routes::intake_routes;
