//! HTTP adapters - the webhook surface.
//!
//! `api_router` assembles the intake routes with the shared middleware stack
//! (request tracing, CORS, request timeout).

pub mod intake;

use ::http::HeaderValue;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use intake::{intake_routes, IntakeAppState};

/// Build the complete application router.
pub fn api_router(state: IntakeAppState, server: &ServerConfig) -> Router {
    intake_routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&server.cors_origins_list()))
            .layer(TimeoutLayer::new(server.request_timeout())),
    )
}

/// CORS policy: any origin when none are configured, else the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(allowed))
}
