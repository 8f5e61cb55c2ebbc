//! HTTP route handlers for the pod service.
//!
//! Routes are organized by concern: the rendered status page, the JSON health
//! probe, and the message intake endpoint. The intake route is only mounted
//! when messaging is enabled, so a receive-only deployment answers 404 there.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod message;
pub mod status;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_STATUS;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Status page - never cached, it renders live state on every hit
    let page_routes = Router::new()
        .route("/", get(status::index))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATUS),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    let mut router = Router::new().merge(page_routes).merge(health_routes);

    if state.config.enable_messaging {
        let message_routes = Router::new().route("/message", post(message::receive));
        router = router.merge(message_routes);
    }

    router
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
