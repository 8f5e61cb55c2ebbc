//! Request tracing middleware.
//!
//! Wraps every request in a tracing span carrying a generated UUID so all
//! logs emitted while handling it can be correlated. Completion logs for
//! probe paths are demoted to debug; the platform hits those every few
//! seconds and would bury everything else.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{Instrument, Span};
use uuid::Uuid;

/// Paths requested by the platform rather than by people.
const QUIET_PATHS: &[&str] = &["/health"];

/// Outermost middleware layer: opens the request span, runs the rest of the
/// stack inside it, and emits the completion log.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let quiet = QUIET_PATHS.contains(&path.as_str());

    let span = tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    let started = Instant::now();
    async move {
        let response = next.run(request).await;
        let duration_ms = started.elapsed().as_millis() as u64;
        Span::current().record("duration_ms", duration_ms);

        let status = response.status().as_u16();
        if quiet {
            tracing::debug!(status, duration_ms, "Request completed");
        } else {
            tracing::info!(status, duration_ms, "Request completed");
        }

        response
    }
    .instrument(span)
    .await
}
