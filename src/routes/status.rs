//! Handler for the rendered status page.
//!
//! Shows the pod identity, uptime, memory footprint, and the stored messages.
//! The page self-refreshes so a browser left open tracks messages arriving
//! from sibling pods.

use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::config::PAGE_REFRESH_SECS;
use crate::error::AppError;
use crate::state::AppState;

/// Status page handler.
#[instrument(name = "status::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let messages = state.store.list().await;
    let last_received = state.store.last_received().await;
    let last_broadcast = state.store.last_broadcast().await;

    let mut context = tera::Context::new();
    context.insert("pod", &state.config.pod);
    context.insert("port", &state.config.http.port);
    context.insert("uptime_secs", &state.uptime_secs());
    context.insert("memory_mb", &resident_memory_mb());
    context.insert("messaging_enabled", &state.config.enable_messaging);
    context.insert("messages", &messages);
    context.insert("last_received", &last_received);
    context.insert("last_broadcast", &last_broadcast);
    context.insert("refresh_secs", &PAGE_REFRESH_SECS);
    context.insert("version", env!("CARGO_PKG_VERSION"));

    let html = state.tera.render("status.html", &context)?;
    Ok(Html(html))
}

/// Resident set size of this process in whole megabytes, if the platform
/// exposes it. Display-only; the page renders a dash when unavailable.
fn resident_memory_mb() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        let status = std::fs::read_to_string("/proc/self/status").ok()?;
        parse_vm_rss_kb(&status).map(|kb| kb / 1024)
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_vm_rss_kb(status: &str) -> Option<u64> {
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()
}
