//! Shared application state handed to every request handler.

use std::sync::Arc;
use std::time::Instant;

use tera::Tera;

use crate::config::AppConfig;
use crate::store::MessageStore;

/// Cloneable application state: configuration and templates behind Arcs,
/// the message store (internally shared), and the instant the process
/// started serving, which anchors all uptime reporting.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub store: MessageStore,
    started_at: Instant,
}

impl AppState {
    /// Bundle configuration, templates, and the store. Uptime counts from
    /// this call.
    pub fn new(config: AppConfig, tera: Tera, store: MessageStore) -> Self {
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            store,
            started_at: Instant::now(),
        }
    }

    /// Whole seconds since the state was created.
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
