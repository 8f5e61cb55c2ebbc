//! Bounded in-memory store for messages received from sibling pods.
//!
//! Holds the most recent messages newest-first, plus the "last received"
//! and "last successful broadcast" timestamps shown on the status page.
//! The store is the only shared mutable state in the process; request
//! handlers and the broadcast task each hold a cloned handle.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::MESSAGE_STORE_CAPACITY;

/// A message received from another pod, stamped at receipt.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub from: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Wire form of a message, shared by the inbound `/message` body and the
/// outbound greeting. Missing fields deserialize to empty strings; bodies
/// are never rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub text: String,
}

struct StoreInner {
    /// Newest first; never longer than `MESSAGE_STORE_CAPACITY`.
    messages: VecDeque<Message>,
    last_received: Option<DateTime<Utc>>,
    last_broadcast: Option<DateTime<Utc>>,
}

/// Shared handle to the message buffer, cloneable across tasks.
#[derive(Clone)]
pub struct MessageStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                messages: VecDeque::with_capacity(MESSAGE_STORE_CAPACITY + 1),
                last_received: None,
                last_broadcast: None,
            })),
        }
    }

    /// Record a received message. Prepends it and silently drops the oldest
    /// entries beyond capacity. Always succeeds.
    pub async fn record(&self, message: Message) {
        let mut inner = self.inner.write().await;
        inner.last_received = Some(message.timestamp);
        inner.messages.push_front(message);
        if inner.messages.len() > MESSAGE_STORE_CAPACITY {
            inner.messages.truncate(MESSAGE_STORE_CAPACITY);
        }
    }

    /// Snapshot of the current messages, newest first.
    pub async fn list(&self) -> Vec<Message> {
        self.inner.read().await.messages.iter().cloned().collect()
    }

    /// When the most recent message was received, if any.
    pub async fn last_received(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.last_received
    }

    /// Record a successful broadcast for display.
    pub async fn mark_broadcast(&self, at: DateTime<Utc>) {
        self.inner.write().await.last_broadcast = Some(at);
    }

    /// When the last broadcast succeeded, if ever.
    pub async fn last_broadcast(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.last_broadcast
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}
