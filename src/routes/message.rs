//! Message intake endpoint for pod-to-pod greetings.
//!
//! Intake is deliberately lenient: the body is parsed as JSON on a best-effort
//! basis and anything unparseable is stored with empty fields. Senders always
//! get 200 back, so a misbehaving peer can never wedge the demo.

use axum::{body::Bytes, extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;
use crate::store::{Message, MessagePayload};

/// Acknowledgement body returned to the sender.
#[derive(Debug, Serialize)]
pub struct ReceiveResponse {
    pub status: &'static str,
    pub pod: String,
}

/// Message intake handler.
#[instrument(name = "message::receive", skip(state, body))]
pub async fn receive(State(state): State<AppState>, body: Bytes) -> Json<ReceiveResponse> {
    let payload: MessagePayload = serde_json::from_slice(&body).unwrap_or_default();

    tracing::info!(from = %payload.from, bytes = body.len(), "Message received");

    state
        .store
        .record(Message {
            from: payload.from,
            text: payload.text,
            timestamp: Utc::now(),
        })
        .await;

    Json(ReceiveResponse {
        status: "received",
        pod: state.config.pod.name.clone(),
    })
}
