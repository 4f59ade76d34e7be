use super::types::HealthResponse;
use crate::{line::WebhookPayload, relay::Relay};
use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
    pub service_name: Arc<str>,
}

/// Acknowledges immediately; the delivery is processed on a detached task so
/// LINE's acknowledgement deadline never depends on the classifier.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> StatusCode {
    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Ignoring unparsable webhook body: {}", e);
            return StatusCode::OK;
        }
    };

    let delivery_id = Uuid::new_v4();
    let span = info_span!("delivery", %delivery_id);
    tokio::spawn(
        async move {
            let outcome = state.relay.handle(&payload).await;
            debug!("Delivery finished: {:?}", outcome);
        }
        .instrument(span),
    );

    StatusCode::OK
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.service_name.to_string(),
    })
}
