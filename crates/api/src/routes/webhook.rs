//! Webhook intake endpoint handler.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{debug, warn};

use domain::models::InboundEvent;

use crate::app::AppState;

/// Acknowledgement returned to the event dispatcher.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub received: bool,
}

/// Receive a chat event.
///
/// POST /hooks/message
///
/// Acknowledges immediately and screens the event on a detached task so
/// the dispatcher never waits on downstream services. Any parseable JSON
/// body is acked; envelopes that do not decode into an event are warned
/// about and dropped, since the dispatcher would otherwise retry them
/// forever. Screening outcomes never affect the response.
pub async fn receive_event(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Json<AckResponse> {
    match serde_json::from_value::<InboundEvent>(body) {
        Ok(event) => {
            debug!(event = %event.event, "Webhook event received");
            let pipeline = state.pipeline.clone();
            tokio::spawn(async move {
                pipeline.process(event).await;
            });
        }
        Err(e) => warn!(error = %e, "Discarding undecodable webhook envelope"),
    }

    Json(AckResponse { received: true })
}
