//! Per-event screening pipeline.
//!
//! Runs detached from the webhook request: load the tenant's settings,
//! scan and score the message text, decide, and when the decision fires,
//! hand the built alert to the dispatch coordinator. Every failure is
//! terminal for the event and logged; nothing reaches the webhook caller.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use domain::models::message::MESSAGE_SEND_EVENT;
use domain::models::InboundEvent;
use domain::services::content::build_alert;
use domain::services::{decide, scanner, Scorer};
use persistence::TenantConfigStore;

use crate::services::DispatchCoordinator;

/// Orchestrates screening for a single inbound event.
pub struct ScreeningPipeline {
    store: TenantConfigStore,
    scorer: Arc<dyn Scorer>,
    dispatcher: DispatchCoordinator,
    word_list: Vec<String>,
    toxicity_threshold: f64,
    inbox_base_url: String,
}

impl ScreeningPipeline {
    pub fn new(
        store: TenantConfigStore,
        scorer: Arc<dyn Scorer>,
        dispatcher: DispatchCoordinator,
        word_list: Vec<String>,
        toxicity_threshold: f64,
        inbox_base_url: String,
    ) -> Self {
        Self {
            store,
            scorer,
            dispatcher,
            word_list,
            toxicity_threshold,
            inbox_base_url,
        }
    }

    /// Screens one webhook event end to end.
    pub async fn process(&self, event: InboundEvent) {
        let event_name = event.event.clone();
        let message = match event.into_message() {
            Some(message) => message,
            None => {
                if event_name == MESSAGE_SEND_EVENT {
                    warn!(event = %event_name, "Discarding malformed message event");
                } else {
                    debug!(event = %event_name, "Ignoring non-message event");
                }
                return;
            }
        };

        let config = match self.store.get(&message.tenant_id).await {
            Ok(config) => config,
            Err(e) => {
                error!(
                    tenant_id = %message.tenant_id,
                    error = %e,
                    "Failed to load tenant settings, dropping event"
                );
                return;
            }
        };

        let matched_terms = scanner::scan(&message.text, &self.word_list);
        let score = match self.scorer.score(&message.text).await {
            Ok(score) => score,
            Err(e) => {
                error!(
                    tenant_id = %message.tenant_id,
                    conversation_id = %message.conversation_id,
                    error = %e,
                    "Scoring failed, dropping event"
                );
                return;
            }
        };

        let semantics = self.scorer.semantics();
        let result = domain::models::ScreeningResult {
            matched_terms,
            score,
            score_label: domain::services::label_for(semantics, score),
        };
        let decision = decide(&config, result, semantics, self.toxicity_threshold);

        if !decision.fire {
            debug!(
                tenant_id = %message.tenant_id,
                conversation_id = %message.conversation_id,
                score = decision.result.score,
                "Message passed screening"
            );
            return;
        }

        info!(
            tenant_id = %message.tenant_id,
            conversation_id = %message.conversation_id,
            score = decision.result.score,
            matched = decision.result.matched_terms.len(),
            "Message flagged, dispatching alert"
        );
        let content = build_alert(&message, &decision.result, &config, &self.inbox_base_url);
        self.dispatcher.dispatch(&message, &config, &content).await;
    }
}
