//! Dispatch coordinator: fans a fired alert out to its side effects.
//!
//! Three independent downstream operations: post the internal note, apply
//! the alert tag, send the external notification. They run concurrently
//! and each one absorbs and logs its own failure; the coordinator never
//! raises upward, so a downstream outage on one arm can never prevent the
//! other arms from being attempted.

use std::sync::Arc;

use tracing::{debug, error, info};

use domain::models::{InboundMessage, TenantConfig};
use domain::services::content::AlertContent;

use crate::services::chat_api::{ConversationApi, TagRepresentation};
use crate::services::notify::Notifier;

/// Coordinates alert side effects against the outbound services.
#[derive(Clone)]
pub struct DispatchCoordinator {
    api: Arc<dyn ConversationApi>,
    notifier: Arc<dyn Notifier>,
}

impl DispatchCoordinator {
    pub fn new(api: Arc<dyn ConversationApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Issues the alert's side effects and waits for all of them to settle.
    pub async fn dispatch(
        &self,
        message: &InboundMessage,
        config: &TenantConfig,
        content: &AlertContent,
    ) {
        tokio::join!(
            self.post_note_arm(message, content),
            self.apply_tag_arm(message, config),
            self.notify_arm(message, config, content),
        );
    }

    async fn post_note_arm(&self, message: &InboundMessage, content: &AlertContent) {
        match self
            .api
            .post_note(&message.tenant_id, &message.conversation_id, &content.note)
            .await
        {
            Ok(()) => info!(
                tenant_id = %message.tenant_id,
                conversation_id = %message.conversation_id,
                "Posted moderation note"
            ),
            Err(e) => error!(
                tenant_id = %message.tenant_id,
                conversation_id = %message.conversation_id,
                error = %e,
                "Failed to post moderation note"
            ),
        }
    }

    /// Reads current tags, skips the write when the alert tag is already
    /// present after normalization, otherwise writes the merged set. A
    /// representation rejection on the plain form triggers exactly one
    /// retry with the structured form.
    async fn apply_tag_arm(&self, message: &InboundMessage, config: &TenantConfig) {
        let tenant_id = &message.tenant_id;
        let conversation_id = &message.conversation_id;
        let new_tag = normalize_tag(&config.alert_tag);

        let existing = match self.api.fetch_tags(tenant_id, conversation_id).await {
            Ok(tags) => tags,
            Err(e) => {
                error!(
                    tenant_id = %tenant_id,
                    conversation_id = %conversation_id,
                    error = %e,
                    "Failed to read conversation tags"
                );
                return;
            }
        };

        let mut merged: Vec<String> = Vec::new();
        for tag in &existing {
            let normalized = normalize_tag(tag);
            if !normalized.is_empty() && !merged.contains(&normalized) {
                merged.push(normalized);
            }
        }
        if merged.contains(&new_tag) {
            debug!(
                tenant_id = %tenant_id,
                conversation_id = %conversation_id,
                tag = %new_tag,
                "Conversation already tagged, skipping write"
            );
            return;
        }
        merged.push(new_tag.clone());

        let first_attempt = self
            .api
            .apply_tags(tenant_id, conversation_id, &merged, TagRepresentation::Plain)
            .await;

        let outcome = match first_attempt {
            Err(e) if e.is_representation_rejection() => {
                debug!(
                    tenant_id = %tenant_id,
                    conversation_id = %conversation_id,
                    error = %e,
                    "Plain tag representation rejected, retrying with structured form"
                );
                self.api
                    .apply_tags(
                        tenant_id,
                        conversation_id,
                        &merged,
                        TagRepresentation::Structured,
                    )
                    .await
            }
            other => other,
        };

        match outcome {
            Ok(()) => info!(
                tenant_id = %tenant_id,
                conversation_id = %conversation_id,
                tag = %new_tag,
                "Applied alert tag"
            ),
            Err(e) => error!(
                tenant_id = %tenant_id,
                conversation_id = %conversation_id,
                tag = %new_tag,
                error = %e,
                "Failed to apply alert tag"
            ),
        }
    }

    async fn notify_arm(
        &self,
        message: &InboundMessage,
        config: &TenantConfig,
        content: &AlertContent,
    ) {
        if !config.notification_enabled {
            debug!(tenant_id = %message.tenant_id, "Notifications disabled for tenant");
            return;
        }
        match self
            .notifier
            .send(&config.notification_target, &content.payload)
            .await
        {
            Ok(()) => info!(
                tenant_id = %message.tenant_id,
                conversation_id = %message.conversation_id,
                "Sent alert notification"
            ),
            Err(e) => error!(
                tenant_id = %message.tenant_id,
                target = %config.notification_target,
                error = %e,
                "Failed to send alert notification"
            ),
        }
    }
}

/// Tag normalization used on both sides of the dedupe comparison.
fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}
