//! Alert content builder.
//!
//! Renders the plain-text internal note and the structured notification
//! payload for a fired alert. Rendering works on a copy of the message
//! text; the original is never mutated.

use chrono::{TimeZone, Utc};
use serde::Serialize;

use crate::models::{InboundMessage, ScreeningResult, TenantConfig};

/// Marker wrapped around matched terms in rendered text.
const EMPHASIS: &str = "*";

/// Rendered alert artifacts for one fired decision.
#[derive(Debug, Clone)]
pub struct AlertContent {
    /// Plain-text internal note posted back onto the conversation.
    pub note: String,
    /// Structured payload for the tenant's notification endpoint.
    pub payload: NotificationPayload,
}

/// Block-formatted notification payload.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub fields: Vec<NotificationField>,
    pub action: NotificationAction,
}

/// One contextual key/value block in the notification.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationField {
    pub label: String,
    pub value: String,
}

/// Action button linking back to the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationAction {
    pub label: String,
    pub url: String,
}

/// Deterministic deep link to the conversation in the platform inbox.
pub fn inbox_url(base_url: &str, tenant_id: &str, conversation_id: &str) -> String {
    format!(
        "{}/{}/inbox/{}/",
        base_url.trim_end_matches('/'),
        tenant_id,
        conversation_id
    )
}

/// Wraps each matched term in emphasis markers.
///
/// Whole-word, case-insensitive replacement. Terms are escaped so literal
/// pattern metacharacters (a "c++"-like term) never reach the regex engine
/// as syntax. Word boundaries are only asserted on sides of the term that
/// start or end with a word character; a term like "c++" still ends cleanly.
pub fn highlight_terms(text: &str, terms: &[String]) -> String {
    let mut rendered = text.to_string();
    for term in terms {
        if term.is_empty() {
            continue;
        }
        let escaped = regex::escape(term);
        let leading = if term.chars().next().is_some_and(is_word_char) {
            r"\b"
        } else {
            ""
        };
        let trailing = if term.chars().last().is_some_and(is_word_char) {
            r"\b"
        } else {
            ""
        };
        let pattern = format!("(?i){leading}{escaped}{trailing}");
        // The escaped pattern is always valid; skip the term if not.
        let Ok(re) = regex::Regex::new(&pattern) else {
            continue;
        };
        rendered = re
            .replace_all(&rendered, |caps: &regex::Captures<'_>| {
                format!("{EMPHASIS}{}{EMPHASIS}", &caps[0])
            })
            .into_owned();
    }
    rendered
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Builds the internal note and notification payload for a fired alert.
pub fn build_alert(
    message: &InboundMessage,
    result: &ScreeningResult,
    config: &TenantConfig,
    inbox_base_url: &str,
) -> AlertContent {
    let rendered_text = if config.highlight_matches {
        highlight_terms(&message.text, &result.matched_terms)
    } else {
        message.text.clone()
    };

    let terms = result.matched_terms.join(", ");
    let score_line = format!("{:.2} ({})", result.score, result.score_label);

    let mut note = format!(
        "Moderation alert: user message flagged.\n\"{}\"\nScore: {}",
        rendered_text, score_line
    );
    if !terms.is_empty() {
        note.push_str(&format!("\nMatched terms: {}", terms));
    }

    let mut fields = vec![NotificationField {
        label: "Score".to_string(),
        value: score_line,
    }];
    if !terms.is_empty() {
        fields.push(NotificationField {
            label: "Matched terms".to_string(),
            value: terms,
        });
    }
    if let Some(author) = &message.author_id {
        fields.push(NotificationField {
            label: "Author".to_string(),
            value: author.clone(),
        });
    }
    if let Some(millis) = message.occurred_at {
        if let Some(at) = Utc.timestamp_millis_opt(millis).single() {
            fields.push(NotificationField {
                label: "Sent at".to_string(),
                value: at.to_rfc3339(),
            });
        }
    }

    let payload = NotificationPayload {
        title: "Message flagged by moderation screen".to_string(),
        body: rendered_text,
        fields,
        action: NotificationAction {
            label: "Open conversation".to_string(),
            url: inbox_url(inbox_base_url, &message.tenant_id, &message.conversation_id),
        },
    };

    AlertContent { note, payload }
}
