//! Inbound webhook event envelope and the screened message extracted from it.

use serde::Deserialize;

/// Event name for user chat messages; everything else is ignored.
pub const MESSAGE_SEND_EVENT: &str = "message:send";

/// Raw webhook envelope from the chat platform's event dispatcher.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEvent {
    /// Missing event names deserialize to an empty string so the envelope
    /// still parses and gets discarded by the filter instead of erroring.
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub data: EventData,
}

/// Payload of a webhook event. All fields optional at the wire level;
/// the screening filter decides what is usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    pub tenant_id: Option<String>,
    pub conversation_id: Option<String>,
    pub author_id: Option<String>,
    /// Epoch milliseconds.
    pub occurred_at: Option<i64>,
    pub from: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub text: Option<String>,
}

/// A message accepted for screening. Ephemeral; never stored.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub tenant_id: String,
    pub conversation_id: String,
    pub text: String,
    pub author_id: Option<String>,
    pub occurred_at: Option<i64>,
}

impl InboundEvent {
    /// Extracts a screenable message from the envelope.
    ///
    /// Only `message:send` events with `from == "user"`, `type == "text"`,
    /// both identifiers present, and non-empty text qualify. Everything
    /// else returns None; a non-qualifying event is a discard, not an error.
    pub fn into_message(self) -> Option<InboundMessage> {
        if self.event != MESSAGE_SEND_EVENT {
            return None;
        }
        let data = self.data;
        if data.from.as_deref() != Some("user") || data.kind.as_deref() != Some("text") {
            return None;
        }
        let tenant_id = data.tenant_id.filter(|id| !id.is_empty())?;
        let conversation_id = data.conversation_id.filter(|id| !id.is_empty())?;
        let text = data.text?;
        if text.trim().is_empty() {
            return None;
        }
        Some(InboundMessage {
            tenant_id,
            conversation_id,
            text,
            author_id: data.author_id,
            occurred_at: data.occurred_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(json: &str) -> InboundEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_user_text_message_is_accepted() {
        let message = event(
            r#"{
                "event": "message:send",
                "data": {
                    "tenantId": "acme",
                    "conversationId": "conv-1",
                    "authorId": "visitor-9",
                    "occurredAt": 1718000000000,
                    "from": "user",
                    "type": "text",
                    "text": "hello there"
                }
            }"#,
        )
        .into_message()
        .expect("should be accepted");

        assert_eq!(message.tenant_id, "acme");
        assert_eq!(message.conversation_id, "conv-1");
        assert_eq!(message.text, "hello there");
        assert_eq!(message.author_id.as_deref(), Some("visitor-9"));
        assert_eq!(message.occurred_at, Some(1718000000000));
    }

    #[test]
    fn test_operator_message_is_ignored() {
        let accepted = event(
            r#"{"event": "message:send", "data": {"tenantId": "a", "conversationId": "c",
                "from": "operator", "type": "text", "text": "hi"}}"#,
        )
        .into_message();
        assert!(accepted.is_none());
    }

    #[test]
    fn test_non_text_message_is_ignored() {
        let accepted = event(
            r#"{"event": "message:send", "data": {"tenantId": "a", "conversationId": "c",
                "from": "user", "type": "file", "text": "cat.png"}}"#,
        )
        .into_message();
        assert!(accepted.is_none());
    }

    #[test]
    fn test_other_event_names_are_ignored() {
        let accepted = event(
            r#"{"event": "session:created", "data": {"tenantId": "a", "conversationId": "c",
                "from": "user", "type": "text", "text": "hi"}}"#,
        )
        .into_message();
        assert!(accepted.is_none());
    }

    #[test]
    fn test_missing_identifiers_discard() {
        let accepted = event(
            r#"{"event": "message:send", "data": {"conversationId": "c",
                "from": "user", "type": "text", "text": "hi"}}"#,
        )
        .into_message();
        assert!(accepted.is_none());

        let accepted = event(
            r#"{"event": "message:send", "data": {"tenantId": "a",
                "from": "user", "type": "text", "text": "hi"}}"#,
        )
        .into_message();
        assert!(accepted.is_none());
    }

    #[test]
    fn test_blank_text_discard() {
        let accepted = event(
            r#"{"event": "message:send", "data": {"tenantId": "a", "conversationId": "c",
                "from": "user", "type": "text", "text": "   "}}"#,
        )
        .into_message();
        assert!(accepted.is_none());
    }

    #[test]
    fn test_missing_data_block_discard() {
        let accepted = event(r#"{"event": "message:send"}"#).into_message();
        assert!(accepted.is_none());
    }

    #[test]
    fn test_missing_event_name_parses_and_discards() {
        let envelope = event(r#"{"data": {"tenantId": "a", "conversationId": "c"}}"#);
        assert_eq!(envelope.event, "");
        assert!(envelope.into_message().is_none());
    }

    #[test]
    fn test_empty_object_parses_and_discards() {
        assert!(event("{}").into_message().is_none());
    }
}
