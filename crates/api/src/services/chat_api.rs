//! Upstream chat platform REST client.
//!
//! Covers the two conversation-level operations the relay needs: posting an
//! internal note and reading/writing the conversation's tag set. The
//! platform has shipped two incompatible tag representations historically
//! (bare strings and name objects), so tag writes declare which
//! representation to use and the dispatch layer retries once with the
//! alternate form on a rejection.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::ChatApiConfig;

/// Chat API request timeout in seconds.
const CHAT_API_TIMEOUT_SECS: u64 = 10;

/// Errors from the chat platform API.
#[derive(Debug, Error)]
pub enum ChatApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat API returned status {0}")]
    Status(u16),
}

impl ChatApiError {
    /// Whether a tag write rejected with this error should be retried with
    /// the alternate tag representation.
    pub fn is_representation_rejection(&self) -> bool {
        matches!(self, ChatApiError::Status(400) | ChatApiError::Status(422))
    }
}

/// Which wire shape a tag write uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRepresentation {
    /// `["tag-a", "tag-b"]`
    Plain,
    /// `[{"name": "tag-a"}, {"name": "tag-b"}]`
    Structured,
}

/// Conversation-level operations on the chat platform.
#[async_trait]
pub trait ConversationApi: Send + Sync {
    /// Posts an operator note onto the conversation.
    async fn post_note(
        &self,
        tenant_id: &str,
        conversation_id: &str,
        note: &str,
    ) -> Result<(), ChatApiError>;

    /// Reads the conversation's current tag set.
    async fn fetch_tags(
        &self,
        tenant_id: &str,
        conversation_id: &str,
    ) -> Result<Vec<String>, ChatApiError>;

    /// Writes the full tag set in the requested representation.
    async fn apply_tags(
        &self,
        tenant_id: &str,
        conversation_id: &str,
        tags: &[String],
        representation: TagRepresentation,
    ) -> Result<(), ChatApiError>;
}

/// Internal note message body.
#[derive(Debug, Serialize)]
struct NoteBody<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    from: &'static str,
    origin: &'static str,
    content: &'a str,
}

/// Conversation metadata subset read back on tag fetch. Tag entries arrive
/// in either historical representation.
#[derive(Debug, Deserialize)]
struct ConversationMeta {
    #[serde(default)]
    tags: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagEntry {
    Plain(String),
    Structured { name: String },
}

impl TagEntry {
    fn into_name(self) -> String {
        match self {
            TagEntry::Plain(name) => name,
            TagEntry::Structured { name } => name,
        }
    }
}

/// HTTP client for the chat platform REST API.
pub struct ChatPlatformClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl ChatPlatformClient {
    /// Creates a new client from configuration.
    pub fn new(config: &ChatApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(CHAT_API_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn conversation_url(&self, tenant_id: &str, conversation_id: &str, suffix: &str) -> String {
        format!(
            "{}/tenants/{}/conversations/{}/{}",
            self.base_url, tenant_id, conversation_id, suffix
        )
    }

    fn check_status(response: &reqwest::Response) -> Result<(), ChatApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ChatApiError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl ConversationApi for ChatPlatformClient {
    async fn post_note(
        &self,
        tenant_id: &str,
        conversation_id: &str,
        note: &str,
    ) -> Result<(), ChatApiError> {
        let body = NoteBody {
            kind: "note",
            from: "operator",
            origin: "chat",
            content: note,
        };
        let response = self
            .client
            .post(self.conversation_url(tenant_id, conversation_id, "messages"))
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;
        Self::check_status(&response)
    }

    async fn fetch_tags(
        &self,
        tenant_id: &str,
        conversation_id: &str,
    ) -> Result<Vec<String>, ChatApiError> {
        let response = self
            .client
            .get(self.conversation_url(tenant_id, conversation_id, "meta"))
            .bearer_auth(&self.api_token)
            .send()
            .await?;
        Self::check_status(&response)?;
        let meta: ConversationMeta = response.json().await?;
        Ok(meta.tags.into_iter().map(TagEntry::into_name).collect())
    }

    async fn apply_tags(
        &self,
        tenant_id: &str,
        conversation_id: &str,
        tags: &[String],
        representation: TagRepresentation,
    ) -> Result<(), ChatApiError> {
        let body = match representation {
            TagRepresentation::Plain => serde_json::json!({ "tags": tags }),
            TagRepresentation::Structured => serde_json::json!({
                "tags": tags
                    .iter()
                    .map(|name| serde_json::json!({ "name": name }))
                    .collect::<Vec<_>>()
            }),
        };
        let response = self
            .client
            .patch(self.conversation_url(tenant_id, conversation_id, "meta"))
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;
        Self::check_status(&response)
    }
}
