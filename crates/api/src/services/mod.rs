//! External service integrations and the screening pipeline.

pub mod chat_api;
pub mod dispatch;
pub mod notify;
pub mod pipeline;
pub mod remote_scorer;

pub use chat_api::{ChatApiError, ChatPlatformClient, ConversationApi, TagRepresentation};
pub use dispatch::DispatchCoordinator;
pub use notify::{Notifier, NotifyError, WebhookNotifier};
pub use pipeline::ScreeningPipeline;
pub use remote_scorer::RemoteScorer;
