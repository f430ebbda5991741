//! Domain models.

pub mod message;
pub mod screening;
pub mod tenant_config;

pub use message::{InboundEvent, InboundMessage};
pub use screening::{AlertDecision, ScreeningResult};
pub use tenant_config::{TenantConfig, TenantSettingsResponse, UpdateTenantSettingsRequest};
