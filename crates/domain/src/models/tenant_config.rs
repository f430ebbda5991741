//! Per-tenant screening configuration.
//!
//! One record per tenant, persisted as a flat JSON file keyed by tenant
//! identifier. Every field always has a defined value: defaults are
//! substituted at load time so the decision engine never branches on
//! missing configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Per-tenant screening settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TenantConfig {
    /// Label applied to a flagged conversation. Stored trimmed and lowercased.
    #[serde(default = "default_alert_tag")]
    pub alert_tag: String,
    /// Sentiment cutoff below which a message is negative enough to alert.
    #[serde(default = "default_negative_threshold")]
    pub negative_threshold: f64,
    /// Whether to post the alert to the tenant's notification endpoint.
    #[serde(default)]
    pub notification_enabled: bool,
    /// Delivery endpoint URL. Required (non-empty) iff notifications are on,
    /// enforced at write time.
    #[serde(default)]
    pub notification_target: String,
    /// Whether matched terms are marked up in rendered alert text.
    #[serde(default = "default_highlight_matches")]
    pub highlight_matches: bool,
}

fn default_alert_tag() -> String {
    "moderation".to_string()
}

fn default_negative_threshold() -> f64 {
    -0.75
}

fn default_highlight_matches() -> bool {
    true
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            alert_tag: default_alert_tag(),
            negative_threshold: default_negative_threshold(),
            notification_enabled: false,
            notification_target: String::new(),
            highlight_matches: default_highlight_matches(),
        }
    }
}

impl TenantConfig {
    /// Merges a validated partial update onto this record.
    ///
    /// Fields omitted from the update retain their prior value. The alert
    /// tag is normalized (trimmed, lowercased) on the way in.
    pub fn merged(&self, update: &UpdateTenantSettingsRequest) -> TenantConfig {
        TenantConfig {
            alert_tag: update
                .alert_tag
                .as_ref()
                .map(|t| t.trim().to_lowercase())
                .unwrap_or_else(|| self.alert_tag.clone()),
            negative_threshold: update.negative_threshold.unwrap_or(self.negative_threshold),
            notification_enabled: update
                .notification_enabled
                .unwrap_or(self.notification_enabled),
            notification_target: update
                .notification_target
                .as_ref()
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| self.notification_target.clone()),
            highlight_matches: update.highlight_matches.unwrap_or(self.highlight_matches),
        }
    }

    /// Cross-field check applied after merging, before the write.
    ///
    /// A tenant that enables notifications must have a usable target URL.
    pub fn check_notification_target(&self) -> Result<(), validator::ValidationError> {
        if self.notification_enabled {
            if self.notification_target.is_empty() {
                let mut err = validator::ValidationError::new("notification_target_required");
                err.message =
                    Some("Notification target is required when notifications are enabled".into());
                return Err(err);
            }
            shared::validation::validate_notification_target(&self.notification_target)?;
        }
        Ok(())
    }
}

/// GET/PUT response for tenant settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TenantSettingsResponse {
    pub alert_tag: String,
    pub negative_threshold: f64,
    pub notification_enabled: bool,
    pub notification_target: String,
    pub highlight_matches: bool,
}

impl From<TenantConfig> for TenantSettingsResponse {
    fn from(config: TenantConfig) -> Self {
        Self {
            alert_tag: config.alert_tag,
            negative_threshold: config.negative_threshold,
            notification_enabled: config.notification_enabled,
            notification_target: config.notification_target,
            highlight_matches: config.highlight_matches,
        }
    }
}

/// PUT request to update tenant settings.
///
/// Every field is optional; supplied fields are individually validated and
/// the whole update is rejected if any of them fails.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateTenantSettingsRequest {
    #[validate(custom(function = "shared::validation::validate_alert_tag"))]
    pub alert_tag: Option<String>,
    #[validate(custom(function = "shared::validation::validate_negative_threshold"))]
    pub negative_threshold: Option<f64>,
    pub notification_enabled: Option<bool>,
    #[validate(custom(function = "validate_optional_target"))]
    pub notification_target: Option<String>,
    pub highlight_matches: Option<bool>,
}

/// Validates a supplied notification target.
///
/// An empty string is allowed here so a tenant can clear the target while
/// notifications are disabled; the merged record's cross-field check still
/// rejects enabled-with-empty-target.
pub fn validate_optional_target(target: &str) -> Result<(), validator::ValidationError> {
    if target.trim().is_empty() {
        return Ok(());
    }
    shared::validation::validate_notification_target(target.trim())
}
