//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of an alert tag after trimming.
const MAX_ALERT_TAG_LENGTH: usize = 64;

/// Sentiment thresholds live on the negative half of the comparative scale.
const MIN_NEGATIVE_THRESHOLD: f64 = -5.0;
const MAX_NEGATIVE_THRESHOLD: f64 = 0.0;

lazy_static::lazy_static! {
    /// Tenant identifiers are opaque upstream strings, but they are used as
    /// storage file names, so the accepted alphabet is restricted.
    static ref TENANT_ID_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,63}$").unwrap();
}

/// Returns true if the tenant identifier is safe to use as a storage key.
pub fn is_valid_tenant_id(tenant_id: &str) -> bool {
    TENANT_ID_REGEX.is_match(tenant_id)
}

/// Validates an alert tag: non-empty after trimming, bounded length.
pub fn validate_alert_tag(tag: &str) -> Result<(), ValidationError> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("alert_tag_empty");
        err.message = Some("Alert tag must not be empty".into());
        return Err(err);
    }
    if trimmed.chars().count() > MAX_ALERT_TAG_LENGTH {
        let mut err = ValidationError::new("alert_tag_length");
        err.message = Some("Alert tag must be at most 64 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a sentiment threshold: finite and within [-5, 0].
pub fn validate_negative_threshold(threshold: f64) -> Result<(), ValidationError> {
    if !threshold.is_finite() {
        let mut err = ValidationError::new("threshold_not_finite");
        err.message = Some("Threshold must be a finite number".into());
        return Err(err);
    }
    if !(MIN_NEGATIVE_THRESHOLD..=MAX_NEGATIVE_THRESHOLD).contains(&threshold) {
        let mut err = ValidationError::new("threshold_range");
        err.message = Some("Threshold must be between -5 and 0".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a notification endpoint URL.
pub fn validate_notification_target(target: &str) -> Result<(), ValidationError> {
    if target.starts_with("http://") || target.starts_with("https://") {
        Ok(())
    } else {
        let mut err = ValidationError::new("notification_target_scheme");
        err.message = Some("Notification target must be an http(s) URL".into());
        Err(err)
    }
}
