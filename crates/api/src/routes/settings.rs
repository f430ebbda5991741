//! Tenant settings endpoint handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{TenantSettingsResponse, UpdateTenantSettingsRequest};
use shared::validation::is_valid_tenant_id;

use crate::app::AppState;
use crate::error::ApiError;

/// Read a tenant's screening settings.
///
/// GET /api/v1/tenants/:tenant_id/settings
///
/// Tenants without a stored record get the defaults; reading never
/// creates a record.
pub async fn get_settings(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> Result<Json<TenantSettingsResponse>, ApiError> {
    check_tenant_id(&tenant_id)?;
    let config = state.store.get(&tenant_id).await?;
    Ok(Json(config.into()))
}

/// Update a tenant's screening settings.
///
/// PUT /api/v1/tenants/:tenant_id/settings
///
/// Partial update: omitted fields keep their stored value. The request is
/// field-validated, merged onto the current record, cross-checked, and
/// only then persisted. A rejected update leaves the stored record intact.
pub async fn update_settings(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Json(request): Json<UpdateTenantSettingsRequest>,
) -> Result<Json<TenantSettingsResponse>, ApiError> {
    check_tenant_id(&tenant_id)?;
    request.validate()?;

    let current = state.store.get(&tenant_id).await?;
    let merged = current.merged(&request);
    merged.check_notification_target()?;
    state.store.put(&tenant_id, &merged).await?;

    info!(
        tenant_id = %tenant_id,
        alert_tag = %merged.alert_tag,
        notification_enabled = merged.notification_enabled,
        "Tenant settings updated"
    );

    Ok(Json(merged.into()))
}

fn check_tenant_id(tenant_id: &str) -> Result<(), ApiError> {
    if is_valid_tenant_id(tenant_id) {
        Ok(())
    } else {
        Err(ApiError::invalid_field(
            "tenant_id",
            &format!("Invalid tenant identifier: {tenant_id}"),
        ))
    }
}
