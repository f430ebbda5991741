//! Flat-file tenant configuration store.
//!
//! One JSON document per tenant at `{data_dir}/{tenant_id}.json`. Reads for
//! tenants with no stored record materialize defaults without persisting
//! them; writes replace the file atomically (temp sibling + rename).
//! Concurrent writers to the same tenant are last-write-wins by design:
//! settings changes are rare, human-driven events, not hot-path traffic.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use domain::models::TenantConfig;

/// Errors from the tenant config store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The identifier failed the storage-key format check. No default is
    /// materialized for such identifiers.
    #[error("invalid tenant identifier: {0}")]
    InvalidTenantId(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored record is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// File-backed per-tenant settings store.
#[derive(Debug, Clone)]
pub struct TenantConfigStore {
    data_dir: PathBuf,
}

impl TenantConfigStore {
    /// Creates a store rooted at the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Creates the data directory if it does not exist yet.
    pub async fn ensure_data_dir(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        Ok(())
    }

    /// Reads a tenant's settings, materializing defaults when no record
    /// exists. Defaults are not persisted until the first write.
    pub async fn get(&self, tenant_id: &str) -> Result<TenantConfig, StoreError> {
        let path = self.record_path(tenant_id)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(tenant_id, "No stored settings, using defaults");
                Ok(TenantConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces a tenant's settings record atomically.
    pub async fn put(&self, tenant_id: &str, config: &TenantConfig) -> Result<(), StoreError> {
        let path = self.record_path(tenant_id)?;
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(config)?;
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(tenant_id, path = %path.display(), "Persisted tenant settings");
        Ok(())
    }

    fn record_path(&self, tenant_id: &str) -> Result<PathBuf, StoreError> {
        if !shared::validation::is_valid_tenant_id(tenant_id) {
            return Err(StoreError::InvalidTenantId(tenant_id.to_string()));
        }
        Ok(self.data_dir.join(format!("{tenant_id}.json")))
    }

    /// The directory this store writes into.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, TenantConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TenantConfigStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_get_missing_record_returns_defaults_without_persisting() {
        let (dir, store) = store();
        let config = store.get("acme").await.unwrap();
        assert_eq!(config, TenantConfig::default());
        assert!(!dir.path().join("acme.json").exists());
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let (_dir, store) = store();
        let config = TenantConfig {
            alert_tag: "abuse".to_string(),
            negative_threshold: -1.5,
            ..Default::default()
        };
        store.put("acme", &config).await.unwrap();
        assert_eq!(store.get("acme").await.unwrap(), config);
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_record() {
        let (_dir, store) = store();
        let initial = TenantConfig {
            alert_tag: "abuse".to_string(),
            negative_threshold: -1.5,
            ..Default::default()
        };
        store.put("acme", &initial).await.unwrap();

        let replaced = TenantConfig {
            alert_tag: "flagged".to_string(),
            ..initial.clone()
        };
        store.put("acme", &replaced).await.unwrap();

        let read_back = store.get("acme").await.unwrap();
        assert_eq!(read_back.alert_tag, "flagged");
        assert_eq!(read_back.negative_threshold, -1.5);
    }

    #[tokio::test]
    async fn test_invalid_tenant_id_is_rejected_on_read_and_write() {
        let (_dir, store) = store();
        assert!(matches!(
            store.get("../escape").await,
            Err(StoreError::InvalidTenantId(_))
        ));
        assert!(matches!(
            store.put("bad id", &TenantConfig::default()).await,
            Err(StoreError::InvalidTenantId(_))
        ));
    }

    #[tokio::test]
    async fn test_stored_record_with_missing_fields_gets_defaults() {
        let (dir, store) = store();
        tokio::fs::write(dir.path().join("acme.json"), br#"{"alert_tag": "abuse"}"#)
            .await
            .unwrap();
        let config = store.get("acme").await.unwrap();
        assert_eq!(config.alert_tag, "abuse");
        assert_eq!(
            config.negative_threshold,
            TenantConfig::default().negative_threshold
        );
    }

    #[tokio::test]
    async fn test_corrupt_record_is_an_error() {
        let (dir, store) = store();
        tokio::fs::write(dir.path().join("acme.json"), b"not json")
            .await
            .unwrap();
        assert!(matches!(
            store.get("acme").await,
            Err(StoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_put_leaves_no_temp_file_behind() {
        let (dir, store) = store();
        store.put("acme", &TenantConfig::default()).await.unwrap();
        assert!(dir.path().join("acme.json").exists());
        assert!(!dir.path().join("acme.json.tmp").exists());
    }
}
