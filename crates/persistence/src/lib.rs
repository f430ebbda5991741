//! Persistence layer for the Convo Guard backend.
//!
//! Tenant settings are flat JSON documents, one file per tenant, under a
//! configurable data directory.

pub mod store;

pub use store::{StoreError, TenantConfigStore};
