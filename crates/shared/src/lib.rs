//! Shared utilities and common types for the Convo Guard backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Tenant identifier format checks
//! - Settings field validators shared between the API and the store

pub mod validation;
