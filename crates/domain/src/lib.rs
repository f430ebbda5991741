//! Domain layer for the Convo Guard backend.
//!
//! This crate contains:
//! - Domain models (TenantConfig, InboundMessage, ScreeningResult)
//! - The message-screening logic: lexical scanner, scorer abstraction,
//!   alert decision engine, and alert content builder

pub mod models;
pub mod services;
