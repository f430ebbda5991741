//! HTTP route handlers.

pub mod health;
pub mod settings;
pub mod webhook;
