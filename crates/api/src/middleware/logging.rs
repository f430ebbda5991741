//! Tracing subscriber setup.
//!
//! The relay logs one structured event per pipeline step, so the default
//! output is flattened JSON for log shippers; `pretty` is meant for local
//! runs against a test tenant.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Filter used when RUST_LOG is absent. Outbound HTTP internals are capped
/// at warn so per-event screening logs stay readable at debug level.
fn default_directives(level: &str) -> String {
    format!("{level},hyper_util=warn,reqwest=warn")
}

/// Installs the global tracing subscriber.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "pretty" {
        registry
            .with(fmt::layer().pretty().with_target(true))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_target(true),
            )
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cap_http_client_noise() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("hyper_util=warn"));
        assert!(directives.contains("reqwest=warn"));
    }
}
