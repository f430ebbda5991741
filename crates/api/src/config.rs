use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub chat_api: ChatApiConfig,
    pub screening: ScreeningConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the per-tenant settings files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Upstream chat platform REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatApiConfig {
    /// REST base URL, e.g. https://api.chat.example/v1
    pub base_url: String,

    /// Bearer credential supplied by the host platform.
    #[serde(default)]
    pub api_token: String,

    /// Base URL for inbox deep links in alert content.
    pub inbox_base_url: String,
}

/// Message screening configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningConfig {
    /// Scoring backend: "lexicon" or "remote".
    #[serde(default = "default_scorer")]
    pub scorer: String,

    /// Scoring endpoint URL; required when scorer = "remote".
    #[serde(default)]
    pub scorer_url: String,

    /// Confidence cutoff for the remote toxicity classifier.
    #[serde(default = "default_toxicity_threshold")]
    pub toxicity_threshold: f64,

    /// Optional path to a JSON array replacing the built-in word list.
    #[serde(default)]
    pub word_list_path: Option<String>,

    /// Optional path to a JSON word-to-valence map replacing the built-in
    /// sentiment lexicon.
    #[serde(default)]
    pub lexicon_path: Option<String>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_data_dir() -> String {
    "data/tenants".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_scorer() -> String {
    "lexicon".to_string()
}
fn default_toxicity_threshold() -> f64 {
    0.9
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with CG__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CG").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds the config entirely from embedded defaults and overrides,
    /// without touching config files.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30

            [storage]
            data_dir = "data/tenants"

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []

            [chat_api]
            base_url = "https://api.chat.example/v1"
            api_token = "test-token"
            inbox_base_url = "https://app.chat.example"

            [screening]
            scorer = "lexicon"
            scorer_url = ""
            toxicity_threshold = 0.9
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.chat_api.base_url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "CG__CHAT_API__BASE_URL must be set".to_string(),
            ));
        }

        if self.chat_api.inbox_base_url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "CG__CHAT_API__INBOX_BASE_URL must be set".to_string(),
            ));
        }

        match self.screening.scorer.as_str() {
            "lexicon" => {}
            "remote" => {
                if self.screening.scorer_url.is_empty() {
                    return Err(ConfigValidationError::MissingRequired(
                        "CG__SCREENING__SCORER_URL must be set when scorer = \"remote\""
                            .to_string(),
                    ));
                }
            }
            other => {
                return Err(ConfigValidationError::InvalidValue(format!(
                    "Unknown scorer backend: {other} (expected \"lexicon\" or \"remote\")"
                )));
            }
        }

        if !self.screening.toxicity_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.screening.toxicity_threshold)
        {
            return Err(ConfigValidationError::InvalidValue(
                "toxicity_threshold must be within [0, 1]".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .expect("Invalid socket address")
    }
}

impl ScreeningConfig {
    /// Loads the moderation word list: the configured JSON array file, or
    /// the built-in default list.
    pub fn load_word_list(&self) -> anyhow::Result<Vec<String>> {
        match &self.word_list_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let words: Vec<String> = serde_json::from_str(&raw)?;
                Ok(words)
            }
            None => Ok(domain::services::lexicon::default_word_list()),
        }
    }

    /// Loads the sentiment valence table: the configured JSON map file, or
    /// the built-in default table.
    pub fn load_valences(&self) -> anyhow::Result<std::collections::HashMap<String, f64>> {
        match &self.lexicon_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let valences: std::collections::HashMap<String, f64> =
                    serde_json::from_str(&raw)?;
                Ok(valences)
            }
            None => Ok(domain::services::lexicon::default_valences()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load_with_defaults() {
        let config = Config::load_for_test(&[]).expect("Failed to load config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.data_dir, "data/tenants");
        assert_eq!(config.screening.scorer, "lexicon");
        assert_eq!(config.screening.toxicity_threshold, 0.9);
    }

    #[test]
    fn test_config_override() {
        let config = Config::load_for_test(&[
            ("server.port", "9000"),
            ("logging.level", "debug"),
            ("screening.toxicity_threshold", "0.8"),
        ])
        .expect("Failed to load config");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.screening.toxicity_threshold, 0.8);
    }

    #[test]
    fn test_validation_rejects_unknown_scorer() {
        let config =
            Config::load_for_test(&[("screening.scorer", "oracle")]).expect("load failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_requires_url_for_remote_scorer() {
        let config =
            Config::load_for_test(&[("screening.scorer", "remote")]).expect("load failed");
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("SCORER_URL"));
    }

    #[test]
    fn test_validation_accepts_remote_scorer_with_url() {
        let config = Config::load_for_test(&[
            ("screening.scorer", "remote"),
            ("screening.scorer_url", "http://scorer:9000/score"),
        ])
        .expect("load failed");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_out_of_range_toxicity_threshold() {
        let config = Config::load_for_test(&[("screening.toxicity_threshold", "1.5")])
            .expect("load failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_missing_base_url() {
        let config = Config::load_for_test(&[("chat_api.base_url", "")]).expect("load failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = Config::load_for_test(&[("server.host", "127.0.0.1"), ("server.port", "3000")])
            .expect("load failed");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_load_word_list_default() {
        let config = Config::load_for_test(&[]).expect("load failed");
        let words = config.screening.load_word_list().unwrap();
        assert!(words.iter().any(|w| w == "idiot"));
    }

    #[test]
    fn test_load_word_list_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, r#"["meanie", "rascal"]"#).unwrap();

        let mut config = Config::load_for_test(&[]).expect("load failed");
        config.screening.word_list_path = Some(path.to_string_lossy().into_owned());

        let words = config.screening.load_word_list().unwrap();
        assert_eq!(words, vec!["meanie", "rascal"]);
    }

    #[test]
    fn test_load_valences_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{"meh": -1.0, "yay": 2.0}"#).unwrap();

        let mut config = Config::load_for_test(&[]).expect("load failed");
        config.screening.lexicon_path = Some(path.to_string_lossy().into_owned());

        let valences = config.screening.load_valences().unwrap();
        assert_eq!(valences.get("meh"), Some(&-1.0));
        assert_eq!(valences.get("yay"), Some(&2.0));
    }
}
