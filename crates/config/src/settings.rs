//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub mood: MoodSettings,

    #[serde(default)]
    pub funnel: FunnelSettings,

    /// Optional YAML/JSON file replacing the built-in engine catalog
    #[serde(default)]
    pub catalog_path: Option<String>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Logging and metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines instead of plain text
    #[serde(default)]
    pub log_json: bool,

    /// Install the Prometheus recorder
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Mood generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSettings {
    /// Fixed RNG seed for reproducible draws (None = entropy)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of recent moods kept for history queries
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

fn default_history_size() -> usize {
    50
}

impl Default for MoodSettings {
    fn default() -> Self {
        Self {
            seed: None,
            history_size: default_history_size(),
        }
    }
}

/// Conversational funnel thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelSettings {
    /// Product name substituted into objection rebuttal scripts
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Message length (graphemes) above which engagement grows by 2
    #[serde(default = "default_long_message")]
    pub long_message_chars: usize,

    /// Message length (graphemes) above which engagement grows by 1
    #[serde(default = "default_medium_message")]
    pub medium_message_chars: usize,

    /// Offer readiness: minimum messages seen
    #[serde(default = "default_ready_messages")]
    pub ready_min_messages: u32,

    /// Offer readiness: minimum trust score
    #[serde(default = "default_ready_trust")]
    pub ready_min_trust: i32,

    /// Offer readiness: objection count must stay below this
    #[serde(default = "default_max_objections")]
    pub max_objections: u32,
}

fn default_product_name() -> String {
    "наш комплекс".to_string()
}
fn default_long_message() -> usize {
    100
}
fn default_medium_message() -> usize {
    50
}
fn default_ready_messages() -> u32 {
    3
}
fn default_ready_trust() -> i32 {
    2
}
fn default_max_objections() -> u32 {
    3
}

impl Default for FunnelSettings {
    fn default() -> Self {
        Self {
            product_name: default_product_name(),
            long_message_chars: default_long_message(),
            medium_message_chars: default_medium_message(),
            ready_min_messages: default_ready_messages(),
            ready_min_trust: default_ready_trust(),
            max_objections: default_max_objections(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_funnel()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.environment.is_production()
            && self.server.cors_enabled
            && self.server.cors_origins.is_empty()
        {
            tracing::warn!(
                "CORS is enabled in production but no origins are configured. \
                 This may block legitimate requests."
            );
        }

        Ok(())
    }

    fn validate_funnel(&self) -> Result<(), ConfigError> {
        let funnel = &self.funnel;

        if funnel.medium_message_chars >= funnel.long_message_chars {
            return Err(ConfigError::InvalidValue {
                field: "funnel.medium_message_chars".to_string(),
                message: format!(
                    "Must be below long_message_chars ({}), got {}",
                    funnel.long_message_chars, funnel.medium_message_chars
                ),
            });
        }

        if funnel.ready_min_messages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "funnel.ready_min_messages".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if funnel.max_objections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "funnel.max_objections".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if funnel.product_name.trim().is_empty() {
            return Err(ConfigError::MissingField("funnel.product_name".to_string()));
        }

        Ok(())
    }
}

/// Load settings from files and environment.
///
/// Priority: env vars > config/{env} > config/default > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("MOODCAST")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.funnel.ready_min_messages, 3);
        assert_eq!(settings.funnel.ready_min_trust, 2);
        assert_eq!(settings.funnel.max_objections, 3);
        assert!(settings.mood.seed.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_funnel_threshold_validation() {
        let mut settings = Settings::default();
        settings.funnel.medium_message_chars = 120;
        assert!(settings.validate().is_err());

        settings.funnel.medium_message_chars = 50;
        settings.funnel.max_objections = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_port_validation() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "funnel:\n  product_name: Collagen Pro\nmood:\n  seed: 7\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.funnel.product_name, "Collagen Pro");
        assert_eq!(settings.funnel.long_message_chars, 100);
        assert_eq!(settings.mood.seed, Some(7));
        assert_eq!(settings.mood.history_size, 50);
    }
}
