//! Configuration management for the mood/persona engine
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, `config/{env}.yaml`)
//! - Environment variables (MOODCAST_ prefix)
//!
//! # Engine Catalog
//!
//! The static registries the engine reads are grouped in `EngineCatalog`:
//! - Mood catalog (categories, per-intensity emotions, weights, affinities)
//! - Persona registry and the (category, intensity) persona table
//! - Content-type persona preferences
//! - Hook template bank
//! - Named trigger events
//!
//! Built-in defaults are always available; a YAML/JSON file can replace them.

pub mod catalog;
pub mod settings;

pub use catalog::{
    ContentPreference, EngineCatalog, MoodCatalogEntry, PersonaMapping, TriggerEvent,
};
pub use settings::{
    load_settings, FunnelSettings, MoodSettings, ObservabilityConfig, RuntimeEnvironment,
    ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
