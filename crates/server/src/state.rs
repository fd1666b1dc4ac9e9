//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;

use moodcast_config::{EngineCatalog, Settings};
use moodcast_funnel::ConversationFunnel;
use moodcast_persona::PersonaEngine;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Settings>>,
    /// Mood generation and persona resolution
    pub engine: Arc<PersonaEngine>,
    /// Per-user conversation funnel
    pub funnel: Arc<ConversationFunnel>,
    /// Prometheus render handle, absent when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build the engine and funnel with in-memory stores
    pub fn new(config: Settings, catalog: EngineCatalog) -> moodcast_core::Result<Self> {
        let engine = PersonaEngine::new(Arc::new(catalog), &config.mood)?;
        let funnel = ConversationFunnel::new(config.funnel.clone());

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            engine: Arc::new(engine),
            funnel: Arc::new(funnel),
            metrics: None,
        })
    }

    /// Assemble from prebuilt components (e.g. with persistent stores)
    pub fn with_components(
        config: Settings,
        engine: Arc<PersonaEngine>,
        funnel: Arc<ConversationFunnel>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            engine,
            funnel,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a read guard to the current configuration
    pub fn get_config(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.config.read()
    }
}
