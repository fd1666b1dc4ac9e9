//! Mood and persona engine
//!
//! Produces the emotional register and voice for generated text:
//! - Mood generation (weighted category draw, fixed intensity distribution)
//! - Persona context resolution against a content type
//! - Hook (opening line) selection with placeholder substitution
//! - Prompt enhancement rendering
//!
//! # Example
//!
//! ```ignore
//! use moodcast_persona::{ContextRequest, PersonaEngine};
//!
//! let engine = PersonaEngine::new(catalog, &settings.mood)?;
//! let mood = engine.generate_mood(Some("small_win"))?;
//! let context = engine.get_persona_context(&ContextRequest::new().with_content_type("post"))?;
//! let instructions = engine.prompt_enhancement(&context);
//! ```

pub mod context;
pub mod distribution;
pub mod hooks;
pub mod mood;

pub use context::{prompt_enhancement, ContextBuilder, ContextRequest};
pub use distribution::{shared_rng, SharedRng, WeightedTable};
pub use hooks::{fill_placeholders, has_unresolved, placeholders, HookSelector};
pub use mood::{MoodGenerator, ACTIVE_MOOD_KEY};

use std::sync::Arc;

use moodcast_config::{EngineCatalog, MoodSettings};
use moodcast_core::{InMemoryStore, Intensity, MoodState, PersonaContext, Result, StateStore};

/// Facade over the mood generator and the persona context builder
pub struct PersonaEngine {
    catalog: Arc<EngineCatalog>,
    moods: MoodGenerator,
    contexts: ContextBuilder,
}

impl PersonaEngine {
    /// Engine with an in-memory mood store
    pub fn new(catalog: Arc<EngineCatalog>, settings: &MoodSettings) -> Result<Self> {
        Self::with_store(catalog, settings, Arc::new(InMemoryStore::<MoodState>::new()))
    }

    /// Engine with an injected mood store; a persisted active mood is restored.
    pub fn with_store(
        catalog: Arc<EngineCatalog>,
        settings: &MoodSettings,
        store: Arc<dyn StateStore<MoodState>>,
    ) -> Result<Self> {
        let engine = Self::with_rng(
            catalog,
            shared_rng(settings.seed),
            store,
            settings.history_size,
        )?;
        engine.moods.restore()?;
        Ok(engine)
    }

    /// Engine over an explicit random source
    pub fn with_rng(
        catalog: Arc<EngineCatalog>,
        rng: SharedRng,
        store: Arc<dyn StateStore<MoodState>>,
        history_size: usize,
    ) -> Result<Self> {
        let moods = MoodGenerator::new(catalog.clone(), rng.clone(), store, history_size)?;
        let contexts = ContextBuilder::new(catalog.clone(), rng);

        tracing::debug!(
            moods = catalog.moods.len(),
            personas = catalog.personas.len(),
            hooks = catalog.hooks.len(),
            "Persona engine ready"
        );

        Ok(Self {
            catalog,
            moods,
            contexts,
        })
    }

    pub fn catalog(&self) -> &EngineCatalog {
        &self.catalog
    }

    /// Generate a mood, for a named event when given
    pub fn generate_mood(&self, trigger: Option<&str>) -> Result<MoodState> {
        match trigger {
            Some(event) => self.moods.trigger_change(event),
            None => self.moods.generate(None, None, None),
        }
    }

    /// Generate with a forced category and/or intensity
    pub fn generate_mood_with(
        &self,
        category: Option<&str>,
        intensity: Option<Intensity>,
        trigger: Option<&str>,
    ) -> Result<MoodState> {
        self.moods.generate(category, intensity, trigger)
    }

    pub fn trigger_change(&self, event: &str) -> Result<MoodState> {
        self.moods.trigger_change(event)
    }

    /// Active mood snapshot
    pub fn current_mood(&self) -> Option<MoodState> {
        self.moods.current()
    }

    /// Recent moods, newest first
    pub fn mood_history(&self, limit: usize) -> Vec<MoodState> {
        self.moods.history(limit)
    }

    /// Resolve the persona context.
    ///
    /// Without a mood in the request, the active mood is used, or a new one
    /// is generated when none is active.
    pub fn get_persona_context(&self, request: &ContextRequest) -> Result<PersonaContext> {
        let mood = match &request.mood {
            Some(mood) => mood.clone(),
            None => match self.moods.current() {
                Some(mood) => mood,
                None => self.moods.generate(None, None, None)?,
            },
        };
        self.contexts.build(mood, request)
    }

    pub fn prompt_enhancement(&self, context: &PersonaContext) -> String {
        prompt_enhancement(context)
    }

    pub fn hooks(&self) -> &HookSelector {
        self.contexts.hooks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PersonaEngine {
        let settings = MoodSettings {
            seed: Some(21),
            ..MoodSettings::default()
        };
        PersonaEngine::new(Arc::new(EngineCatalog::default()), &settings).unwrap()
    }

    #[test]
    fn test_context_generates_mood_when_none_active() {
        let engine = engine();
        assert!(engine.current_mood().is_none());

        let ctx = engine.get_persona_context(&ContextRequest::new()).unwrap();
        let current = engine.current_mood().unwrap();
        assert_eq!(ctx.mood.id, current.id);
    }

    #[test]
    fn test_context_reuses_active_mood() {
        let engine = engine();
        let mood = engine.generate_mood(Some("new_idea")).unwrap();
        let ctx = engine
            .get_persona_context(&ContextRequest::new().with_content_type("post"))
            .unwrap();
        assert_eq!(ctx.mood.id, mood.id);
        assert_eq!(engine.mood_history(10).len(), 1);
    }

    #[test]
    fn test_forced_generation() {
        let engine = engine();
        let mood = engine
            .generate_mood_with(Some("irony"), Some(Intensity::Light), None)
            .unwrap();
        assert_eq!(mood.category, "irony");
        assert!(engine
            .generate_mood_with(Some("nostalgia"), None, None)
            .unwrap_err()
            .is_configuration());
    }
}
