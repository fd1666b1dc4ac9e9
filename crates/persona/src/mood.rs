//! Mood generator
//!
//! Draws a category by catalog weight and an intensity from the fixed
//! distribution, then picks an emotion and a persona uniformly. Generation is
//! serialized by a writer lock; readers take a cloned `Arc` snapshot of the
//! active mood.

use std::collections::VecDeque;
use std::sync::Arc;

use moodcast_config::EngineCatalog;
use moodcast_core::{Error, Intensity, MoodState, Result, StateStore};
use parking_lot::{Mutex, RwLock};

use crate::distribution::{choose, intensity_table, SharedRng, WeightedTable};

/// Store key holding a copy of the active mood
pub const ACTIVE_MOOD_KEY: &str = "mood:active";

pub struct MoodGenerator {
    catalog: Arc<EngineCatalog>,
    categories: WeightedTable<String>,
    intensities: WeightedTable<Intensity>,
    rng: SharedRng,
    store: Arc<dyn StateStore<MoodState>>,
    /// Serializes draw + supersession
    writer: Mutex<()>,
    active: RwLock<Option<Arc<MoodState>>>,
    /// Newest first
    history: Mutex<VecDeque<MoodState>>,
    history_size: usize,
}

impl MoodGenerator {
    pub fn new(
        catalog: Arc<EngineCatalog>,
        rng: SharedRng,
        store: Arc<dyn StateStore<MoodState>>,
        history_size: usize,
    ) -> Result<Self> {
        let categories = WeightedTable::new(
            catalog
                .moods
                .iter()
                .map(|m| (m.category.clone(), m.weight)),
        )?;

        Ok(Self {
            catalog,
            categories,
            intensities: intensity_table()?,
            rng,
            store,
            writer: Mutex::new(()),
            active: RwLock::new(None),
            history: Mutex::new(VecDeque::with_capacity(history_size)),
            history_size: history_size.max(1),
        })
    }

    /// Reload the active mood from the store, if one was persisted.
    pub fn restore(&self) -> Result<Option<MoodState>> {
        let restored = self.store.get(ACTIVE_MOOD_KEY)?.filter(|m| m.active);
        if let Some(mood) = &restored {
            tracing::info!(
                mood_id = %mood.id,
                category = %mood.category,
                backend = self.store.backend(),
                "Restored active mood"
            );
            *self.active.write() = Some(Arc::new(mood.clone()));
            self.history.lock().push_front(mood.clone());
        }
        Ok(restored)
    }

    /// Draw a new mood and make it the only active one.
    ///
    /// A forced category or intensity must exist in the catalog.
    pub fn generate(
        &self,
        forced_category: Option<&str>,
        forced_intensity: Option<Intensity>,
        trigger: Option<&str>,
    ) -> Result<MoodState> {
        let _writer = self.writer.lock();

        let mood = {
            let mut rng = self.rng.lock();

            let category = match forced_category {
                Some(name) => name.to_string(),
                None => self.categories.sample(&mut *rng).clone(),
            };
            let entry = self.catalog.mood(&category).ok_or_else(|| {
                Error::Configuration(format!("unknown mood category '{}'", category))
            })?;

            let intensity = match forced_intensity {
                Some(intensity) => intensity,
                None => *self.intensities.sample(&mut *rng),
            };

            let emotion = choose(entry.emotions_for(intensity), &mut *rng).ok_or_else(|| {
                Error::Configuration(format!(
                    "no emotions listed for {}/{}",
                    category, intensity
                ))
            })?;

            let persona_id = match choose(
                self.catalog.personas_for(&category, intensity),
                &mut *rng,
            ) {
                Some(id) => id.clone(),
                None => {
                    tracing::debug!(
                        category = %category,
                        intensity = %intensity,
                        "No persona mapped, using default"
                    );
                    self.catalog.default_persona.clone()
                }
            };

            let mut mood = MoodState::new(category, emotion.clone(), intensity, persona_id);
            if let Some(trigger) = trigger {
                mood = mood.with_trigger(trigger);
            }
            mood
        };

        self.supersede(&mood)?;

        tracing::info!(
            mood_id = %mood.id,
            category = %mood.category,
            emotion = %mood.emotion,
            intensity = %mood.intensity,
            persona = %mood.persona_id,
            trigger = mood.trigger.as_deref().unwrap_or(""),
            "Generated mood"
        );

        Ok(mood)
    }

    /// Generate a mood for a named event.
    ///
    /// Unknown events fall back to an unconstrained draw; the event name is
    /// still recorded as the trigger.
    pub fn trigger_change(&self, event: &str) -> Result<MoodState> {
        match self.catalog.trigger(event) {
            Some(t) => self.generate(Some(t.category.as_str()), Some(t.intensity), Some(event)),
            None => {
                tracing::warn!(event = %event, "Unknown trigger event, drawing freely");
                self.generate(None, None, Some(event))
            }
        }
    }

    /// Snapshot of the active mood
    pub fn current(&self) -> Option<MoodState> {
        self.active.read().as_deref().cloned()
    }

    /// Recent moods, newest first
    pub fn history(&self, limit: usize) -> Vec<MoodState> {
        self.history.lock().iter().take(limit).cloned().collect()
    }

    /// Deactivate the previous mood and publish the new one.
    ///
    /// Caller holds the writer lock.
    fn supersede(&self, mood: &MoodState) -> Result<()> {
        let previous = self.active.read().clone();
        if let Some(previous) = previous {
            let mut retired = (*previous).clone();
            retired.deactivate();
            self.store.put(&retired.store_key(), retired)?;
            tracing::debug!(mood_id = %previous.id, "Deactivated previous mood");
        }

        self.store.put(&mood.store_key(), mood.clone())?;
        self.store.put(ACTIVE_MOOD_KEY, mood.clone())?;

        *self.active.write() = Some(Arc::new(mood.clone()));

        let mut history = self.history.lock();
        if let Some(front) = history.front_mut() {
            front.deactivate();
        }
        history.push_front(mood.clone());
        history.truncate(self.history_size);

        Ok(())
    }
}
