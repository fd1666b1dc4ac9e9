//! Integration tests for mood generation and persona resolution
//!
//! Randomness is seeded so the frequency checks are repeatable.

use std::collections::HashMap;
use std::sync::Arc;

use moodcast_config::EngineCatalog;
use moodcast_core::{InMemoryStore, Intensity, MoodState, StateStore};
use moodcast_persona::{has_unresolved, placeholders, shared_rng, ContextRequest, PersonaEngine};

const DRAWS: usize = 20_000;
const TOLERANCE: f64 = 0.02;

fn seeded_engine(seed: u64) -> (PersonaEngine, Arc<InMemoryStore<MoodState>>) {
    let store = Arc::new(InMemoryStore::new());
    let engine = PersonaEngine::with_rng(
        Arc::new(EngineCatalog::default()),
        shared_rng(Some(seed)),
        store.clone(),
        5,
    )
    .unwrap();
    (engine, store)
}

/// Category frequencies follow weight / total weight
#[test]
fn test_category_frequencies_follow_weights() {
    let (engine, _) = seeded_engine(1234);
    let catalog = EngineCatalog::default();
    let total = catalog.total_weight();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..DRAWS {
        let mood = engine.generate_mood(None).unwrap();
        *counts.entry(mood.category).or_default() += 1;
    }

    for entry in &catalog.moods {
        let expected = entry.weight / total;
        let observed = *counts.get(&entry.category).unwrap_or(&0) as f64 / DRAWS as f64;
        assert!(
            (observed - expected).abs() < TOLERANCE,
            "{}: expected {:.3}, observed {:.3}",
            entry.category,
            expected,
            observed
        );
    }
}

/// Intensity frequencies follow 0.35 / 0.40 / 0.20 / 0.05
#[test]
fn test_intensity_frequencies() {
    let (engine, _) = seeded_engine(99);

    let mut counts: HashMap<Intensity, usize> = HashMap::new();
    for _ in 0..DRAWS {
        let mood = engine.generate_mood(None).unwrap();
        *counts.entry(mood.intensity).or_default() += 1;
    }

    for intensity in Intensity::all() {
        let observed = *counts.get(intensity).unwrap_or(&0) as f64 / DRAWS as f64;
        assert!(
            (observed - intensity.draw_probability()).abs() < TOLERANCE,
            "{}: observed {:.3}",
            intensity,
            observed
        );
    }
}

/// Every generation leaves exactly one active mood, in memory and in the store
#[test]
fn test_exactly_one_active_mood() {
    let (engine, store) = seeded_engine(7);

    for i in 0..25 {
        let mood = if i % 3 == 0 {
            engine.generate_mood(Some("failure")).unwrap()
        } else {
            engine.generate_mood(None).unwrap()
        };

        let stored_active = store
            .keys()
            .into_iter()
            .filter(|k| k != moodcast_persona::ACTIVE_MOOD_KEY)
            .filter_map(|k| store.get(&k).unwrap())
            .filter(|m| m.active)
            .collect::<Vec<_>>();

        assert_eq!(stored_active.len(), 1);
        assert_eq!(stored_active[0].id, mood.id);
        assert_eq!(engine.current_mood().unwrap().id, mood.id);
        assert_eq!(
            engine.mood_history(100).iter().filter(|m| m.active).count(),
            1
        );
    }
}

/// Known trigger events force their (category, intensity) pair
#[test]
fn test_big_achievement_is_extreme_joy() {
    let (engine, _) = seeded_engine(3);
    for _ in 0..50 {
        let mood = engine.trigger_change("big_achievement").unwrap();
        assert_eq!(mood.category, "joy");
        assert_eq!(mood.intensity, Intensity::Extreme);
        assert_eq!(mood.trigger.as_deref(), Some("big_achievement"));
    }
}

/// Unknown trigger events draw freely but still record the event
#[test]
fn test_unknown_event_falls_back() {
    let (engine, _) = seeded_engine(4);
    let catalog = EngineCatalog::default();

    let mood = engine.trigger_change("nonexistent_event").unwrap();
    assert!(catalog.mood(&mood.category).is_some());
    assert_eq!(mood.trigger.as_deref(), Some("nonexistent_event"));
}

/// Supplying every placeholder leaves no unresolved markers in any hook
#[test]
fn test_hooks_fully_resolved_with_all_variables() {
    let (engine, _) = seeded_engine(5);
    let catalog = EngineCatalog::default();

    let mut variables = HashMap::new();
    for hook in &catalog.hooks {
        for name in placeholders(&hook.template) {
            variables.insert(name, "значение".to_string());
        }
    }

    for persona in &catalog.personas {
        for mood in &catalog.moods {
            for content in ["post", "reels", "sales", "podcast"] {
                if let Some(text) = engine.hooks().select_hook_with_variables(
                    &persona.id,
                    &mood.category,
                    Some(content),
                    &variables,
                ) {
                    assert!(!has_unresolved(&text), "unresolved: {}", text);
                }
            }
        }
    }
}

/// Every persona in the default catalog owns at least one hook
#[test]
fn test_every_persona_has_a_hook() {
    let (engine, _) = seeded_engine(6);
    let catalog = EngineCatalog::default();

    for persona in &catalog.personas {
        assert!(
            engine.hooks().select_hook(&persona.id, "calm", None).is_some(),
            "{} has no hooks",
            persona.id
        );
    }
}

/// A persisted active mood survives an engine restart
#[test]
fn test_active_mood_restored_from_injected_store() {
    let store: Arc<InMemoryStore<MoodState>> = Arc::new(InMemoryStore::new());
    let catalog = Arc::new(EngineCatalog::default());
    let settings = moodcast_config::MoodSettings::default();

    let first = PersonaEngine::with_store(catalog.clone(), &settings, store.clone()).unwrap();
    let mood = first.generate_mood(Some("quiet_morning")).unwrap();
    drop(first);

    let second = PersonaEngine::with_store(catalog, &settings, store).unwrap();
    assert_eq!(second.current_mood().map(|m| m.id), Some(mood.id));

    let ctx = second.get_persona_context(&ContextRequest::new()).unwrap();
    assert_eq!(ctx.mood.id, mood.id);
}
