//! Built-in mood catalog and trigger events

use std::collections::BTreeMap;

use moodcast_core::Intensity;

use super::{MoodCatalogEntry, TriggerEvent};

fn entry(
    category: &str,
    weight: f64,
    emotions: [&[&str]; 4],
    personas: &[&str],
) -> MoodCatalogEntry {
    let emotions: BTreeMap<Intensity, Vec<String>> = Intensity::all()
        .iter()
        .copied()
        .zip(emotions)
        .map(|(intensity, names)| (intensity, names.iter().map(|n| n.to_string()).collect()))
        .collect();

    MoodCatalogEntry {
        category: category.to_string(),
        weight,
        emotions,
        personas: personas.iter().map(|p| p.to_string()).collect(),
    }
}

/// Emotions are listed light → medium → strong → extreme.
pub(super) fn default_moods() -> Vec<MoodCatalogEntry> {
    vec![
        entry(
            "joy",
            25.0,
            [
                &["радость", "удовлетворение", "лёгкость"],
                &["воодушевление", "весёлость", "довольство"],
                &["восторг", "ликование"],
                &["эйфория", "триумф"],
            ],
            &["friend", "motivator", "storyteller"],
        ),
        entry(
            "calm",
            20.0,
            [
                &["спокойствие", "умиротворение"],
                &["безмятежность", "гармония"],
                &["глубокий покой", "сосредоточенность"],
                &["просветлённость"],
            ],
            &["philosopher", "mentor", "friend"],
        ),
        entry(
            "inspiration",
            15.0,
            [
                &["интерес", "любопытство"],
                &["вдохновение", "азарт"],
                &["окрылённость", "жажда действий"],
                &["озарение"],
            ],
            &["motivator", "mentor", "storyteller"],
        ),
        entry(
            "surprise",
            10.0,
            [
                &["удивление", "недоумение"],
                &["изумление"],
                &["потрясение", "ошеломление"],
                &["шок"],
            ],
            &["storyteller", "friend", "ironist"],
        ),
        entry(
            "irony",
            10.0,
            [
                &["лёгкая ирония", "усмешка"],
                &["сарказм", "насмешливость"],
                &["едкий сарказм"],
                &["абсурдный смех"],
            ],
            &["ironist", "friend"],
        ),
        entry(
            "sadness",
            8.0,
            [
                &["грусть", "задумчивость"],
                &["печаль", "ностальгия"],
                &["тоска", "горечь"],
                &["отчаяние"],
            ],
            &["philosopher", "friend", "storyteller"],
        ),
        entry(
            "anger",
            6.0,
            [
                &["раздражение", "досада"],
                &["возмущение", "негодование"],
                &["гнев", "злость"],
                &["ярость"],
            ],
            &["ironist", "expert", "motivator"],
        ),
        entry(
            "fear",
            6.0,
            [
                &["беспокойство", "настороженность"],
                &["тревога", "волнение"],
                &["страх", "смятение"],
                &["паника"],
            ],
            &["mentor", "expert", "philosopher"],
        ),
    ]
}

pub(super) fn default_triggers() -> Vec<TriggerEvent> {
    [
        ("big_achievement", "joy", Intensity::Extreme),
        ("small_win", "joy", Intensity::Medium),
        ("failure", "sadness", Intensity::Strong),
        ("loss", "sadness", Intensity::Extreme),
        ("conflict", "anger", Intensity::Strong),
        ("injustice", "anger", Intensity::Medium),
        ("uncertainty", "fear", Intensity::Medium),
        ("unexpected_news", "surprise", Intensity::Strong),
        ("quiet_morning", "calm", Intensity::Light),
        ("new_idea", "inspiration", Intensity::Strong),
        ("absurd_situation", "irony", Intensity::Medium),
    ]
    .into_iter()
    .map(|(name, category, intensity)| TriggerEvent {
        name: name.to_string(),
        category: category.to_string(),
        intensity,
    })
    .collect()
}
