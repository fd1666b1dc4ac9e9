//! Built-in persona registry and persona routing tables

use moodcast_core::{Intensity, PersonaProfile};

use super::{ContentPreference, PersonaMapping};

pub(super) const DEFAULT_PERSONA: &str = "friend";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn profile(
    id: &str,
    name: &str,
    tone: &str,
    emoji: &[&str],
    speech_patterns: &[&str],
    default_temperature: f32,
    typical_moods: &[&str],
) -> PersonaProfile {
    PersonaProfile {
        id: id.to_string(),
        name: name.to_string(),
        tone: tone.to_string(),
        emoji: strings(emoji),
        speech_patterns: strings(speech_patterns),
        default_temperature,
        typical_moods: strings(typical_moods),
    }
}

pub(super) fn default_personas() -> Vec<PersonaProfile> {
    vec![
        profile(
            "friend",
            "Подруга",
            "тёплый, разговорный, на «ты»",
            &["😊", "💛", "🤗", "✨"],
            &["Слушай, ...", "Честно?", "Ну вот представь:"],
            0.8,
            &["joy", "surprise", "sadness", "irony"],
        ),
        profile(
            "mentor",
            "Наставник",
            "спокойный и уверенный, поддерживает",
            &["📌", "🧭", "✅"],
            &[
                "Смотри, как это работает:",
                "Запомни главное:",
                "Давай разберём по шагам.",
            ],
            0.6,
            &["calm", "inspiration", "fear"],
        ),
        profile(
            "expert",
            "Эксперт",
            "деловой, точный, опирается на факты",
            &["📊", "🔬", "📎"],
            &["По данным исследований,", "Важно понимать:", "Факт:"],
            0.4,
            &["calm", "anger", "fear"],
        ),
        profile(
            "motivator",
            "Мотиватор",
            "энергичный, напористый, зажигает",
            &["🔥", "💪", "🚀", "⚡"],
            &[
                "Хватит ждать!",
                "Ты можешь больше, чем думаешь.",
                "Сегодня тот самый день.",
            ],
            0.9,
            &["joy", "inspiration", "anger"],
        ),
        profile(
            "ironist",
            "Ироник",
            "остроумный, насмешливый, с самоиронией",
            &["😏", "🙃", "🤷"],
            &["Ну конечно,", "Спойлер:", "Кто бы мог подумать,"],
            0.85,
            &["irony", "anger", "surprise"],
        ),
        profile(
            "philosopher",
            "Философ",
            "размеренный, созерцательный",
            &["🌿", "🌙", "🕊️"],
            &[
                "Иногда стоит остановиться и спросить себя:",
                "В этом есть что-то важное.",
                "Задумайся:",
            ],
            0.7,
            &["calm", "sadness", "fear"],
        ),
        profile(
            "storyteller",
            "Рассказчик",
            "образный, повествовательный, с деталями",
            &["📖", "🎬", "🌅"],
            &[
                "Это случилось в обычный вторник.",
                "А теперь самое интересное.",
                "История не об этом, а о другом.",
            ],
            0.85,
            &["joy", "surprise", "sadness", "inspiration"],
        ),
    ]
}

/// fear/extreme, anger/extreme and surprise/extreme are left unmapped and
/// resolve to the default persona.
pub(super) fn default_persona_map() -> Vec<PersonaMapping> {
    use Intensity::*;

    let rows: &[(&str, Intensity, &[&str])] = &[
        ("joy", Light, &["friend"]),
        ("joy", Medium, &["friend", "storyteller"]),
        ("joy", Strong, &["motivator", "storyteller"]),
        ("joy", Extreme, &["motivator"]),
        ("calm", Light, &["philosopher", "friend"]),
        ("calm", Medium, &["mentor", "philosopher"]),
        ("calm", Strong, &["mentor"]),
        ("calm", Extreme, &["philosopher"]),
        ("inspiration", Light, &["mentor"]),
        ("inspiration", Medium, &["motivator", "mentor"]),
        ("inspiration", Strong, &["motivator"]),
        ("inspiration", Extreme, &["motivator", "storyteller"]),
        ("surprise", Light, &["friend"]),
        ("surprise", Medium, &["storyteller"]),
        ("surprise", Strong, &["storyteller", "ironist"]),
        ("irony", Light, &["ironist", "friend"]),
        ("irony", Medium, &["ironist"]),
        ("irony", Strong, &["ironist"]),
        ("irony", Extreme, &["ironist"]),
        ("sadness", Light, &["friend", "philosopher"]),
        ("sadness", Medium, &["philosopher"]),
        ("sadness", Strong, &["philosopher", "storyteller"]),
        ("sadness", Extreme, &["philosopher"]),
        ("anger", Light, &["ironist"]),
        ("anger", Medium, &["expert", "ironist"]),
        ("anger", Strong, &["motivator"]),
        ("fear", Light, &["mentor"]),
        ("fear", Medium, &["mentor", "expert"]),
        ("fear", Strong, &["expert"]),
    ];

    rows.iter()
        .map(|(category, intensity, personas)| PersonaMapping {
            category: category.to_string(),
            intensity: *intensity,
            personas: strings(personas),
        })
        .collect()
}

pub(super) fn default_content_preferences() -> Vec<ContentPreference> {
    let rows: &[(&str, &[&str])] = &[
        ("post", &["friend", "storyteller", "philosopher", "mentor"]),
        ("story", &["friend", "ironist"]),
        ("reels", &["motivator", "ironist", "friend"]),
        ("motivation", &["motivator", "mentor"]),
        ("sales", &["expert", "mentor", "friend"]),
        ("educational", &["expert", "mentor"]),
        ("reply", &["friend", "mentor"]),
        ("announcement", &["storyteller", "motivator"]),
    ];

    rows.iter()
        .map(|(content_type, personas)| ContentPreference {
            content_type: content_type.to_string(),
            personas: strings(personas),
        })
        .collect()
}
