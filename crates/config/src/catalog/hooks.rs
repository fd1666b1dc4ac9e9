//! Built-in hook template bank
//!
//! Placeholders: `{name}`, `{topic}`, `{goal}`, `{fact}`.

use moodcast_core::HookTemplate;

fn hook(persona: &str, template: &str, moods: &[&str], content: &[&str]) -> HookTemplate {
    HookTemplate::new(persona, template)
        .for_moods(moods)
        .for_content(content)
}

pub(super) fn default_hooks() -> Vec<HookTemplate> {
    vec![
        // friend
        hook(
            "friend",
            "Слушай, мне нужно тебе кое-что рассказать…",
            &["joy", "surprise", "sadness"],
            &["post", "story", "reply"],
        ),
        hook(
            "friend",
            "{name}, признавайся: у тебя тоже так бывает?",
            &["joy", "irony", "sadness"],
            &["post", "story", "reply"],
        ),
        hook(
            "friend",
            "Сегодня случилось то, что я не могу не рассказать 💛",
            &["joy", "surprise"],
            &["post", "story", "announcement"],
        ),
        // mentor
        hook(
            "mentor",
            "Запомни одну вещь про {topic}.",
            &["calm", "inspiration", "fear"],
            &["post", "educational", "motivation"],
        ),
        hook(
            "mentor",
            "Давай честно: что мешает тебе {goal}?",
            &["calm", "fear"],
            &["sales", "educational", "reply"],
        ),
        hook(
            "mentor",
            "Три шага, которые изменят твоё отношение к теме «{topic}».",
            &["inspiration", "calm"],
            &["educational", "post", "reels"],
        ),
        // expert
        hook(
            "expert",
            "Факт, о котором молчат: {fact}.",
            &["calm", "anger", "surprise"],
            &["educational", "sales", "post"],
        ),
        hook(
            "expert",
            "Разберём по цифрам: {topic}.",
            &["calm", "fear"],
            &["educational", "sales"],
        ),
        hook(
            "expert",
            "Исследования говорят одно, а реклама другое.",
            &["anger", "fear"],
            &["educational", "post"],
        ),
        // motivator
        hook(
            "motivator",
            "Хватит откладывать {goal} на понедельник! 🔥",
            &["joy", "inspiration", "anger"],
            &["motivation", "reels", "post"],
        ),
        hook(
            "motivator",
            "Сегодня тот самый день, чтобы начать.",
            &["inspiration", "joy"],
            &["motivation", "reels", "announcement"],
        ),
        hook(
            "motivator",
            "Ты можешь больше, чем думаешь. Доказываю.",
            &["inspiration"],
            &["motivation", "post", "sales"],
        ),
        // ironist
        hook(
            "ironist",
            "Ну конечно, {topic} это же так просто 😏",
            &["irony", "anger"],
            &["story", "reels", "post"],
        ),
        hook(
            "ironist",
            "Спойлер: диеты не работают. А вот это работает.",
            &["irony", "surprise"],
            &["reels", "sales"],
        ),
        hook(
            "ironist",
            "Кто бы мог подумать, что {topic} окажется таким сюрпризом.",
            &["surprise", "irony"],
            &["post", "story"],
        ),
        // philosopher
        hook(
            "philosopher",
            "Иногда стоит остановиться и спросить себя: зачем?",
            &["calm", "sadness"],
            &["post", "story"],
        ),
        hook(
            "philosopher",
            "Задумайся: когда ты в последний раз делал что-то для себя?",
            &["calm", "sadness", "fear"],
            &["post", "motivation"],
        ),
        hook(
            "philosopher",
            "В тишине слышно главное.",
            &["calm"],
            &["post", "story"],
        ),
        // storyteller
        hook(
            "storyteller",
            "Это случилось в обычный вторник…",
            &["joy", "surprise", "sadness"],
            &["post", "story", "announcement"],
        ),
        hook(
            "storyteller",
            "{name} написала мне вчера вечером, и я до сих пор под впечатлением.",
            &["joy", "surprise", "inspiration"],
            &["post", "sales", "story"],
        ),
        hook(
            "storyteller",
            "А теперь самое интересное: что было дальше.",
            &["surprise", "inspiration"],
            &["reels", "story"],
        ),
    ]
}
