//! Hook selector
//!
//! Filters the hook bank to the persona's templates and narrows by mood and
//! content type. When nothing survives, the content type constraint is
//! dropped first, then the mood constraint.

use std::collections::HashMap;
use std::sync::Arc;

use moodcast_config::EngineCatalog;
use moodcast_core::HookTemplate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::distribution::{choose, SharedRng};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

/// Placeholder names in a template, in order of appearance
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(template)
        .map(|c| c[1].to_string())
        .collect()
}

/// Whether text still contains `{name}` markers
pub fn has_unresolved(text: &str) -> bool {
    PLACEHOLDER.is_match(text)
}

/// Substitute `{name}` placeholders.
///
/// Missing variables stay literal; their names are returned alongside.
pub fn fill_placeholders(template: &str, variables: &HashMap<String, String>) -> (String, Vec<String>) {
    let mut missing = Vec::new();
    let filled = PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => {
                missing.push(caps[1].to_string());
                caps[0].to_string()
            }
        })
        .into_owned();
    (filled, missing)
}

pub struct HookSelector {
    catalog: Arc<EngineCatalog>,
    rng: SharedRng,
}

impl HookSelector {
    pub fn new(catalog: Arc<EngineCatalog>, rng: SharedRng) -> Self {
        Self { catalog, rng }
    }

    /// Pick a raw template for the persona, or None when it owns none.
    pub fn select_hook(
        &self,
        persona_id: &str,
        mood_category: &str,
        content_type: Option<&str>,
    ) -> Option<String> {
        let owned: Vec<&HookTemplate> = self.catalog.hooks_for(persona_id).collect();
        if owned.is_empty() {
            tracing::debug!(persona = %persona_id, "Persona owns no hooks");
            return None;
        }

        let fits = |h: &HookTemplate, tier: usize| match tier {
            0 => h.fits_mood(mood_category) && content_type.map_or(true, |c| h.fits_content(c)),
            1 => h.fits_mood(mood_category),
            _ => true,
        };

        for (tier, label) in ["mood+content", "mood", "any"].iter().enumerate() {
            let survivors: Vec<&HookTemplate> =
                owned.iter().copied().filter(|h| fits(*h, tier)).collect();

            if let Some(hook) = choose(&survivors, &mut *self.rng.lock()) {
                tracing::debug!(
                    persona = %persona_id,
                    mood = %mood_category,
                    content_type = content_type.unwrap_or(""),
                    tier = %label,
                    candidates = survivors.len(),
                    "Selected hook"
                );
                return Some(hook.template.clone());
            }
        }

        None
    }

    /// Select a hook and substitute its placeholders.
    ///
    /// A missing variable is left literal and logged, never an error.
    pub fn select_hook_with_variables(
        &self,
        persona_id: &str,
        mood_category: &str,
        content_type: Option<&str>,
        variables: &HashMap<String, String>,
    ) -> Option<String> {
        let template = self.select_hook(persona_id, mood_category, content_type)?;
        let (text, missing) = fill_placeholders(&template, variables);
        if !missing.is_empty() {
            tracing::warn!(
                persona = %persona_id,
                missing = ?missing,
                "Hook variables missing, placeholders left as-is"
            );
        }
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::shared_rng;

    fn catalog() -> EngineCatalog {
        let mut catalog = EngineCatalog::default();
        catalog.hooks = vec![
            HookTemplate::new("mentor", "Запомни одну вещь про {topic}.")
                .for_moods(&["calm"])
                .for_content(&["educational"]),
            HookTemplate::new("mentor", "Давай разберём по шагам.")
                .for_moods(&["calm"])
                .for_content(&["post"]),
            HookTemplate::new("mentor", "Смелее, {name}!")
                .for_moods(&["inspiration"])
                .for_content(&["motivation"]),
        ];
        catalog
    }

    fn selector(seed: u64) -> HookSelector {
        HookSelector::new(Arc::new(catalog()), shared_rng(Some(seed)))
    }

    #[test]
    fn test_exact_match_preferred() {
        let selector = selector(1);
        for _ in 0..20 {
            let hook = selector
                .select_hook("mentor", "calm", Some("educational"))
                .unwrap();
            assert_eq!(hook, "Запомни одну вещь про {topic}.");
        }
    }

    #[test]
    fn test_relaxes_content_then_mood() {
        let selector = selector(2);

        let hook = selector.select_hook("mentor", "calm", Some("reels")).unwrap();
        assert!(hook == "Запомни одну вещь про {topic}." || hook == "Давай разберём по шагам.");

        let hook = selector.select_hook("mentor", "inspiration", None).unwrap();
        assert_eq!(hook, "Смелее, {name}!");

        assert!(selector.select_hook("mentor", "anger", Some("reels")).is_some());
    }

    #[test]
    fn test_no_hooks_for_persona() {
        let selector = selector(3);
        assert!(selector.select_hook("ironist", "irony", Some("reels")).is_none());
        assert!(selector
            .select_hook_with_variables("ironist", "irony", None, &HashMap::new())
            .is_none());
    }

    #[test]
    fn test_missing_variable_left_literal() {
        let selector = selector(4);
        let hook = selector
            .select_hook_with_variables("mentor", "calm", Some("educational"), &HashMap::new())
            .unwrap();
        assert_eq!(hook, "Запомни одну вещь про {topic}.");
        assert!(has_unresolved(&hook));
    }

    #[test]
    fn test_fill_placeholders() {
        let vars = HashMap::from([
            ("name".to_string(), "Аня".to_string()),
            ("topic".to_string(), "сон".to_string()),
        ]);
        let (text, missing) = fill_placeholders("{name}, поговорим про {topic} и {goal}?", &vars);
        assert_eq!(text, "Аня, поговорим про сон и {goal}?");
        assert_eq!(missing, vec!["goal".to_string()]);
        assert_eq!(placeholders("{a} {b_c}"), vec!["a", "b_c"]);
    }
}
