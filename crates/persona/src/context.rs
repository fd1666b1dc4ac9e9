//! Persona context builder
//!
//! Reconciles a mood with the requested content type to pick the final
//! voice, resolves an optional hook, and renders the voice instructions.

use std::collections::HashMap;
use std::sync::Arc;

use moodcast_config::EngineCatalog;
use moodcast_core::{Error, MoodState, PersonaContext, PersonaProfile, Result};
use serde::{Deserialize, Serialize};

use crate::distribution::{choose, SharedRng};
use crate::hooks::HookSelector;

/// Parameters for resolving a persona context
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextRequest {
    /// Mood to resolve for; the active mood (or a fresh one) when absent
    #[serde(default)]
    pub mood: Option<MoodState>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub include_hook: bool,
    #[serde(default)]
    pub variables: HashMap<String, String>,
    /// Overrides the persona's default temperature
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl ContextRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mood(mut self, mood: MoodState) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Request a hook, substituting the given variables
    pub fn with_hook(mut self, variables: HashMap<String, String>) -> Self {
        self.include_hook = true;
        self.variables = variables;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

pub struct ContextBuilder {
    catalog: Arc<EngineCatalog>,
    hooks: HookSelector,
    rng: SharedRng,
}

impl ContextBuilder {
    pub fn new(catalog: Arc<EngineCatalog>, rng: SharedRng) -> Self {
        Self {
            hooks: HookSelector::new(catalog.clone(), rng.clone()),
            catalog,
            rng,
        }
    }

    pub fn hooks(&self) -> &HookSelector {
        &self.hooks
    }

    /// Build the context for an already-resolved mood
    pub fn build(&self, mood: MoodState, request: &ContextRequest) -> Result<PersonaContext> {
        let content_type = request.content_type.as_deref();
        let profile = self.resolve_persona(&mood, content_type)?;

        let mut context = PersonaContext::from_profile(profile, mood);
        context.content_type = request.content_type.clone();

        if let Some(temperature) = request.temperature {
            context.temperature = clamp_temperature(temperature);
        }

        if request.include_hook {
            context.hook = self.hooks.select_hook_with_variables(
                &context.persona_id,
                &context.mood.category,
                content_type,
                &request.variables,
            );
        }

        tracing::debug!(
            persona = %context.persona_id,
            mood = %context.mood.describe(),
            content_type = content_type.unwrap_or(""),
            temperature = context.temperature,
            hook = context.has_hook(),
            "Resolved persona context"
        );

        Ok(context)
    }

    /// Pick the final persona.
    ///
    /// Without a content type the mood's own persona is kept. With one, the
    /// candidates are the mood category's compatible personas intersected
    /// with the content type's preferences, falling back to the preference
    /// list and then to the default persona. The mood's persona wins when it
    /// is among the candidates.
    fn resolve_persona(
        &self,
        mood: &MoodState,
        content_type: Option<&str>,
    ) -> Result<&PersonaProfile> {
        let chosen: String = match content_type {
            None => mood.persona_id.clone(),
            Some(content_type) => {
                let preferred = self.catalog.preferred_personas(content_type);
                let compatible = self
                    .catalog
                    .mood(&mood.category)
                    .map(|m| m.personas.as_slice())
                    .unwrap_or(&[]);

                let intersection: Vec<String> = preferred
                    .iter()
                    .filter(|p| compatible.contains(p))
                    .cloned()
                    .collect();

                let candidates: Vec<String> = if !intersection.is_empty() {
                    intersection
                } else if !preferred.is_empty() {
                    preferred.to_vec()
                } else {
                    vec![self.catalog.default_persona.clone()]
                };

                if candidates.contains(&mood.persona_id) {
                    mood.persona_id.clone()
                } else {
                    choose(&candidates, &mut *self.rng.lock())
                        .cloned()
                        .unwrap_or_else(|| self.catalog.default_persona.clone())
                }
            }
        };

        self.catalog
            .persona(&chosen)
            .or_else(|| {
                tracing::warn!(persona = %chosen, "Unknown persona, using default");
                self.catalog.default_profile()
            })
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "default persona '{}' is not registered",
                    self.catalog.default_persona
                ))
            })
    }
}

fn clamp_temperature(temperature: f32) -> f32 {
    if !(0.0..=1.0).contains(&temperature) {
        tracing::warn!(temperature, "Temperature override out of range, clamping");
    }
    if temperature.is_nan() {
        return 0.0;
    }
    temperature.clamp(0.0, 1.0)
}

/// Render the voice instruction block for a context.
///
/// Pure formatting; nothing is looked up or mutated.
pub fn prompt_enhancement(context: &PersonaContext) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("## Voice: {}", context.persona_name));
    lines.push(format!("Tone: {}", context.tone));
    lines.push(format!(
        "Mood: {} ({}), intensity {} - {}",
        context.mood.emotion,
        context.mood.category,
        context.mood.intensity,
        context.mood.intensity.prompt_hint()
    ));

    if !context.speech_patterns.is_empty() {
        lines.push("Characteristic phrases (use naturally, do not repeat verbatim every time):".to_string());
        for pattern in &context.speech_patterns {
            lines.push(format!("- {}", pattern));
        }
    }

    if !context.emoji.is_empty() {
        lines.push(format!("Emoji palette: {}", context.emoji.join(" ")));
    }

    if let Some(content_type) = &context.content_type {
        lines.push(format!("Content type: {}", content_type));
    }

    if let Some(hook) = &context.hook {
        lines.push(format!("Open with: \"{}\"", hook));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::shared_rng;
    use moodcast_core::Intensity;

    fn builder(seed: u64) -> ContextBuilder {
        ContextBuilder::new(Arc::new(EngineCatalog::default()), shared_rng(Some(seed)))
    }

    #[test]
    fn test_no_content_type_keeps_mood_persona() {
        let mood = MoodState::new("sadness", "грусть", Intensity::Light, "philosopher");
        let ctx = builder(1).build(mood, &ContextRequest::new()).unwrap();
        assert_eq!(ctx.persona_id, "philosopher");
        assert_eq!(ctx.temperature, 0.7);
        assert!(!ctx.has_hook());
    }

    #[test]
    fn test_intersection_keeps_mood_persona() {
        // joy is compatible with friend; post prefers friend
        let mood = MoodState::new("joy", "радость", Intensity::Light, "friend");
        let request = ContextRequest::new().with_content_type("post");
        let ctx = builder(2).build(mood, &request).unwrap();
        assert_eq!(ctx.persona_id, "friend");
        assert_eq!(ctx.content_type.as_deref(), Some("post"));
    }

    #[test]
    fn test_intersection_narrows_choice() {
        // anger affinity {ironist, expert, motivator} ∩ educational {expert, mentor}
        let mood = MoodState::new("anger", "гнев", Intensity::Strong, "motivator");
        let request = ContextRequest::new().with_content_type("educational");
        for seed in 0..10 {
            let ctx = builder(seed).build(mood.clone(), &request).unwrap();
            assert_eq!(ctx.persona_id, "expert");
        }
    }

    #[test]
    fn test_empty_intersection_uses_preferences() {
        // irony affinity {ironist, friend} ∩ motivation {motivator, mentor} = ∅
        let mood = MoodState::new("irony", "сарказм", Intensity::Medium, "ironist");
        let request = ContextRequest::new().with_content_type("motivation");
        for seed in 0..10 {
            let ctx = builder(seed).build(mood.clone(), &request).unwrap();
            assert!(ctx.persona_id == "motivator" || ctx.persona_id == "mentor");
        }
    }

    #[test]
    fn test_unknown_content_type_uses_default() {
        let mood = MoodState::new("calm", "покой", Intensity::Medium, "mentor");
        let request = ContextRequest::new().with_content_type("podcast");
        let ctx = builder(3).build(mood, &request).unwrap();
        assert_eq!(ctx.persona_id, "friend");
    }

    #[test]
    fn test_temperature_override_clamped() {
        let mood = MoodState::new("calm", "покой", Intensity::Medium, "mentor");
        let b = builder(4);

        let ctx = b
            .build(mood.clone(), &ContextRequest::new().with_temperature(0.3))
            .unwrap();
        assert_eq!(ctx.temperature, 0.3);

        let ctx = b
            .build(mood, &ContextRequest::new().with_temperature(2.5))
            .unwrap();
        assert_eq!(ctx.temperature, 1.0);
    }

    #[test]
    fn test_hook_resolved_with_variables() {
        let mood = MoodState::new("inspiration", "азарт", Intensity::Medium, "motivator");
        let vars = HashMap::from([("goal".to_string(), "зарядку".to_string())]);
        let request = ContextRequest::new()
            .with_content_type("motivation")
            .with_hook(vars);

        let ctx = builder(5).build(mood, &request).unwrap();
        let hook = ctx.hook.clone().unwrap();
        assert!(!crate::hooks::has_unresolved(&hook));
    }

    #[test]
    fn test_request_from_json_defaults() {
        let request: ContextRequest =
            serde_json::from_str(r#"{"content_type": "reels", "include_hook": true}"#).unwrap();
        assert_eq!(request.content_type.as_deref(), Some("reels"));
        assert!(request.include_hook);
        assert!(request.mood.is_none());
        assert!(request.variables.is_empty());
        assert!(request.temperature.is_none());
    }

    #[test]
    fn test_prompt_enhancement_renders_voice() {
        let mood = MoodState::new("joy", "восторг", Intensity::Strong, "motivator");
        let mut ctx = builder(6).build(mood, &ContextRequest::new()).unwrap();
        ctx.hook = Some("Сегодня тот самый день, чтобы начать.".to_string());

        let text = prompt_enhancement(&ctx);
        assert!(text.starts_with("## Voice: Мотиватор"));
        assert!(text.contains("Tone: энергичный"));
        assert!(text.contains("- Хватит ждать!"));
        assert!(text.contains("🔥"));
        assert!(text.contains("восторг (joy), intensity strong"));
        assert!(text.contains("Open with: \"Сегодня тот самый день, чтобы начать.\""));
        assert_eq!(prompt_enhancement(&ctx), text);
    }
}
