//! Persona (voice profile) types
//!
//! Personas define the voice used for generated text:
//! - Tone descriptor
//! - Emoji palette
//! - Characteristic speech patterns
//! - Default generation temperature

use serde::{Deserialize, Serialize};

use crate::MoodState;

/// Static voice profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    /// Persona identifier (e.g. "mentor", "ironist")
    pub id: String,
    /// Display name
    pub name: String,
    /// Tone descriptor used in prompt rendering
    pub tone: String,
    /// Emoji palette
    #[serde(default)]
    pub emoji: Vec<String>,
    /// Characteristic phrases
    #[serde(default)]
    pub speech_patterns: Vec<String>,
    /// Default generation temperature (0.0 - 1.0)
    pub default_temperature: f32,
    /// Mood categories this persona typically voices
    #[serde(default)]
    pub typical_moods: Vec<String>,
}

impl PersonaProfile {
    /// Whether the persona typically voices the given mood category
    pub fn voices(&self, category: &str) -> bool {
        self.typical_moods.iter().any(|m| m == category)
    }
}

/// Short opening-line template
///
/// Templates may contain named placeholders in `{name}` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookTemplate {
    /// Persona that owns this template
    pub persona_id: String,
    /// Template text
    pub template: String,
    /// Mood categories the hook fits
    #[serde(default)]
    pub moods: Vec<String>,
    /// Content types the hook fits
    #[serde(default)]
    pub content_types: Vec<String>,
}

impl HookTemplate {
    pub fn new(persona_id: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            persona_id: persona_id.into(),
            template: template.into(),
            moods: Vec::new(),
            content_types: Vec::new(),
        }
    }

    /// Builder: set applicable mood categories
    pub fn for_moods(mut self, moods: &[&str]) -> Self {
        self.moods = moods.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Builder: set applicable content types
    pub fn for_content(mut self, content_types: &[&str]) -> Self {
        self.content_types = content_types.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn fits_mood(&self, category: &str) -> bool {
        self.moods.iter().any(|m| m == category)
    }

    pub fn fits_content(&self, content_type: &str) -> bool {
        self.content_types.iter().any(|c| c == content_type)
    }
}

/// Resolved persona for a single generation request.
///
/// Built fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaContext {
    pub persona_id: String,
    pub persona_name: String,
    pub tone: String,
    pub emoji: Vec<String>,
    pub speech_patterns: Vec<String>,
    /// Effective temperature (persona default unless overridden)
    pub temperature: f32,
    /// Resolved opening line, if one was requested and available
    pub hook: Option<String>,
    /// Content type the context was resolved for
    pub content_type: Option<String>,
    /// Mood that produced this context
    pub mood: MoodState,
}

impl PersonaContext {
    /// Build from a profile and mood with the persona's default temperature
    pub fn from_profile(profile: &PersonaProfile, mood: MoodState) -> Self {
        Self {
            persona_id: profile.id.clone(),
            persona_name: profile.name.clone(),
            tone: profile.tone.clone(),
            emoji: profile.emoji.clone(),
            speech_patterns: profile.speech_patterns.clone(),
            temperature: profile.default_temperature,
            hook: None,
            content_type: None,
            mood,
        }
    }

    pub fn has_hook(&self) -> bool {
        self.hook.is_some()
    }
}
