//! Engine catalog
//!
//! Read-only registries consumed by the mood generator, the persona context
//! builder and the hook selector. The catalog is built once (from the
//! built-in tables or a YAML/JSON file), validated, and then shared behind
//! an `Arc`; nothing mutates it at runtime.

mod hooks;
mod moods;
mod personas;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use moodcast_core::{HookTemplate, Intensity, PersonaProfile};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One mood category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodCatalogEntry {
    pub category: String,
    /// Relative selection weight (nonnegative)
    pub weight: f64,
    /// Emotion names per intensity
    #[serde(default)]
    pub emotions: BTreeMap<Intensity, Vec<String>>,
    /// Compatible persona ids
    #[serde(default)]
    pub personas: Vec<String>,
}

impl MoodCatalogEntry {
    /// Emotions listed for an intensity (empty if none)
    pub fn emotions_for(&self, intensity: Intensity) -> &[String] {
        self.emotions
            .get(&intensity)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Row of the (category, intensity) → persona table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaMapping {
    pub category: String,
    pub intensity: Intensity,
    pub personas: Vec<String>,
}

/// Preferred personas for a content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPreference {
    pub content_type: String,
    pub personas: Vec<String>,
}

/// Named event forcing a (category, intensity) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub name: String,
    pub category: String,
    pub intensity: Intensity,
}

/// All static registries of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineCatalog {
    pub moods: Vec<MoodCatalogEntry>,
    pub personas: Vec<PersonaProfile>,
    /// Persona used when no other rule yields one
    pub default_persona: String,
    #[serde(default)]
    pub persona_map: Vec<PersonaMapping>,
    #[serde(default)]
    pub content_preferences: Vec<ContentPreference>,
    #[serde(default)]
    pub hooks: Vec<HookTemplate>,
    #[serde(default)]
    pub triggers: Vec<TriggerEvent>,
}

impl Default for EngineCatalog {
    fn default() -> Self {
        Self {
            moods: moods::default_moods(),
            personas: personas::default_personas(),
            default_persona: personas::DEFAULT_PERSONA.to_string(),
            persona_map: personas::default_persona_map(),
            content_preferences: personas::default_content_preferences(),
            hooks: hooks::default_hooks(),
            triggers: moods::default_triggers(),
        }
    }
}

impl EngineCatalog {
    /// Load from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = read_file(path.as_ref())?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = read_file(path.as_ref())?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load from a file, choosing the format by extension, and validate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path)?,
            Some("yaml") | Some("yml") => Self::from_yaml_file(path)?,
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "catalog_path".to_string(),
                    message: format!("unsupported catalog format: {:?}", other),
                })
            }
        };

        catalog.validate()?;
        tracing::info!(
            path = %path.display(),
            moods = catalog.moods.len(),
            personas = catalog.personas.len(),
            hooks = catalog.hooks.len(),
            "Loaded engine catalog"
        );
        Ok(catalog)
    }

    /// Mood category by name
    pub fn mood(&self, category: &str) -> Option<&MoodCatalogEntry> {
        self.moods.iter().find(|m| m.category == category)
    }

    /// Persona profile by id
    pub fn persona(&self, id: &str) -> Option<&PersonaProfile> {
        self.personas.iter().find(|p| p.id == id)
    }

    /// Designated default persona profile
    pub fn default_profile(&self) -> Option<&PersonaProfile> {
        self.persona(&self.default_persona)
    }

    /// Personas mapped to (category, intensity); empty when unmapped
    pub fn personas_for(&self, category: &str, intensity: Intensity) -> &[String] {
        self.persona_map
            .iter()
            .find(|m| m.category == category && m.intensity == intensity)
            .map(|m| m.personas.as_slice())
            .unwrap_or(&[])
    }

    /// Preferred personas for a content type; empty for unknown types
    pub fn preferred_personas(&self, content_type: &str) -> &[String] {
        self.content_preferences
            .iter()
            .find(|c| c.content_type == content_type)
            .map(|c| c.personas.as_slice())
            .unwrap_or(&[])
    }

    /// Trigger event by name
    pub fn trigger(&self, name: &str) -> Option<&TriggerEvent> {
        self.triggers.iter().find(|t| t.name == name)
    }

    /// Hook templates owned by a persona
    pub fn hooks_for<'a>(&'a self, persona_id: &'a str) -> impl Iterator<Item = &'a HookTemplate> {
        self.hooks.iter().filter(move |h| h.persona_id == persona_id)
    }

    /// Sum of all category weights
    pub fn total_weight(&self) -> f64 {
        self.moods.iter().map(|m| m.weight).sum()
    }

    /// Validate cross-references and value ranges.
    ///
    /// Every problem found is logged; the first one is returned as the error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let issues = self.collect_issues();
        for (field, message) in &issues {
            tracing::warn!(field = %field, "Catalog validation: {}", message);
        }

        match issues.into_iter().next() {
            Some((field, message)) => Err(ConfigError::InvalidValue { field, message }),
            None => Ok(()),
        }
    }

    fn collect_issues(&self) -> Vec<(String, String)> {
        let mut issues = Vec::new();
        let persona_ids: HashSet<&str> = self.personas.iter().map(|p| p.id.as_str()).collect();
        let categories: HashSet<&str> = self.moods.iter().map(|m| m.category.as_str()).collect();

        let check_persona = |field: String, id: &str, issues: &mut Vec<(String, String)>| {
            if !persona_ids.contains(id) {
                issues.push((field, format!("unknown persona '{}'", id)));
            }
        };

        if self.moods.is_empty() {
            issues.push(("moods".to_string(), "catalog has no mood categories".to_string()));
        }

        for mood in &self.moods {
            let field = format!("moods.{}", mood.category);
            if !mood.weight.is_finite() || mood.weight < 0.0 {
                issues.push((
                    format!("{}.weight", field),
                    format!("weight must be nonnegative, got {}", mood.weight),
                ));
            }
            // unconstrained draws may land on any intensity
            if mood.weight > 0.0 {
                for intensity in Intensity::all() {
                    if mood.emotions_for(*intensity).is_empty() {
                        issues.push((
                            format!("{}.emotions.{}", field, intensity),
                            "no emotions listed".to_string(),
                        ));
                    }
                }
            }
            for id in &mood.personas {
                check_persona(format!("{}.personas", field), id, &mut issues);
            }
        }

        if !self.moods.is_empty() && self.total_weight() <= 0.0 {
            issues.push((
                "moods".to_string(),
                "at least one category needs a positive weight".to_string(),
            ));
        }

        for persona in &self.personas {
            if !(0.0..=1.0).contains(&persona.default_temperature) {
                issues.push((
                    format!("personas.{}.default_temperature", persona.id),
                    format!(
                        "must be within 0.0-1.0, got {}",
                        persona.default_temperature
                    ),
                ));
            }
        }

        if !persona_ids.contains(self.default_persona.as_str()) {
            issues.push((
                "default_persona".to_string(),
                format!("unknown persona '{}'", self.default_persona),
            ));
        }

        for mapping in &self.persona_map {
            let field = format!("persona_map.{}.{}", mapping.category, mapping.intensity);
            if !categories.contains(mapping.category.as_str()) {
                issues.push((field.clone(), format!("unknown category '{}'", mapping.category)));
            }
            for id in &mapping.personas {
                check_persona(field.clone(), id, &mut issues);
            }
        }

        for pref in &self.content_preferences {
            for id in &pref.personas {
                check_persona(
                    format!("content_preferences.{}", pref.content_type),
                    id,
                    &mut issues,
                );
            }
        }

        for hook in &self.hooks {
            check_persona("hooks.persona_id".to_string(), &hook.persona_id, &mut issues);
        }

        for trigger in &self.triggers {
            let field = format!("triggers.{}", trigger.name);
            match self.mood(&trigger.category) {
                None => issues.push((field, format!("unknown category '{}'", trigger.category))),
                Some(entry) if entry.emotions_for(trigger.intensity).is_empty() => {
                    issues.push((
                        field,
                        format!(
                            "no emotions listed for {}/{}",
                            trigger.category, trigger.intensity
                        ),
                    ))
                }
                Some(_) => {}
            }
        }

        issues
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))
}
