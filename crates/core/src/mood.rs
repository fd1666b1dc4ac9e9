//! Mood types
//!
//! A mood is a (category, emotion, intensity) triple plus the voice profile
//! drawn for it. At most one mood is active at a time; a new mood supersedes
//! the previous one rather than deleting it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Emotional intensity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Light,
    Medium,
    Strong,
    Extreme,
}

impl Intensity {
    /// All intensities, mildest first
    pub fn all() -> &'static [Intensity] {
        &[
            Intensity::Light,
            Intensity::Medium,
            Intensity::Strong,
            Intensity::Extreme,
        ]
    }

    /// Identifier used in catalogs and over the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Light => "light",
            Intensity::Medium => "medium",
            Intensity::Strong => "strong",
            Intensity::Extreme => "extreme",
        }
    }

    /// Fixed draw probability for unconstrained generation.
    ///
    /// The four values sum to 1.0.
    pub fn draw_probability(&self) -> f64 {
        match self {
            Intensity::Light => 0.35,
            Intensity::Medium => 0.40,
            Intensity::Strong => 0.20,
            Intensity::Extreme => 0.05,
        }
    }

    /// Instruction phrase for prompt rendering
    pub fn prompt_hint(&self) -> &'static str {
        match self {
            Intensity::Light => "barely noticeable, in the background",
            Intensity::Medium => "clearly present but balanced",
            Intensity::Strong => "pronounced, colouring every sentence",
            Intensity::Extreme => "overwhelming, at full volume",
        }
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity::Medium
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Intensity::Light),
            "medium" => Ok(Intensity::Medium),
            "strong" => Ok(Intensity::Strong),
            "extreme" => Ok(Intensity::Extreme),
            other => Err(Error::Configuration(format!(
                "unknown intensity '{}'",
                other
            ))),
        }
    }
}

/// A concrete drawn mood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodState {
    /// Unique id, also the store key
    pub id: Uuid,
    /// Catalog category (e.g. "joy")
    pub category: String,
    /// Concrete emotion drawn from the catalog list for (category, intensity)
    pub emotion: String,
    pub intensity: Intensity,
    /// Voice profile drawn for this mood
    pub persona_id: String,
    /// Named event that caused this mood, if any
    pub trigger: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Only the latest generated mood is active
    pub active: bool,
}

impl MoodState {
    /// Create a new active mood
    pub fn new(
        category: impl Into<String>,
        emotion: impl Into<String>,
        intensity: Intensity,
        persona_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            emotion: emotion.into(),
            intensity,
            persona_id: persona_id.into(),
            trigger: None,
            created_at: Utc::now(),
            active: true,
        }
    }

    /// Builder: record the triggering event
    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    /// Mark this mood as superseded
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Store key for this mood
    pub fn store_key(&self) -> String {
        format!("mood:{}", self.id)
    }

    /// Short human-readable description, e.g. "восторг (joy, strong)"
    pub fn describe(&self) -> String {
        format!("{} ({}, {})", self.emotion, self.category, self.intensity)
    }
}
