//! Text generator collaborator
//!
//! The engine never calls a generator. It renders prompt fragments
//! (persona instructions, funnel guidance) that the caller merges into a
//! `GenerationRequest` and sends to whatever backend it uses.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Request for an external text generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System-level instructions
    pub instructions: String,
    /// User-level prompt
    pub prompt: String,
    /// Sampling temperature (0.0 - 1.0)
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(instructions: impl Into<String>, prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            instructions: instructions.into(),
            prompt: prompt.into(),
            temperature: temperature.clamp(0.0, 1.0),
        }
    }

    /// Merge base instructions with engine-rendered fragments.
    ///
    /// Empty fragments are skipped; the rest are separated by blank lines.
    pub fn compose(
        base_instructions: &str,
        fragments: &[&str],
        prompt: impl Into<String>,
        temperature: f32,
    ) -> Self {
        let mut sections: Vec<&str> = Vec::with_capacity(fragments.len() + 1);
        if !base_instructions.trim().is_empty() {
            sections.push(base_instructions.trim());
        }
        sections.extend(
            fragments
                .iter()
                .map(|f| f.trim())
                .filter(|f| !f.is_empty()),
        );

        Self::new(sections.join("\n\n"), prompt, temperature)
    }
}

/// External text generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the request
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Model identifier for logging
    fn model_name(&self) -> &str;
}
