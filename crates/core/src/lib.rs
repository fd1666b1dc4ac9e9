//! Core types and traits for the mood/persona engine
//!
//! This crate provides the foundational types shared by every other crate:
//! - Mood types (intensity levels, mood state with supersession)
//! - Persona types (voice profiles, hook templates, resolved context)
//! - Keyed state store abstraction with an in-memory default
//! - Text generator collaborator trait (never called by the core)
//! - Error types

pub mod error;
pub mod mood;
pub mod persona;
pub mod traits;

pub use error::{Error, Result};
pub use mood::{Intensity, MoodState};
pub use persona::{HookTemplate, PersonaContext, PersonaProfile};

pub use traits::{GenerationRequest, InMemoryStore, StateStore, TextGenerator};
