//! Collaborator traits
//!
//! The engine depends on two external collaborators:
//! - A keyed state store (mood continuity, conversation resumption)
//! - A text generator (consumes the prompt fragments the engine renders)

mod generator;
mod store;

pub use generator::{GenerationRequest, TextGenerator};
pub use store::{InMemoryStore, StateStore};
