//! The untrusted-content boundary for Gumshoe.
//!
//! A [`ContentGenerator`] produces raw text; the pipeline in [`validate`]
//! turns that text into a [`gs_core::GameState`] or explains exactly why it
//! could not. Nothing generated reaches the world model without passing
//! through here.

/// Wire-format DTOs for generated scenarios and transitions.
pub mod dto;
/// Error types for generation and validation.
pub mod error;
/// The content generator contract and bundled implementations.
pub mod generator;
/// Prompt construction for bootstrap and question round-trips.
pub mod prompt;
/// Bundled offline scenario.
pub mod scenario;
/// Parsing, consistency checks, and DTO-to-model mapping.
pub mod validate;

pub use error::{BootstrapError, GeneratorError, ValidationError};
pub use generator::{
    ContentGenerator, GenerationRequest, ScriptedGenerator, UnavailableGenerator,
    generate_with_timeout,
};
pub use validate::{Transition, bootstrap, parse_transition};
