//! Stateless rules engine for Gumshoe.
//!
//! Every entry point takes the current [`gs_core::GameState`] and returns its
//! replacement (or an explicit error). Nothing here keeps a snapshot between
//! calls; the session layer owns the single current state.

/// Player actions and their validation errors.
pub mod action;
/// Clock advancement.
pub mod clock;
/// Engine configuration: action costs and fallback seed.
pub mod config;
/// Error types for the engine crate.
pub mod error;
/// Timeline event discovery and application.
pub mod events;
/// Deterministic in-character replies used when no generated text is available.
pub mod fallback;
/// Action validation and execution.
pub mod resolver;
/// Terminal-condition evaluation.
pub mod verdict;

/// Re-export of [`action::Action`] and [`action::ActionKind`].
pub use action::{Action, ActionKind};
/// Re-export of [`clock::advance_time`].
pub use clock::advance_time;
/// Re-export of [`config::EngineConfig`].
pub use config::EngineConfig;
/// Re-exports of [`error::ActionError`] and [`error::ActionResult`].
pub use error::{ActionError, ActionResult};
/// Re-exports of the time and event engine.
pub use events::{
    Advance, advance, advance_time_and_process_events, apply_event, triggered_events_between,
};
/// Re-exports of [`resolver::ActionResolver`] and [`resolver::Resolution`].
pub use resolver::{ActionResolver, Resolution, move_distance};
/// Re-exports of [`verdict::Verdict`] and [`verdict::evaluate`].
pub use verdict::{Verdict, evaluate};
