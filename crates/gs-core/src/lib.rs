//! Core types for Gumshoe: game time, unlock conditions, and the world snapshot.
//!
//! Everything here is a plain value. A [`GameState`] is never edited in
//! place by the engine; each transition consumes or clones the current
//! snapshot and returns its replacement.

/// Entity records: places, characters, clues, and the player.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Game phases, transitions, and the lenient phase-name normalizer.
pub mod phase;
/// The world snapshot and its lookup and update helpers.
pub mod state;
/// In-game clock values.
pub mod time;
/// Scripted timeline events and window queries.
pub mod timeline;
/// Flag tables and unlock condition evaluation.
pub mod unlock;

/// Re-export entity types.
pub use entity::{Character, Clue, EntityId, Place, Player};
/// Re-export error types.
pub use error::{GsError, GsResult};
/// Re-export phase type.
pub use phase::GamePhase;
/// Re-export the world snapshot.
pub use state::GameState;
/// Re-export time type.
pub use time::GameTime;
/// Re-export timeline types.
pub use timeline::{EventType, Timeline, TimelineEvent};
/// Re-export unlock types.
pub use unlock::{Flags, UnlockConditions, Unlockable, is_unlocked};
