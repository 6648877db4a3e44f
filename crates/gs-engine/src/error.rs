//! Error types for the rules engine.

use gs_core::{EntityId, GamePhase};
use thiserror::Error;

/// Result type for action resolution.
pub type ActionResult<T> = Result<T, ActionError>;

/// Reasons an action was refused. The snapshot is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No place has this ID.
    #[error("no such place: {0}")]
    UnknownPlace(EntityId),

    /// The place exists but its unlock conditions are not met.
    #[error("{0} is locked")]
    PlaceLocked(EntityId),

    /// No character has this ID.
    #[error("no such character: {0}")]
    UnknownCharacter(EntityId),

    /// The character exists but their unlock conditions are not met.
    #[error("{0} is not available yet")]
    CharacterLocked(EntityId),

    /// The character is somewhere else.
    #[error("{character} is not here (they are at {location})")]
    NotHere {
        /// The character the player tried to question.
        character: EntityId,
        /// Where that character actually is.
        location: EntityId,
    },

    /// Move destination equals the current location.
    #[error("you are already at {0}")]
    AlreadyThere(EntityId),

    /// The game has reached a terminal phase.
    #[error("the game is over ({0})")]
    GameFinished(GamePhase),
}
