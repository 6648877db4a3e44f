use crate::entity::EntityId;
use crate::phase::GamePhase;

/// Alias for `Result<T, GsError>`.
pub type GsResult<T> = Result<T, GsError>;

/// Errors that can occur when querying or transitioning a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GsError {
    /// The requested place ID does not exist in the snapshot.
    #[error("place not found: {0}")]
    PlaceNotFound(EntityId),

    /// The requested character ID does not exist in the snapshot.
    #[error("character not found: {0}")]
    CharacterNotFound(EntityId),

    /// The requested clue ID does not exist in the snapshot.
    #[error("clue not found: {0}")]
    ClueNotFound(EntityId),

    /// A phase change that is not strictly forward from a live phase.
    #[error("invalid phase transition: {from} -> {to}")]
    InvalidTransition {
        /// The phase the snapshot is in.
        from: GamePhase,
        /// The phase that was requested.
        to: GamePhase,
    },
}
