//! Error types for the session layer.

use gs_content::BootstrapError;
use gs_core::GsError;
use gs_engine::ActionError;
use thiserror::Error;
use tokio::sync::oneshot;

/// Result type for session operations.
pub type PlayResult<T> = Result<T, PlayError>;

/// Errors surfaced to the player or the embedding application.
#[derive(Debug, Error)]
pub enum PlayError {
    /// No scenario could be produced.
    #[error("could not start a game: {0}")]
    Bootstrap(#[from] BootstrapError),

    /// The action's preconditions failed; the snapshot is unchanged.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// A world-model lookup or phase change was rejected.
    #[error(transparent)]
    World(#[from] GsError),

    /// The session task is gone.
    #[error("session command channel closed")]
    CommandChannelClosed,

    /// The session task dropped the reply.
    #[error("session reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),
}
