//! The single-writer game session for Gumshoe.
//!
//! [`GameSession`] owns the one current [`gs_core::GameState`]. It runs the
//! bootstrap round-trip, routes questions through the content generator with
//! a timeout, falls back to local resolution when generation fails, and
//! notifies [`SnapshotObserver`]s after every committed snapshot.
//! [`spawn`] moves a session onto a task behind a channel so several callers
//! can share it without interleaving actions.

pub mod config;
pub mod error;
pub mod observer;
pub mod session;
pub mod worker;

pub use config::SessionConfig;
pub use error::{PlayError, PlayResult};
pub use observer::SnapshotObserver;
pub use session::{FallbackReason, GameSession, Outcome, Source, status_line};
pub use worker::{SessionHandle, spawn};
