//! Subscribers to committed snapshots.

use gs_core::GameState;

/// Notified after every snapshot the session commits.
///
/// Observers see the new snapshot by reference and cannot change it.
pub trait SnapshotObserver: Send + Sync {
    /// Called once per committed snapshot.
    fn snapshot_committed(&self, state: &GameState);
}

impl<F> SnapshotObserver for F
where
    F: Fn(&GameState) + Send + Sync,
{
    fn snapshot_committed(&self, state: &GameState) {
        self(state)
    }
}
