//! A session on its own task, driven through a command channel.
//!
//! The channel is the serialization point: commands are handled strictly in
//! arrival order, and the next one is not read until the previous action
//! (including any generator round-trip) has committed or failed.

use gs_core::{GamePhase, GameState};
use gs_engine::Action;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::{PlayError, PlayResult};
use crate::session::{GameSession, Outcome};

const COMMAND_BUFFER: usize = 8;

enum Command {
    Act {
        action: Action,
        reply: oneshot::Sender<PlayResult<Outcome>>,
    },
    AdvancePhase {
        next: GamePhase,
        reply: oneshot::Sender<PlayResult<GameState>>,
    },
    Snapshot {
        reply: oneshot::Sender<GameState>,
    },
}

/// Cloneable client for a spawned session.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> PlayResult<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| PlayError::CommandChannelClosed)?;
        reply_rx.await.map_err(PlayError::ReplyChannelClosed)
    }

    /// Submit an action and wait for it to commit or fail.
    pub async fn act(&self, action: Action) -> PlayResult<Outcome> {
        self.request(|reply| Command::Act { action, reply }).await?
    }

    /// Request an explicit phase change.
    pub async fn advance_phase(&self, next: GamePhase) -> PlayResult<GameState> {
        self.request(|reply| Command::AdvancePhase { next, reply })
            .await?
    }

    /// A copy of the current snapshot.
    pub async fn snapshot(&self) -> PlayResult<GameState> {
        self.request(|reply| Command::Snapshot { reply }).await
    }
}

/// Move `session` onto a task and return a handle to it.
///
/// The task ends once every handle is dropped, handing the session back.
pub fn spawn(session: GameSession) -> (SessionHandle, JoinHandle<GameSession>) {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let task = tokio::spawn(run(session, command_rx));
    (SessionHandle { command_tx }, task)
}

async fn run(mut session: GameSession, mut command_rx: mpsc::Receiver<Command>) -> GameSession {
    while let Some(command) = command_rx.recv().await {
        match command {
            Command::Act { action, reply } => {
                let result = session.act(action).await;
                let _ = reply.send(result);
            }
            Command::AdvancePhase { next, reply } => {
                let result = session.advance_phase(next).cloned();
                let _ = reply.send(result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(session.state().clone());
            }
        }
    }
    tracing::debug!("session task stopped");
    session
}
