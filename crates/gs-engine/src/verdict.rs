use gs_core::{GamePhase, GameState};

/// How a resolved action left the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Play continues.
    Ongoing,
    /// The culprit was accused.
    Solved,
    /// An innocent was accused.
    WrongAccusation,
    /// The deadline passed.
    OutOfTime,
    /// The game had already ended before this evaluation.
    AlreadyOver,
}

impl Verdict {
    /// True if the game is over.
    pub fn is_final(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// True if the clock has reached the deadline.
pub fn is_out_of_time(state: &GameState) -> bool {
    state.current_time >= state.timeline.end_time
}

/// Move a live game to LOSE once the deadline is reached.
///
/// Terminal phases are left alone, so a WIN is never overridden.
pub fn evaluate(state: GameState) -> (GameState, Verdict) {
    if state.phase.is_terminal() {
        return (state, Verdict::AlreadyOver);
    }
    if is_out_of_time(&state) {
        tracing::info!(time = %state.current_time, "deadline reached");
        return (state.with_phase(GamePhase::Lose), Verdict::OutOfTime);
    }
    (state, Verdict::Ongoing)
}
