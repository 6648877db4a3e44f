use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GsError, GsResult};

/// The coarse stage of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// Scenario loaded, nothing shown yet.
    Start,
    /// Controls are being explained.
    Tutorial,
    /// The case is being introduced.
    Introduction,
    /// Free play: actions are resolved.
    Investigation,
    /// The session ended without a verdict.
    GameOver,
    /// The culprit was accused.
    Win,
    /// Wrong accusation or time ran out.
    Lose,
}

impl GamePhase {
    /// Phases a freshly generated scenario may start in.
    pub const INITIAL: [GamePhase; 3] = [Self::Start, Self::Tutorial, Self::Introduction];

    /// True for WIN and LOSE.
    pub fn is_verdict(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }

    /// True once no further gameplay is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Lose | Self::GameOver)
    }

    /// True for phases a bootstrap payload may declare.
    pub fn is_initial(self) -> bool {
        Self::INITIAL.contains(&self)
    }

    fn rank(self) -> u8 {
        match self {
            Self::Start => 0,
            Self::Tutorial => 1,
            Self::Introduction => 2,
            Self::Investigation => 3,
            Self::GameOver | Self::Win | Self::Lose => 4,
        }
    }

    /// Validate an explicit phase change.
    ///
    /// Transitions only move forward. Re-entering the current phase, moving
    /// backward, or leaving a terminal phase are all errors.
    pub fn transition_to(self, next: GamePhase) -> GsResult<GamePhase> {
        if self.is_terminal() || next.rank() <= self.rank() {
            return Err(GsError::InvalidTransition {
                from: self,
                to: next,
            });
        }
        Ok(next)
    }

    /// Map a loosely spelled phase name onto a phase.
    ///
    /// Matching ignores case, surrounding whitespace, and the choice of
    /// space, dash, or underscore as separator.
    pub fn normalize(raw: &str) -> Option<GamePhase> {
        let key: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let phase = match key.as_str() {
            "start" | "started" | "begin" | "new" | "init" => Self::Start,
            "tutorial" => Self::Tutorial,
            "introduction" | "intro" => Self::Introduction,
            "investigation" | "investigating" | "investigate" | "playing" | "inprogress" => {
                Self::Investigation
            }
            "gameover" | "over" | "ended" | "end" | "finished" => Self::GameOver,
            "win" | "won" | "victory" | "success" | "solved" => Self::Win,
            "lose" | "lost" | "loss" | "fail" | "failed" | "failure" | "defeat" => Self::Lose,
            _ => return None,
        };
        Some(phase)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "START",
            Self::Tutorial => "TUTORIAL",
            Self::Introduction => "INTRODUCTION",
            Self::Investigation => "INVESTIGATION",
            Self::GameOver => "GAME_OVER",
            Self::Win => "WIN",
            Self::Lose => "LOSE",
        };
        f.write_str(s)
    }
}
