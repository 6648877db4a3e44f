use gs_core::{EntityId, GamePhase, GameState, TimelineEvent, Unlockable};

use crate::action::{Action, ActionKind};
use crate::config::EngineConfig;
use crate::error::{ActionError, ActionResult};
use crate::events::advance;
use crate::fallback;
use crate::verdict::{Verdict, evaluate};

/// The result of a successfully resolved action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The replacement snapshot.
    pub state: GameState,
    /// Which action produced it.
    pub action: ActionKind,
    /// Minutes the action cost (before any deadline cap).
    pub minutes: u32,
    /// Timeline events that fired while the clock moved.
    pub fired: Vec<TimelineEvent>,
    /// Where the game stands afterwards.
    pub verdict: Verdict,
    /// In-character reply, for questions.
    pub reply: Option<String>,
}

/// Steps between two places: 1 if `to` is in `from`'s connection list, else 2.
pub fn move_distance(state: &GameState, from: &EntityId, to: &EntityId) -> u32 {
    match state.place(from) {
        Some(origin) if origin.is_connected_to(to) => 1,
        _ => 2,
    }
}

/// Validates and executes player actions against a snapshot.
///
/// The resolver holds only configuration; it never keeps a snapshot.
#[derive(Debug, Clone, Default)]
pub struct ActionResolver {
    config: EngineConfig,
}

impl ActionResolver {
    /// Create a resolver with the given costs.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The resolver's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check an action's preconditions and return its time cost.
    pub fn validate(&self, state: &GameState, action: &Action) -> ActionResult<u32> {
        if state.phase.is_terminal() {
            return Err(ActionError::GameFinished(state.phase));
        }
        match action {
            Action::Investigate { place_id } => {
                self.unlocked_place(state, place_id)?;
                Ok(self.config.investigate_minutes)
            }
            Action::Question { character_id, .. } => {
                let character = state
                    .character(character_id)
                    .ok_or_else(|| ActionError::UnknownCharacter(character_id.clone()))?;
                if !character.is_unlocked(&state.flags) {
                    return Err(ActionError::CharacterLocked(character_id.clone()));
                }
                if character.current_location != state.player.current_location {
                    return Err(ActionError::NotHere {
                        character: character_id.clone(),
                        location: character.current_location.clone(),
                    });
                }
                Ok(self.config.question_minutes)
            }
            Action::Move { place_id } => {
                self.unlocked_place(state, place_id)?;
                let here = &state.player.current_location;
                if here == place_id {
                    return Err(ActionError::AlreadyThere(place_id.clone()));
                }
                Ok(self
                    .config
                    .move_minutes(move_distance(state, here, place_id)))
            }
            Action::Accuse { character_id, .. } => {
                if state.character(character_id).is_none() {
                    return Err(ActionError::UnknownCharacter(character_id.clone()));
                }
                Ok(self.config.accuse_minutes)
            }
        }
    }

    fn unlocked_place(&self, state: &GameState, id: &EntityId) -> ActionResult<()> {
        let place = state
            .place(id)
            .ok_or_else(|| ActionError::UnknownPlace(id.clone()))?;
        if !place.is_unlocked(&state.flags) {
            return Err(ActionError::PlaceLocked(id.clone()));
        }
        Ok(())
    }

    /// Resolve an action locally.
    ///
    /// On failure the caller's snapshot is untouched; on success the returned
    /// resolution carries its replacement.
    pub fn resolve(&self, state: &GameState, action: &Action) -> ActionResult<Resolution> {
        let minutes = self.validate(state, action)?;
        let base = state.clone();

        let (base, reply) = match action {
            Action::Investigate { .. } => (base, None),
            Action::Question { character_id, .. } => {
                let reply = base
                    .character(character_id)
                    .map(|c| fallback::reply(self.config.seed, c, base.current_time));
                (base, reply)
            }
            Action::Move { place_id } => {
                let player = base.player.clone().with_location(place_id.clone());
                (base.with_player(player), None)
            }
            Action::Accuse {
                character_id,
                evidence,
            } => {
                let guilty = base
                    .character(character_id)
                    .is_some_and(|c| c.is_criminal);
                tracing::info!(
                    accused = %character_id,
                    evidence = evidence.len(),
                    guilty,
                    "accusation made"
                );
                let phase = if guilty {
                    GamePhase::Win
                } else {
                    GamePhase::Lose
                };
                (base.with_phase(phase), None)
            }
        };

        let mut resolution = self.commit(base, action.kind(), minutes);
        if let Action::Accuse { .. } = action {
            resolution.verdict = if resolution.state.phase == GamePhase::Win {
                Verdict::Solved
            } else {
                Verdict::WrongAccusation
            };
        }
        resolution.reply = reply;
        Ok(resolution)
    }

    /// Charge `minutes` against an already-updated snapshot.
    ///
    /// Advances the clock, applies crossed timeline events, and runs the
    /// deadline check. Used both for local resolution and to finish a
    /// generator-proposed question transition.
    pub fn commit(&self, base: GameState, action: ActionKind, minutes: u32) -> Resolution {
        let advanced = advance(base, minutes);
        let (state, verdict) = evaluate(advanced.state);
        tracing::debug!(
            action = %action,
            minutes,
            time = %state.current_time,
            phase = %state.phase,
            "action resolved"
        );
        Resolution {
            state,
            action,
            minutes,
            fired: advanced.fired,
            verdict,
            reply: None,
        }
    }
}
