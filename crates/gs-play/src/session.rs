//! The state holder: one current snapshot, one writer.

use std::sync::Arc;

use gs_content::prompt::{bootstrap_request, question_request};
use gs_content::{
    ContentGenerator, GeneratorError, Transition, ValidationError, generate_with_timeout,
    parse_transition,
};
use gs_core::{Character, EntityId, GamePhase, GameState};
use gs_engine::{Action, ActionKind, ActionResolver, Resolution, fallback};

use crate::config::SessionConfig;
use crate::error::PlayResult;
use crate::observer::SnapshotObserver;

/// Why a question was answered locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The generator failed or timed out.
    Generator(GeneratorError),
    /// The generator's proposal was rejected.
    Invalid(ValidationError),
}

/// Where an action's result came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Resolved by the rules engine alone.
    Local,
    /// A generator proposal was accepted.
    Generated,
    /// The generator was consulted but its answer could not be used.
    Fallback(FallbackReason),
}

/// A committed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The engine's resolution; its state is now current.
    pub resolution: Resolution,
    /// Where the result came from.
    pub source: Source,
}

/// Owns the current snapshot and applies actions to it one at a time.
///
/// Every mutating method takes `&mut self`, so two actions can never be in
/// flight against the same session. Callers that need shared access go
/// through [`crate::spawn`].
pub struct GameSession {
    state: GameState,
    resolver: ActionResolver,
    generator: Arc<dyn ContentGenerator>,
    config: SessionConfig,
    observers: Vec<Box<dyn SnapshotObserver>>,
}

impl GameSession {
    /// Wrap an existing snapshot.
    pub fn new(
        state: GameState,
        generator: Arc<dyn ContentGenerator>,
        config: SessionConfig,
    ) -> Self {
        Self {
            state,
            resolver: ActionResolver::new(config.engine.clone()),
            generator,
            config,
            observers: Vec::new(),
        }
    }

    /// Ask the generator for a scenario on `theme` and start a session on it.
    ///
    /// Generator failures are fatal here since there is nothing to fall back to.
    pub async fn bootstrap(
        generator: Arc<dyn ContentGenerator>,
        config: SessionConfig,
        theme: &str,
    ) -> PlayResult<Self> {
        let request = bootstrap_request(theme, config.max_output);
        let raw = generate_with_timeout(generator.as_ref(), request, config.generator_timeout)
            .await
            .map_err(gs_content::BootstrapError::from)?;
        let state = gs_content::bootstrap(&raw)?;
        Ok(Self::new(state, generator, config))
    }

    /// Start a session from scenario text already in hand.
    pub fn from_raw(
        raw: &str,
        generator: Arc<dyn ContentGenerator>,
        config: SessionConfig,
    ) -> PlayResult<Self> {
        let state = gs_content::bootstrap(raw)?;
        Ok(Self::new(state, generator, config))
    }

    /// The current snapshot.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Register an observer for future commits.
    pub fn subscribe(&mut self, observer: impl SnapshotObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Validate and apply one action.
    ///
    /// Precondition failures leave the snapshot untouched. A question first
    /// goes to the generator; any generator or validation failure falls back
    /// to local resolution, which still costs the same time.
    pub async fn act(&mut self, action: Action) -> PlayResult<Outcome> {
        let minutes = self.resolver.validate(&self.state, &action)?;

        let outcome = match &action {
            Action::Question {
                character_id,
                question,
            } if self.config.consult_generator => {
                let character = self.state.require_character(character_id)?;
                match self.consult(character, question.as_deref()).await {
                    Ok(transition) => Outcome {
                        resolution: self.commit_transition(transition, character_id, minutes),
                        source: Source::Generated,
                    },
                    Err(reason) => {
                        tracing::warn!(
                            character = %character_id,
                            ?reason,
                            "question falling back to local resolution"
                        );
                        Outcome {
                            resolution: self.resolver.resolve(&self.state, &action)?,
                            source: Source::Fallback(reason),
                        }
                    }
                }
            }
            _ => Outcome {
                resolution: self.resolver.resolve(&self.state, &action)?,
                source: Source::Local,
            },
        };

        self.replace(outcome.resolution.state.clone());
        Ok(outcome)
    }

    async fn consult(
        &self,
        character: &Character,
        question: Option<&str>,
    ) -> Result<Transition, FallbackReason> {
        let request = question_request(&self.state, character, question, self.config.max_output)
            .map_err(|e| FallbackReason::Generator(GeneratorError::RequestFailed(e.to_string())))?;
        let raw = generate_with_timeout(
            self.generator.as_ref(),
            request,
            self.config.generator_timeout,
        )
        .await
        .map_err(FallbackReason::Generator)?;
        parse_transition(&raw, &self.state).map_err(FallbackReason::Invalid)
    }

    fn commit_transition(
        &self,
        transition: Transition,
        character_id: &EntityId,
        minutes: u32,
    ) -> Resolution {
        let Transition { state, reply } = transition;
        let reply = reply.filter(|r| !r.trim().is_empty()).or_else(|| {
            state
                .character(character_id)
                .map(|c| fallback::reply(self.config.engine.seed, c, state.current_time))
        });
        let mut resolution = self.resolver.commit(state, ActionKind::Question, minutes);
        resolution.reply = reply;
        resolution
    }

    /// Make an explicit forward phase change, such as START to INVESTIGATION.
    pub fn advance_phase(&mut self, next: GamePhase) -> PlayResult<&GameState> {
        let from = self.state.phase;
        let state = self.state.clone().transition_phase(next)?;
        tracing::info!(%from, to = %next, "phase changed");
        self.replace(state);
        Ok(&self.state)
    }

    fn replace(&mut self, state: GameState) {
        self.state = state;
        for observer in &self.observers {
            observer.snapshot_committed(&self.state);
        }
    }

    /// One-line summary of the current snapshot.
    pub fn status_line(&self) -> String {
        status_line(&self.state)
    }
}

/// One-line summary: clock, location, phase, and time left.
pub fn status_line(state: &GameState) -> String {
    let place = state
        .player_place()
        .map(|p| p.name.as_str())
        .unwrap_or_else(|| state.player.current_location.as_str());
    let left = state
        .current_time
        .remaining_until(state.timeline.end_time)
        .max(0);
    format!(
        "{} | {} | {} | {}h{:02}m left",
        state.current_time,
        place,
        state.phase,
        left / 60,
        left % 60
    )
}
