//! Error types for content generation and validation.

use std::fmt;
use std::time::Duration;

use gs_core::EntityId;
use thiserror::Error;

/// Transport-level failures talking to a content generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// The request could not be sent or the connection failed.
    #[error("generator request failed: {0}")]
    RequestFailed(String),

    /// The generator answered with a non-success status.
    #[error("generator returned status {0}")]
    Status(u16),

    /// No answer arrived in time.
    #[error("generator timed out after {0:?}")]
    Timeout(Duration),

    /// No generator is configured.
    #[error("no content generator available")]
    Unavailable,
}

/// One reason generated content was rejected.
///
/// Each variant names the offending entity and field where there is one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The generator returned nothing usable.
    #[error("empty response")]
    EmptyResponse,

    /// The text is not well-formed JSON of the expected shape.
    #[error("malformed JSON at line {line}, column {column}: {message}")]
    MalformedJson {
        /// Parser message.
        message: String,
        /// 1-based line of the failure.
        line: usize,
        /// 1-based column of the failure.
        column: usize,
    },

    /// The scenario has no characters.
    #[error("scenario has no characters")]
    NoCharacters,

    /// The scenario has no places.
    #[error("scenario has no places")]
    NoPlaces,

    /// A location field names a place that does not exist.
    #[error("{entity}.{field} refers to unknown place \"{location}\"")]
    UnknownLocation {
        /// The character ID, or `player`.
        entity: EntityId,
        /// The offending field.
        field: &'static str,
        /// The value found.
        location: EntityId,
    },

    /// A clue's location is neither a place nor a character.
    #[error("clue {clue}.location refers to unknown place or character \"{location}\"")]
    UnknownClueLocation {
        /// The clue ID.
        clue: EntityId,
        /// The value found.
        location: EntityId,
    },

    /// The phase is unknown or not allowed here.
    #[error("phase: expected one of {expected}, found \"{actual}\"")]
    InvalidPhase {
        /// What would have been accepted.
        expected: PhaseSet,
        /// The raw or normalized value found.
        actual: String,
    },

    /// Zero or several characters are marked as the culprit.
    #[error("expected exactly one criminal, found {count}")]
    CriminalCount {
        /// How many characters have `isCriminal = true`.
        count: usize,
    },

    /// `startTime` is not before `endTime`.
    #[error("timeline.startTime ({start}) must be before timeline.endTime ({end})")]
    InvertedTimeline {
        /// Start minutes.
        start: i64,
        /// End minutes.
        end: i64,
    },

    /// `baseTime` is not before `startTime`.
    #[error("timeline.baseTime ({base}) must be before timeline.startTime ({start})")]
    BaseAfterStart {
        /// Base minutes.
        base: i64,
        /// Start minutes.
        start: i64,
    },

    /// A fresh scenario's clock lies outside `[startTime, endTime]`.
    #[error("currentTime ({time}) is outside the play window {start}..={end}")]
    ClockOutOfWindow {
        /// The clock's minutes.
        time: i64,
        /// Start minutes.
        start: i64,
        /// End minutes.
        end: i64,
    },

    /// A place connection names a place that does not exist.
    #[error("place {place}.connections refers to unknown place \"{target}\"")]
    UnknownConnection {
        /// The place ID.
        place: EntityId,
        /// The missing target.
        target: EntityId,
    },

    /// Two entities of the same kind share an ID.
    #[error("duplicate {kind} id \"{id}\"")]
    DuplicateId {
        /// `place`, `character`, or `clue`.
        kind: &'static str,
        /// The repeated ID.
        id: EntityId,
    },

    /// A timeline event has an unrecognised type.
    #[error("event {event}.eventType: unknown type \"{actual}\"")]
    UnknownEventType {
        /// The event ID.
        event: String,
        /// The value found.
        actual: String,
    },

    /// A timeline event lies outside the window its type allows.
    #[error("event {event} at {time} is outside its allowed window")]
    EventOutOfWindow {
        /// The event ID.
        event: String,
        /// The event's minutes.
        time: i64,
    },

    /// A timeline event names a character or place that does not exist.
    #[error("event {event}.{field} refers to unknown id \"{target}\"")]
    UnknownEventReference {
        /// The event ID.
        event: String,
        /// `characterId` or `placeId`.
        field: &'static str,
        /// The missing ID.
        target: EntityId,
    },

    /// A transition tried to change who committed the crime.
    #[error("transition changed the criminal from {expected} to {actual}")]
    CriminalChanged {
        /// The culprit in the current snapshot.
        expected: EntityId,
        /// The culprit in the proposal.
        actual: String,
    },
}

/// Which phases a check accepts, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseSet {
    /// START, TUTORIAL, or INTRODUCTION.
    Initial,
    /// Any phase name the normalizer recognises.
    Any,
}

impl fmt::Display for PhaseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => f.write_str("START, TUTORIAL, INTRODUCTION"),
            Self::Any => f.write_str("a known phase"),
        }
    }
}

impl ValidationError {
    /// True for errors about the raw text rather than its content.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::EmptyResponse | Self::MalformedJson { .. })
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedJson {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Why a scenario could not be bootstrapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    /// The generator could not be reached.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// The payload failed validation; every problem found is listed.
    #[error("scenario rejected with {} issue(s): {}", .0.len(), first_issue(.0))]
    Invalid(Vec<ValidationError>),
}

fn first_issue(issues: &[ValidationError]) -> String {
    issues
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

impl BootstrapError {
    /// Validation issues, if that is why bootstrap failed.
    pub fn issues(&self) -> &[ValidationError] {
        match self {
            Self::Invalid(issues) => issues,
            Self::Generator(_) => &[],
        }
    }
}
