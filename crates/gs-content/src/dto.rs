//! Wire-format DTOs for generated content.
//!
//! One set of DTOs reads both shapes the generator emits: the bootstrap
//! scenario schema (`initialLocation`, `connections`, flag lists) and a
//! re-serialized snapshot (`currentLocation`, `connectedPlaces`, flag maps).
//! Enumerations arrive as strings and are interpreted during validation.

use std::collections::BTreeMap;

use gs_core::{EntityId, GameTime};
use serde::Deserialize;

/// A whole scenario or proposed next snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDto {
    /// Case title.
    #[serde(default)]
    pub title: String,
    /// Case synopsis.
    #[serde(default)]
    pub description: String,
    /// Raw phase name, normalized before validation.
    #[serde(default)]
    pub phase: String,
    /// Present in snapshots; bootstrap starts at `timeline.startTime`.
    #[serde(default)]
    pub current_time: Option<GameTime>,
    /// The detective.
    pub player: PlayerDto,
    /// Everyone in the scenario.
    #[serde(default)]
    pub characters: Vec<CharacterDto>,
    /// Every location.
    #[serde(default)]
    pub places: Vec<PlaceDto>,
    /// Every clue.
    #[serde(default)]
    pub clues: Vec<ClueDto>,
    /// Time bounds and scripted events.
    pub timeline: TimelineDto,
    /// Initial flags.
    #[serde(default)]
    pub flags: FlagsDto,
}

/// The detective.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Starting place.
    pub current_location: EntityId,
    /// Tools carried.
    #[serde(default)]
    pub tools: Vec<String>,
    /// Clues already collected.
    #[serde(default)]
    pub collected_clues: Vec<EntityId>,
}

/// A character.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDto {
    /// Unique ID.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Personality traits.
    #[serde(default)]
    pub traits: Vec<String>,
    /// Where the character is.
    #[serde(alias = "currentLocation")]
    pub initial_location: EntityId,
    /// Whether this is the culprit.
    #[serde(default)]
    pub is_criminal: bool,
    /// Whether this is the victim.
    #[serde(default)]
    pub is_victim: bool,
    /// Clues the character knows.
    #[serde(default)]
    pub known_clues: Vec<EntityId>,
    /// Free-text mood.
    #[serde(default)]
    pub mental_state: String,
    /// Gating flags.
    #[serde(default)]
    pub unlock_conditions: Vec<String>,
    /// Whether the character is hidden.
    #[serde(default)]
    pub hidden: bool,
}

/// A place.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDto {
    /// Unique ID.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Prose description.
    #[serde(default)]
    pub description: String,
    /// Clues found here.
    #[serde(default)]
    pub available_clues: Vec<EntityId>,
    /// Gating flags.
    #[serde(default)]
    pub unlock_conditions: Vec<String>,
    /// Adjacent places.
    #[serde(default, alias = "connectedPlaces")]
    pub connections: Vec<EntityId>,
    /// Whether the place is hidden.
    #[serde(default)]
    pub hidden: bool,
}

/// A clue.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClueDto {
    /// Unique ID.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Prose description.
    #[serde(default)]
    pub description: String,
    /// A place ID or character ID.
    pub location: EntityId,
    /// Gating flags.
    #[serde(default)]
    pub unlock_conditions: Vec<String>,
}

/// Time bounds and events.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDto {
    /// Earliest point.
    pub base_time: GameTime,
    /// Play begins.
    pub start_time: GameTime,
    /// Deadline.
    pub end_time: GameTime,
    /// Scripted events.
    #[serde(default)]
    pub events: Vec<EventDto>,
}

/// A scripted event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    /// Unique ID.
    pub id: String,
    /// When it fires.
    pub time: GameTime,
    /// Raw event type name.
    pub event_type: String,
    /// Prose description.
    #[serde(default)]
    pub description: String,
    /// Character involved.
    #[serde(default)]
    pub character_id: Option<EntityId>,
    /// Place involved.
    #[serde(default)]
    pub place_id: Option<EntityId>,
}

/// Flags as either `[{ "id": .., "value": .. }]` or `{ "name": bool }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlagsDto {
    /// The bootstrap list form.
    List(Vec<FlagDto>),
    /// The snapshot map form.
    Map(BTreeMap<String, bool>),
}

impl Default for FlagsDto {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// One entry of the list form.
#[derive(Debug, Clone, Deserialize)]
pub struct FlagDto {
    /// Flag name.
    pub id: String,
    /// Flag value.
    pub value: bool,
}

/// The question round-trip envelope: a reply plus the proposed snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionEnvelope {
    /// In-character reply.
    #[serde(default)]
    pub reply: Option<String>,
    /// The proposed next snapshot.
    #[serde(alias = "nextState")]
    pub state: ScenarioDto,
}
