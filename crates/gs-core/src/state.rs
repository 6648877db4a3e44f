use serde::{Deserialize, Serialize};

use crate::entity::{Character, Clue, EntityId, Place, Player};
use crate::error::{GsError, GsResult};
use crate::phase::GamePhase;
use crate::time::GameTime;
use crate::timeline::Timeline;
use crate::unlock::{Flags, Unlockable};

/// One complete, immutable instance of the world.
///
/// Update helpers take `self` by value and hand back the replacement, so a
/// holder that wants to keep the old snapshot must clone it first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Case title.
    pub title: String,
    /// Case synopsis.
    pub description: String,
    /// The active phase.
    pub phase: GamePhase,
    /// The clock.
    pub current_time: GameTime,
    /// The detective.
    pub player: Player,
    /// Everyone in the scenario.
    pub characters: Vec<Character>,
    /// Every location.
    pub places: Vec<Place>,
    /// Every clue.
    pub clues: Vec<Clue>,
    /// Time bounds and scripted events.
    pub timeline: Timeline,
    /// World flags.
    #[serde(default)]
    pub flags: Flags,
}

/// What a clue's `location` resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClueHolder<'s> {
    /// The clue lies at a place.
    Place(&'s Place),
    /// A character holds the clue.
    Character(&'s Character),
}

impl GameState {
    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Find a place by ID.
    pub fn place(&self, id: &EntityId) -> Option<&Place> {
        self.places.iter().find(|p| &p.id == id)
    }

    /// Find a character by ID.
    pub fn character(&self, id: &EntityId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    /// Find a clue by ID.
    pub fn clue(&self, id: &EntityId) -> Option<&Clue> {
        self.clues.iter().find(|c| &c.id == id)
    }

    /// Find a place by ID or fail.
    pub fn require_place(&self, id: &EntityId) -> GsResult<&Place> {
        self.place(id).ok_or_else(|| GsError::PlaceNotFound(id.clone()))
    }

    /// Find a character by ID or fail.
    pub fn require_character(&self, id: &EntityId) -> GsResult<&Character> {
        self.character(id)
            .ok_or_else(|| GsError::CharacterNotFound(id.clone()))
    }

    /// Resolve what a clue's location points at.
    pub fn clue_holder(&self, clue: &Clue) -> Option<ClueHolder<'_>> {
        self.place(&clue.location)
            .map(ClueHolder::Place)
            .or_else(|| self.character(&clue.location).map(ClueHolder::Character))
    }

    /// The place the player is at.
    pub fn player_place(&self) -> Option<&Place> {
        self.place(&self.player.current_location)
    }

    /// The character flagged as the culprit, if exactly one is.
    pub fn criminal(&self) -> Option<&Character> {
        let mut culprits = self.characters.iter().filter(|c| c.is_criminal);
        match (culprits.next(), culprits.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// Characters at a place, in scenario order.
    pub fn characters_at(&self, place: &EntityId) -> Vec<&Character> {
        self.characters
            .iter()
            .filter(|c| &c.current_location == place)
            .collect()
    }

    /// Unlocked, visible characters sharing the player's location.
    pub fn visible_characters_here(&self) -> Vec<&Character> {
        self.characters_at(&self.player.current_location)
            .into_iter()
            .filter(|c| !c.hidden && c.is_unlocked(&self.flags))
            .collect()
    }

    /// Unlocked clues lying at a place or held by a character.
    pub fn unlocked_clues_at(&self, location: &EntityId) -> Vec<&Clue> {
        self.clues
            .iter()
            .filter(|c| &c.location == location && c.is_unlocked(&self.flags))
            .collect()
    }

    /// Unlocked, visible places directly connected to the player's location.
    pub fn reachable_places(&self) -> Vec<&Place> {
        let Some(here) = self.player_place() else {
            return Vec::new();
        };
        here.connected_places
            .iter()
            .filter_map(|id| self.place(id))
            .filter(|p| !p.hidden && p.is_unlocked(&self.flags))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Replacement helpers
    // -----------------------------------------------------------------------

    /// Return the snapshot with a new phase (no transition checks).
    pub fn with_phase(mut self, phase: GamePhase) -> Self {
        self.phase = phase;
        self
    }

    /// Return the snapshot with a new clock value.
    pub fn with_time(mut self, time: GameTime) -> Self {
        self.current_time = time;
        self
    }

    /// Return the snapshot with a new player record.
    pub fn with_player(mut self, player: Player) -> Self {
        self.player = player;
        self
    }

    /// Return the snapshot with a flag set.
    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.flags = self.flags.with(name, value);
        self
    }

    /// Return the snapshot with the character of the same ID replaced.
    pub fn with_character(mut self, character: Character) -> GsResult<Self> {
        let slot = self
            .characters
            .iter_mut()
            .find(|c| c.id == character.id)
            .ok_or_else(|| GsError::CharacterNotFound(character.id.clone()))?;
        *slot = character;
        Ok(self)
    }

    /// Return the snapshot with a character moved. Unknown IDs leave it unchanged.
    pub fn relocate_character(mut self, id: &EntityId, place: EntityId) -> Self {
        if let Some(c) = self.characters.iter_mut().find(|c| &c.id == id) {
            c.current_location = place;
        }
        self
    }

    /// Apply an explicit, validated phase transition.
    pub fn transition_phase(self, next: GamePhase) -> GsResult<Self> {
        let phase = self.phase.transition_to(next)?;
        Ok(self.with_phase(phase))
    }

    /// Serialize to the JSON shape the content generator echoes back.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Timeline;
    use crate::unlock::UnlockConditions;

    fn manor() -> GameState {
        GameState {
            title: "Death at Ashgrove".into(),
            description: String::new(),
            phase: GamePhase::Investigation,
            current_time: GameTime::new(120),
            player: Player::new("Inspector", "hall"),
            characters: vec![
                Character::new("butler", "Hobbs", "hall").criminal(),
                Character::new("maid", "Agnes", "kitchen"),
                Character::new("ghost", "Ghost", "hall")
                    .with_conditions(["seance"].into_iter().collect()),
            ],
            places: vec![
                Place::new("hall", "Hall").with_connection("kitchen").with_connection("attic"),
                Place::new("kitchen", "Kitchen").with_connection("hall"),
                Place::new("attic", "Attic")
                    .with_conditions(UnlockConditions(vec!["attic_key".into()])),
            ],
            clues: vec![
                Clue::new("knife", "Knife", "kitchen"),
                Clue::new("diary", "Diary", "maid"),
            ],
            timeline: Timeline::new(GameTime::new(0), GameTime::new(120), GameTime::new(480)),
            flags: Flags::new(),
        }
    }

    #[test]
    fn clue_holder_resolves_places_and_characters() {
        let state = manor();
        let knife = state.clue(&"knife".into()).unwrap();
        let diary = state.clue(&"diary".into()).unwrap();
        assert!(matches!(
            state.clue_holder(knife),
            Some(ClueHolder::Place(p)) if p.id.as_str() == "kitchen"
        ));
        assert!(matches!(
            state.clue_holder(diary),
            Some(ClueHolder::Character(c)) if c.id.as_str() == "maid"
        ));
    }

    #[test]
    fn visibility_respects_unlocks() {
        let state = manor();
        let here: Vec<_> = state
            .visible_characters_here()
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(here, ["butler"]);

        let reachable: Vec<_> = state
            .reachable_places()
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(reachable, ["kitchen"]);

        let state = state.with_flag("attic_key", true);
        assert_eq!(state.reachable_places().len(), 2);
    }

    #[test]
    fn criminal_requires_exactly_one() {
        let state = manor();
        assert_eq!(state.criminal().map(|c| c.id.as_str()), Some("butler"));

        let maid = state.character(&"maid".into()).unwrap().clone().criminal();
        let state = state.with_character(maid).unwrap();
        assert!(state.criminal().is_none());
    }

    #[test]
    fn with_character_rejects_unknown() {
        let err = manor()
            .with_character(Character::new("nobody", "Nobody", "hall"))
            .unwrap_err();
        assert_eq!(err, GsError::CharacterNotFound("nobody".into()));
    }

    #[test]
    fn replacement_leaves_original_untouched() {
        let before = manor();
        let after = before.clone().with_time(GameTime::new(200));
        assert_eq!(before.current_time, GameTime::new(120));
        assert_eq!(after.current_time, GameTime::new(200));
    }

    #[test]
    fn json_round_trip_preserves_snapshot() {
        let state = manor();
        let json = state.to_json().unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
