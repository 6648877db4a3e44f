use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::unlock::{UnlockConditions, Unlockable};

/// Identifier of a place, character, or clue, as assigned by the scenario author.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A location the player can visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Unique place ID.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Prose description.
    pub description: String,
    /// Clues that can be found here.
    #[serde(default)]
    pub available_clues: Vec<EntityId>,
    /// Places one step away.
    #[serde(default)]
    pub connected_places: Vec<EntityId>,
    /// Flags required before the place can be entered or searched.
    #[serde(default)]
    pub unlock_conditions: UnlockConditions,
    /// Hidden places are not listed to the player.
    #[serde(default)]
    pub hidden: bool,
}

impl Place {
    /// Create a visible, unconditioned place with no clues or connections.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            available_clues: Vec::new(),
            connected_places: Vec::new(),
            unlock_conditions: UnlockConditions::none(),
            hidden: false,
        }
    }

    /// True if `other` appears in this place's connection list.
    pub fn is_connected_to(&self, other: &EntityId) -> bool {
        self.connected_places.contains(other)
    }

    /// Add a connection (one direction only).
    pub fn with_connection(mut self, other: impl Into<EntityId>) -> Self {
        self.connected_places.push(other.into());
        self
    }

    /// Add a clue to the place.
    pub fn with_clue(mut self, clue: impl Into<EntityId>) -> Self {
        self.available_clues.push(clue.into());
        self
    }

    /// Replace the unlock conditions.
    pub fn with_conditions(mut self, conditions: UnlockConditions) -> Self {
        self.unlock_conditions = conditions;
        self
    }
}

impl Unlockable for Place {
    fn unlock_conditions(&self) -> &UnlockConditions {
        &self.unlock_conditions
    }
}

/// A person in the scenario, including the victim and the culprit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Unique character ID.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Personality traits passed to the generator.
    #[serde(default)]
    pub traits: Vec<String>,
    /// Whether this character committed the crime.
    #[serde(default)]
    pub is_criminal: bool,
    /// Whether this character is the victim.
    #[serde(default)]
    pub is_victim: bool,
    /// Clues this character knows about.
    #[serde(default)]
    pub known_clues: Vec<EntityId>,
    /// Free-text mood, updated by generated dialogue.
    #[serde(default)]
    pub mental_state: String,
    /// The place the character is at.
    pub current_location: EntityId,
    /// Flags required before the character can be questioned.
    #[serde(default)]
    pub unlock_conditions: UnlockConditions,
    /// Hidden characters are not listed to the player.
    #[serde(default)]
    pub hidden: bool,
}

impl Character {
    /// Create an innocent, unconditioned character at `location`.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        location: impl Into<EntityId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            traits: Vec::new(),
            is_criminal: false,
            is_victim: false,
            known_clues: Vec::new(),
            mental_state: String::new(),
            current_location: location.into(),
            unlock_conditions: UnlockConditions::none(),
            hidden: false,
        }
    }

    /// Mark the character as the culprit.
    pub fn criminal(mut self) -> Self {
        self.is_criminal = true;
        self
    }

    /// Mark the character as the victim.
    pub fn victim(mut self) -> Self {
        self.is_victim = true;
        self
    }

    /// Return the character relocated to `location`.
    pub fn with_location(mut self, location: impl Into<EntityId>) -> Self {
        self.current_location = location.into();
        self
    }

    /// Replace the unlock conditions.
    pub fn with_conditions(mut self, conditions: UnlockConditions) -> Self {
        self.unlock_conditions = conditions;
        self
    }
}

impl Unlockable for Character {
    fn unlock_conditions(&self) -> &UnlockConditions {
        &self.unlock_conditions
    }
}

/// A piece of evidence, held at a place or by a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clue {
    /// Unique clue ID.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Prose description.
    pub description: String,
    /// A place ID or a character ID.
    pub location: EntityId,
    /// Flags required before the clue is revealed.
    #[serde(default)]
    pub unlock_conditions: UnlockConditions,
}

impl Clue {
    /// Create an unconditioned clue at `location`.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        location: impl Into<EntityId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            location: location.into(),
            unlock_conditions: UnlockConditions::none(),
        }
    }

    /// Replace the unlock conditions.
    pub fn with_conditions(mut self, conditions: UnlockConditions) -> Self {
        self.unlock_conditions = conditions;
        self
    }
}

impl Unlockable for Clue {
    fn unlock_conditions(&self) -> &UnlockConditions {
        &self.unlock_conditions
    }
}

/// The detective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The place the player is at.
    pub current_location: EntityId,
    /// Clues the player has collected.
    #[serde(default)]
    pub collected_clues: BTreeSet<EntityId>,
    /// Tools the player carries.
    #[serde(default)]
    pub tools: BTreeSet<String>,
}

impl Player {
    /// Create a player with no clues or tools.
    pub fn new(name: impl Into<String>, location: impl Into<EntityId>) -> Self {
        Self {
            name: name.into(),
            current_location: location.into(),
            collected_clues: BTreeSet::new(),
            tools: BTreeSet::new(),
        }
    }

    /// Return the player relocated to `location`.
    pub fn with_location(mut self, location: impl Into<EntityId>) -> Self {
        self.current_location = location.into();
        self
    }

    /// Return the player holding `clue`.
    pub fn with_clue(mut self, clue: impl Into<EntityId>) -> Self {
        self.collected_clues.insert(clue.into());
        self
    }

    /// Check if the player has collected a clue.
    pub fn has_clue(&self, clue: &EntityId) -> bool {
        self.collected_clues.contains(clue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unlock::Flags;

    #[test]
    fn place_connections_are_directional() {
        let hall = Place::new("hall", "Great Hall").with_connection("library");
        assert!(hall.is_connected_to(&"library".into()));
        assert!(!hall.is_connected_to(&"cellar".into()));
    }

    #[test]
    fn unlockable_shared_across_entities() {
        let flags = Flags::new().with("key_found", true);
        let cond: UnlockConditions = ["key_found"].into_iter().collect();
        let locked: UnlockConditions = ["never"].into_iter().collect();

        assert!(Place::new("p", "P").with_conditions(cond.clone()).is_unlocked(&flags));
        assert!(
            Character::new("c", "C", "p")
                .with_conditions(cond.clone())
                .is_unlocked(&flags)
        );
        assert!(!Clue::new("k", "K", "p").with_conditions(locked).is_unlocked(&flags));
    }

    #[test]
    fn character_camel_case_fields() {
        let c = Character::new("butler", "Mr. Hobbs", "kitchen").criminal();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["isCriminal"], true);
        assert_eq!(json["currentLocation"], "kitchen");
    }

    #[test]
    fn player_collects_each_clue_once() {
        let p = Player::new("Detective", "hall")
            .with_clue("letter")
            .with_clue("letter");
        assert_eq!(p.collected_clues.len(), 1);
        assert!(p.has_clue(&"letter".into()));
    }
}
