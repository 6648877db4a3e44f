use std::fmt;

use gs_core::EntityId;
use serde::{Deserialize, Serialize};

/// One player input. The set is closed; the resolver matches it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Search a place.
    Investigate {
        /// Place to search.
        place_id: EntityId,
    },
    /// Talk to a character at the player's location.
    Question {
        /// Character to question.
        character_id: EntityId,
        /// What the player asks, if anything in particular.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question: Option<String>,
    },
    /// Walk to another place.
    Move {
        /// Destination.
        place_id: EntityId,
    },
    /// Name the culprit.
    Accuse {
        /// The accused.
        character_id: EntityId,
        /// Clues offered in support.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        evidence: Vec<EntityId>,
    },
}

/// The variant of an [`Action`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// [`Action::Investigate`].
    Investigate,
    /// [`Action::Question`].
    Question,
    /// [`Action::Move`].
    Move,
    /// [`Action::Accuse`].
    Accuse,
}

impl Action {
    /// Build an investigate action.
    pub fn investigate(place: impl Into<EntityId>) -> Self {
        Self::Investigate {
            place_id: place.into(),
        }
    }

    /// Build a question action.
    pub fn question(character: impl Into<EntityId>, question: Option<String>) -> Self {
        Self::Question {
            character_id: character.into(),
            question,
        }
    }

    /// Build a move action.
    pub fn move_to(place: impl Into<EntityId>) -> Self {
        Self::Move {
            place_id: place.into(),
        }
    }

    /// Build an accusation.
    pub fn accuse(character: impl Into<EntityId>, evidence: Vec<EntityId>) -> Self {
        Self::Accuse {
            character_id: character.into(),
            evidence,
        }
    }

    /// The action's variant.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Investigate { .. } => ActionKind::Investigate,
            Self::Question { .. } => ActionKind::Question,
            Self::Move { .. } => ActionKind::Move,
            Self::Accuse { .. } => ActionKind::Accuse,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Investigate => "investigate",
            Self::Question => "question",
            Self::Move => "move",
            Self::Accuse => "accuse",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_json_shape() {
        let json = serde_json::to_value(Action::question("maid", Some("Where were you?".into())))
            .unwrap();
        assert_eq!(json["type"], "question");
        assert_eq!(json["characterId"], "maid");
        assert_eq!(json["question"], "Where were you?");
    }

    #[test]
    fn accuse_parses_without_evidence() {
        let action: Action =
            serde_json::from_str(r#"{"type":"accuse","characterId":"butler"}"#).unwrap();
        assert_eq!(action, Action::accuse("butler", Vec::new()));
        assert_eq!(action.kind(), ActionKind::Accuse);
    }
}
