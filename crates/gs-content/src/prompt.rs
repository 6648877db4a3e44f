use gs_core::{Character, GameState};
use serde_json::json;

use crate::generator::GenerationRequest;

/// System prompt for generating a new scenario.
pub const BOOTSTRAP_SYSTEM: &str = "You write murder-mystery scenarios for a detective game. \
Answer with a single JSON object and nothing else. It must contain: title, description, \
phase (\"START\"), player {name, currentLocation}, characters [{id, name, traits, \
initialLocation, isCriminal, isVictim, knownClues, mentalState, unlockConditions}], \
places [{id, name, description, availableClues, connections, unlockConditions}], \
clues [{id, name, description, location, unlockConditions}], \
timeline {baseTime, startTime, endTime, events [{id, time, eventType, description, \
characterId, placeId}]} with times as {\"minutes\": N}, and flags [{id, value}]. \
Exactly one character has isCriminal true. The crime happens between baseTime and \
startTime. Every location must name an existing place.";

/// System prompt for a question round-trip.
pub const QUESTION_SYSTEM: &str = "You voice a character in a detective game. Stay in \
character and never reveal who the criminal is outright. Answer with a single JSON object \
{\"reply\": \"<what the character says>\", \"state\": <the full updated game state>}. \
Only change mentalState, knownClues, flags, and what the player has learned. Do not change \
the clock, the timeline, the phase, or who the criminal is.";

/// Build the request that asks for a fresh scenario on `theme`.
pub fn bootstrap_request(theme: &str, max_output: u32) -> GenerationRequest {
    GenerationRequest {
        system_prompt: BOOTSTRAP_SYSTEM.to_string(),
        user_payload: json!({ "action": "bootstrap", "theme": theme }).to_string(),
        max_output,
    }
}

/// Build the request that asks `character` a question in `state`.
pub fn question_request(
    state: &GameState,
    character: &Character,
    question: Option<&str>,
    max_output: u32,
) -> serde_json::Result<GenerationRequest> {
    let payload = json!({
        "action": "question",
        "characterId": character.id,
        "question": question.unwrap_or("What can you tell me?"),
        "state": serde_json::to_value(state)?,
    });
    Ok(GenerationRequest {
        system_prompt: QUESTION_SYSTEM.to_string(),
        user_payload: payload.to_string(),
        max_output,
    })
}
