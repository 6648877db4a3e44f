use std::collections::BTreeSet;

use gs_core::{
    Character, Clue, EntityId, EventType, Flags, GamePhase, GameState, GameTime, Place, Player,
    Timeline, TimelineEvent, UnlockConditions,
};

use crate::dto::{CharacterDto, ClueDto, FlagsDto, PlaceDto, ScenarioDto, TransitionEnvelope};
use crate::error::{BootstrapError, PhaseSet, ValidationError};

/// Which kind of payload is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A fresh scenario: the phase must be an initial one.
    Bootstrap,
    /// A proposed next snapshot: any known phase parses.
    Transition,
}

/// A validated question round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The proposal, with engine-owned fields restored from the current snapshot.
    pub state: GameState,
    /// The in-character reply, if the envelope carried one.
    pub reply: Option<String>,
}

/// Reduce generator output to its outermost JSON object.
///
/// Code fences and surrounding prose are dropped. What remains is parsed
/// strictly.
pub fn extract_json(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyResponse);
    }
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&trimmed[start..=end]),
        _ => Ok(trimmed),
    }
}

/// Parse raw text into a scenario DTO.
pub fn parse_scenario(raw: &str) -> Result<ScenarioDto, ValidationError> {
    let json = extract_json(raw)?;
    Ok(serde_json::from_str(json)?)
}

/// Parse raw text as either a transition envelope or a bare snapshot.
pub fn parse_envelope(raw: &str) -> Result<TransitionEnvelope, ValidationError> {
    let json = extract_json(raw)?;
    let value: serde_json::Value = serde_json::from_str(json)?;
    let wrapped = value
        .as_object()
        .is_some_and(|o| o.contains_key("state") || o.contains_key("nextState"));
    if wrapped {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(TransitionEnvelope {
            reply: None,
            state: serde_json::from_value(value)?,
        })
    }
}

/// Run every consistency check and return all failures in check order.
pub fn check(dto: &ScenarioDto, mode: Mode) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    if dto.characters.is_empty() {
        issues.push(ValidationError::NoCharacters);
    }
    if dto.places.is_empty() {
        issues.push(ValidationError::NoPlaces);
    }

    let places: BTreeSet<&EntityId> = dto.places.iter().map(|p| &p.id).collect();
    let characters: BTreeSet<&EntityId> = dto.characters.iter().map(|c| &c.id).collect();

    for c in &dto.characters {
        if !places.contains(&c.initial_location) {
            issues.push(ValidationError::UnknownLocation {
                entity: c.id.clone(),
                field: "initialLocation",
                location: c.initial_location.clone(),
            });
        }
    }
    if !places.contains(&dto.player.current_location) {
        issues.push(ValidationError::UnknownLocation {
            entity: EntityId::new("player"),
            field: "currentLocation",
            location: dto.player.current_location.clone(),
        });
    }

    for clue in &dto.clues {
        if !places.contains(&clue.location) && !characters.contains(&clue.location) {
            issues.push(ValidationError::UnknownClueLocation {
                clue: clue.id.clone(),
                location: clue.location.clone(),
            });
        }
    }

    if let Err(e) = phase_for(&dto.phase, mode) {
        issues.push(e);
    }

    let criminals = dto.characters.iter().filter(|c| c.is_criminal).count();
    if criminals != 1 {
        issues.push(ValidationError::CriminalCount { count: criminals });
    }

    let tl = &dto.timeline;
    if tl.start_time >= tl.end_time {
        issues.push(ValidationError::InvertedTimeline {
            start: tl.start_time.minutes,
            end: tl.end_time.minutes,
        });
    }
    if tl.base_time >= tl.start_time {
        issues.push(ValidationError::BaseAfterStart {
            base: tl.base_time.minutes,
            start: tl.start_time.minutes,
        });
    }

    let outside = |t: &GameTime| *t < tl.start_time || *t > tl.end_time;
    if let Some(time) = dto
        .current_time
        .filter(|t| mode == Mode::Bootstrap && outside(t))
    {
        issues.push(ValidationError::ClockOutOfWindow {
            time: time.minutes,
            start: tl.start_time.minutes,
            end: tl.end_time.minutes,
        });
    }

    duplicates(&mut issues, "place", dto.places.iter().map(|p| &p.id));
    duplicates(&mut issues, "character", dto.characters.iter().map(|c| &c.id));
    duplicates(&mut issues, "clue", dto.clues.iter().map(|c| &c.id));

    for place in &dto.places {
        for target in &place.connections {
            if !places.contains(target) {
                issues.push(ValidationError::UnknownConnection {
                    place: place.id.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    let window = Timeline::new(tl.base_time, tl.start_time, tl.end_time);
    for event in &tl.events {
        let Some(event_type) = EventType::normalize(&event.event_type) else {
            issues.push(ValidationError::UnknownEventType {
                event: event.id.clone(),
                actual: event.event_type.clone(),
            });
            continue;
        };
        if !window.in_window(&TimelineEvent::new(event.id.clone(), event.time, event_type)) {
            issues.push(ValidationError::EventOutOfWindow {
                event: event.id.clone(),
                time: event.time.minutes,
            });
        }
        if let Some(id) = event.character_id.as_ref().filter(|id| !characters.contains(id)) {
            issues.push(ValidationError::UnknownEventReference {
                event: event.id.clone(),
                field: "characterId",
                target: id.clone(),
            });
        }
        if let Some(id) = event.place_id.as_ref().filter(|id| !places.contains(id)) {
            issues.push(ValidationError::UnknownEventReference {
                event: event.id.clone(),
                field: "placeId",
                target: id.clone(),
            });
        }
    }

    issues
}

fn duplicates<'a>(
    issues: &mut Vec<ValidationError>,
    kind: &'static str,
    ids: impl Iterator<Item = &'a EntityId>,
) {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            issues.push(ValidationError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
}

fn phase_for(raw: &str, mode: Mode) -> Result<GamePhase, ValidationError> {
    let expected = match mode {
        Mode::Bootstrap => PhaseSet::Initial,
        Mode::Transition => PhaseSet::Any,
    };
    let phase = GamePhase::normalize(raw).ok_or_else(|| ValidationError::InvalidPhase {
        expected,
        actual: raw.to_string(),
    })?;
    if mode == Mode::Bootstrap && !phase.is_initial() {
        return Err(ValidationError::InvalidPhase {
            expected,
            actual: phase.to_string(),
        });
    }
    Ok(phase)
}

/// Map a checked DTO onto the world model.
fn into_state(dto: ScenarioDto, phase: GamePhase) -> Result<GameState, ValidationError> {
    let mut timeline = Timeline::new(
        dto.timeline.base_time,
        dto.timeline.start_time,
        dto.timeline.end_time,
    );
    for e in dto.timeline.events {
        let event_type =
            EventType::normalize(&e.event_type).ok_or_else(|| ValidationError::UnknownEventType {
                event: e.id.clone(),
                actual: e.event_type.clone(),
            })?;
        let mut event =
            TimelineEvent::new(e.id, e.time, event_type).with_description(e.description);
        event.character_id = e.character_id;
        event.place_id = e.place_id;
        timeline = timeline.with_event(event);
    }

    let current_time = dto.current_time.unwrap_or(timeline.start_time).aligned();
    let player = Player {
        name: dto.player.name,
        current_location: dto.player.current_location,
        collected_clues: dto.player.collected_clues.into_iter().collect(),
        tools: dto.player.tools.into_iter().collect(),
    };

    Ok(GameState {
        title: dto.title,
        description: dto.description,
        phase,
        current_time,
        player,
        characters: dto.characters.into_iter().map(character).collect(),
        places: dto.places.into_iter().map(place).collect(),
        clues: dto.clues.into_iter().map(clue).collect(),
        timeline,
        flags: flags(dto.flags),
    })
}

fn character(c: CharacterDto) -> Character {
    Character {
        id: c.id,
        name: c.name,
        traits: c.traits,
        is_criminal: c.is_criminal,
        is_victim: c.is_victim,
        known_clues: c.known_clues,
        mental_state: c.mental_state,
        current_location: c.initial_location,
        unlock_conditions: UnlockConditions(c.unlock_conditions),
        hidden: c.hidden,
    }
}

fn place(p: PlaceDto) -> Place {
    Place {
        id: p.id,
        name: p.name,
        description: p.description,
        available_clues: p.available_clues,
        connected_places: p.connections,
        unlock_conditions: UnlockConditions(p.unlock_conditions),
        hidden: p.hidden,
    }
}

fn clue(c: ClueDto) -> Clue {
    Clue {
        id: c.id,
        name: c.name,
        description: c.description,
        location: c.location,
        unlock_conditions: UnlockConditions(c.unlock_conditions),
    }
}

fn flags(dto: FlagsDto) -> Flags {
    match dto {
        FlagsDto::List(list) => list.into_iter().map(|f| (f.id, f.value)).collect(),
        FlagsDto::Map(map) => map.into_iter().collect(),
    }
}

/// Turn bootstrap output into the initial snapshot.
///
/// Unlike transitions, every consistency problem is reported at once.
pub fn bootstrap(raw: &str) -> Result<GameState, BootstrapError> {
    let dto = parse_scenario(raw).map_err(|e| {
        tracing::warn!(error = %e, "bootstrap payload unparseable");
        BootstrapError::Invalid(vec![e])
    })?;
    let issues = check(&dto, Mode::Bootstrap);
    if !issues.is_empty() {
        for issue in &issues {
            tracing::warn!(%issue, "bootstrap validation failed");
        }
        return Err(BootstrapError::Invalid(issues));
    }
    let phase =
        phase_for(&dto.phase, Mode::Bootstrap).map_err(|e| BootstrapError::Invalid(vec![e]))?;
    let state = into_state(dto, phase).map_err(|e| BootstrapError::Invalid(vec![e]))?;
    tracing::info!(
        title = %state.title,
        characters = state.characters.len(),
        places = state.places.len(),
        clues = state.clues.len(),
        events = state.timeline.len(),
        "scenario bootstrapped"
    );
    Ok(state)
}

/// Validate a proposed next snapshot against the current one.
///
/// Fails on the first problem. The criminal may not change; the clock,
/// timeline, and phase are taken from `current`, and every fired-event flag
/// is reset to its value in `current`, present or absent.
pub fn parse_transition(raw: &str, current: &GameState) -> Result<Transition, ValidationError> {
    let TransitionEnvelope { reply, state: dto } = parse_envelope(raw)?;
    if let Some(first) = check(&dto, Mode::Transition).into_iter().next() {
        tracing::warn!(issue = %first, "transition rejected");
        return Err(first);
    }

    let proposed = dto
        .characters
        .iter()
        .find(|c| c.is_criminal)
        .map(|c| c.id.clone());
    if let Some(expected) = current.criminal().map(|c| c.id.clone()) {
        if proposed.as_ref() != Some(&expected) {
            let actual = proposed.map(|id| id.0).unwrap_or_default();
            tracing::warn!(%expected, %actual, "transition changed the criminal");
            return Err(ValidationError::CriminalChanged { expected, actual });
        }
    }

    let mut state = into_state(dto, current.phase)?;
    state.current_time = current.current_time;
    state.timeline = current.timeline.clone();
    for event in &current.timeline.events {
        let flag = event.fired_flag();
        state.flags = match current.flags.get(&flag) {
            Some(value) => state.flags.with(flag, value),
            None => state.flags.without(&flag),
        };
    }
    Ok(Transition { state, reply })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneratorError;

    const SCENARIO: &str = r#"{
        "title": "Death at Ashgrove",
        "description": "Lord Ashgrove lies dead in his study.",
        "phase": "start",
        "player": { "name": "Inspector", "currentLocation": "hall" },
        "characters": [
            { "id": "victim", "name": "Lord Ashgrove", "initialLocation": "study",
              "isVictim": true },
            { "id": "butler", "name": "Hobbs", "initialLocation": "hall", "isCriminal": true },
            { "id": "maid", "name": "Agnes", "initialLocation": "kitchen" }
        ],
        "places": [
            { "id": "hall", "name": "Hall", "connections": ["kitchen", "study"] },
            { "id": "kitchen", "name": "Kitchen", "connections": ["hall"] },
            { "id": "study", "name": "Study", "connections": ["hall"] }
        ],
        "clues": [
            { "id": "knife", "name": "Knife", "location": "kitchen" },
            { "id": "letter", "name": "Letter", "location": "maid" }
        ],
        "timeline": {
            "baseTime": { "minutes": 1200 },
            "startTime": { "minutes": 1320 },
            "endTime": { "minutes": 1560 },
            "events": [
                { "id": "murder", "time": { "minutes": 1260 }, "eventType": "CRIME",
                  "characterId": "butler" },
                { "id": "maid_to_study", "time": { "minutes": 1380 },
                  "eventType": "character_movement", "characterId": "maid", "placeId": "study" }
            ]
        },
        "flags": [ { "id": "door_open", "value": true } ]
    }"#;

    fn with(edit: impl FnOnce(&mut serde_json::Value)) -> String {
        let mut value: serde_json::Value = serde_json::from_str(SCENARIO).unwrap();
        edit(&mut value);
        value.to_string()
    }

    #[test]
    fn bootstrap_builds_state() {
        let state = bootstrap(SCENARIO).unwrap();
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.current_time, GameTime::new(1320));
        assert_eq!(state.criminal().unwrap().id.as_str(), "butler");
        assert!(state.flags.is_set("door_open"));
        assert_eq!(
            state.timeline.events[1].event_type,
            EventType::CharacterMovement
        );
        assert!(state.place(&"hall".into()).unwrap().is_connected_to(&"study".into()));
    }

    #[test]
    fn fenced_output_is_accepted() {
        let raw = format!("Here is your mystery:\n```json\n{SCENARIO}\n```\nEnjoy!");
        assert!(bootstrap(&raw).is_ok());
    }

    #[test]
    fn empty_output_is_rejected() {
        let err = bootstrap("   \n").unwrap_err();
        assert_eq!(err.issues(), [ValidationError::EmptyResponse]);
    }

    #[test]
    fn malformed_json_reports_position() {
        let err = bootstrap("{\"title\": }").unwrap_err();
        assert!(matches!(
            err.issues(),
            [ValidationError::MalformedJson { line: 1, .. }]
        ));
    }

    #[test]
    fn no_criminal_is_rejected() {
        let raw = with(|v| v["characters"][1]["isCriminal"] = false.into());
        let err = bootstrap(&raw).unwrap_err();
        assert_eq!(err.issues(), [ValidationError::CriminalCount { count: 0 }]);
    }

    #[test]
    fn two_criminals_are_rejected() {
        let raw = with(|v| v["characters"][2]["isCriminal"] = true.into());
        let err = bootstrap(&raw).unwrap_err();
        assert_eq!(err.issues(), [ValidationError::CriminalCount { count: 2 }]);
    }

    #[test]
    fn bad_clue_location_is_named() {
        let raw = with(|v| v["clues"][0]["location"] = "cellar".into());
        let err = bootstrap(&raw).unwrap_err();
        assert_eq!(
            err.issues(),
            [ValidationError::UnknownClueLocation {
                clue: "knife".into(),
                location: "cellar".into()
            }]
        );
    }

    #[test]
    fn verdict_phase_cannot_start_a_game() {
        let raw = with(|v| v["phase"] = "lose".into());
        let err = bootstrap(&raw).unwrap_err();
        assert_eq!(
            err.issues(),
            [ValidationError::InvalidPhase {
                expected: PhaseSet::Initial,
                actual: "LOSE".into()
            }]
        );
    }

    #[test]
    fn bootstrap_collects_every_issue() {
        let raw = with(|v| {
            v["characters"][2]["initialLocation"] = "garden".into();
            v["phase"] = "mystery".into();
            v["timeline"]["endTime"]["minutes"] = 1000.into();
        });
        let err = bootstrap(&raw).unwrap_err();
        let issues = err.issues();
        assert!(matches!(issues[0], ValidationError::UnknownLocation { .. }));
        assert!(matches!(issues[1], ValidationError::InvalidPhase { .. }));
        assert!(matches!(issues[2], ValidationError::InvertedTimeline { .. }));
        assert!(err.to_string().contains("garden"));
    }

    #[test]
    fn late_crime_is_out_of_window() {
        let raw = with(|v| v["timeline"]["events"][0]["time"]["minutes"] = 1400.into());
        let err = bootstrap(&raw).unwrap_err();
        assert_eq!(
            err.issues(),
            [ValidationError::EventOutOfWindow {
                event: "murder".into(),
                time: 1400
            }]
        );
    }

    #[test]
    fn unknown_event_type_and_reference() {
        let raw = with(|v| {
            v["timeline"]["events"][1]["eventType"] = "teleport".into();
            v["timeline"]["events"][0]["characterId"] = "cook".into();
        });
        let issues = bootstrap(&raw).unwrap_err().issues().to_vec();
        assert!(issues.contains(&ValidationError::UnknownEventType {
            event: "maid_to_study".into(),
            actual: "teleport".into()
        }));
        assert!(issues.contains(&ValidationError::UnknownEventReference {
            event: "murder".into(),
            field: "characterId",
            target: "cook".into()
        }));
    }

    #[test]
    fn duplicate_ids_reported_once() {
        let raw = with(|v| {
            let dup = v["places"][1].clone();
            let places = v["places"].as_array_mut().unwrap();
            places.push(dup.clone());
            places.push(dup);
        });
        let issues = bootstrap(&raw).unwrap_err().issues().to_vec();
        assert_eq!(
            issues,
            [ValidationError::DuplicateId {
                kind: "place",
                id: "kitchen".into()
            }]
        );
    }

    #[test]
    fn empty_cast_is_rejected() {
        let raw = with(|v| v["characters"] = serde_json::json!([]));
        let issues = bootstrap(&raw).unwrap_err().issues().to_vec();
        assert_eq!(issues[0], ValidationError::NoCharacters);
        assert!(issues.contains(&ValidationError::CriminalCount { count: 0 }));
    }

    #[test]
    fn scenario_without_places_is_rejected() {
        let raw = with(|v| v["places"] = serde_json::json!([]));
        let issues = bootstrap(&raw).unwrap_err().issues().to_vec();
        assert_eq!(issues[0], ValidationError::NoPlaces);
    }

    #[test]
    fn player_must_start_somewhere_real() {
        let raw = with(|v| v["player"]["currentLocation"] = "attic".into());
        let err = bootstrap(&raw).unwrap_err();
        assert_eq!(
            err.issues(),
            [ValidationError::UnknownLocation {
                entity: "player".into(),
                field: "currentLocation",
                location: "attic".into()
            }]
        );
    }

    #[test]
    fn base_time_must_precede_start() {
        let raw = with(|v| v["timeline"]["baseTime"]["minutes"] = 1320.into());
        let issues = bootstrap(&raw).unwrap_err().issues().to_vec();
        assert!(issues.contains(&ValidationError::BaseAfterStart {
            base: 1320,
            start: 1320
        }));
    }

    #[test]
    fn connections_must_name_places() {
        let raw = with(|v| v["places"][2]["connections"] = serde_json::json!(["hall", "attic"]));
        let err = bootstrap(&raw).unwrap_err();
        assert_eq!(
            err.issues(),
            [ValidationError::UnknownConnection {
                place: "study".into(),
                target: "attic".into()
            }]
        );
    }

    #[test]
    fn bootstrap_clock_must_sit_in_play_window() {
        for minutes in [0, 1319, 1561, 99_999] {
            let raw = with(|v| v["currentTime"] = serde_json::json!({ "minutes": minutes }));
            let err = bootstrap(&raw).unwrap_err();
            assert_eq!(
                err.issues(),
                [ValidationError::ClockOutOfWindow {
                    time: minutes,
                    start: 1320,
                    end: 1560
                }]
            );
        }
        let raw = with(|v| v["currentTime"] = serde_json::json!({ "minutes": 1402 }));
        assert_eq!(bootstrap(&raw).unwrap().current_time, GameTime::new(1400));
    }

    #[test]
    fn extreme_bounds_do_not_overflow() {
        let raw = with(|v| {
            v["timeline"] = serde_json::json!({
                "baseTime": { "minutes": i64::MIN },
                "startTime": { "minutes": i64::MIN + 10 },
                "endTime": { "minutes": i64::MAX },
                "events": []
            });
        });
        let state = bootstrap(&raw).unwrap();
        assert_eq!(
            state.current_time.remaining_until(state.timeline.end_time),
            i64::MAX
        );
    }

    #[test]
    fn generator_error_converts() {
        let err: BootstrapError = GeneratorError::Status(500).into();
        assert!(err.issues().is_empty());
    }

    fn current() -> GameState {
        bootstrap(SCENARIO)
            .unwrap()
            .with_phase(GamePhase::Investigation)
            .with_time(GameTime::new(1390))
            .with_flag("maid_to_study_fired", true)
    }

    #[test]
    fn transition_restores_engine_fields() {
        let raw = with(|v| {
            v["phase"] = "WIN".into();
            v["currentTime"] = serde_json::json!({ "minutes": 9999 });
            v["timeline"]["events"] = serde_json::json!([]);
            v["characters"][2]["mentalState"] = "shaken".into();
        });
        let envelope = format!(r#"{{"reply": "Agnes: \"I saw nothing.\"", "state": {raw}}}"#);
        let t = parse_transition(&envelope, &current()).unwrap();
        assert_eq!(t.reply.as_deref(), Some("Agnes: \"I saw nothing.\""));
        assert_eq!(t.state.phase, GamePhase::Investigation);
        assert_eq!(t.state.current_time, GameTime::new(1390));
        assert_eq!(t.state.timeline.len(), 2);
        assert!(t.state.flags.is_set("maid_to_study_fired"));
        assert_eq!(t.state.character(&"maid".into()).unwrap().mental_state, "shaken");
    }

    #[test]
    fn transition_cannot_forge_fired_flags() {
        let current = bootstrap(SCENARIO)
            .unwrap()
            .with_flag("murder_fired", true);
        let raw = with(|v| {
            v["flags"] = serde_json::json!({
                "door_open": true,
                "maid_to_study_fired": true,
                "murder_fired": false,
                "locked_out": true
            });
        });
        let t = parse_transition(&raw, &current).unwrap();
        assert_eq!(t.state.flags.get("maid_to_study_fired"), None);
        assert_eq!(t.state.flags.get("murder_fired"), Some(true));
        assert!(t.state.flags.is_set("locked_out"));
    }

    #[test]
    fn bare_snapshot_transition() {
        let t = parse_transition(SCENARIO, &current()).unwrap();
        assert_eq!(t.reply, None);
    }

    #[test]
    fn transition_may_not_swap_criminal() {
        let raw = with(|v| {
            v["characters"][1]["isCriminal"] = false.into();
            v["characters"][2]["isCriminal"] = true.into();
        });
        let err = parse_transition(&raw, &current()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::CriminalChanged {
                expected: "butler".into(),
                actual: "maid".into()
            }
        );
    }

    #[test]
    fn transition_reports_first_issue_only() {
        let raw = with(|v| {
            v["places"] = serde_json::json!([]);
            v["phase"] = "nonsense".into();
        });
        let err = parse_transition(&raw, &current()).unwrap_err();
        assert_eq!(err, ValidationError::NoPlaces);
    }

    #[test]
    fn transition_accepts_any_known_phase() {
        let raw = with(|v| v["phase"] = "investigating".into());
        assert!(parse_transition(&raw, &current()).is_ok());
        let raw = with(|v| v["phase"] = "limbo".into());
        assert!(matches!(
            parse_transition(&raw, &current()),
            Err(ValidationError::InvalidPhase { expected: PhaseSet::Any, .. })
        ));
    }
}
