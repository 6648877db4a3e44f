use gs_core::{EventType, GameState, GameTime, Timeline, TimelineEvent};

use crate::clock::advance_time;

/// The outcome of moving the clock: the new snapshot and what fired on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// The snapshot after all triggered events were applied.
    pub state: GameState,
    /// Events applied during the advance, in firing order.
    pub fired: Vec<TimelineEvent>,
}

/// Events with `from < time <= to`, ascending by time.
pub fn triggered_events_between(
    timeline: &Timeline,
    from: GameTime,
    to: GameTime,
) -> Vec<TimelineEvent> {
    timeline
        .events_between(from, to)
        .into_iter()
        .cloned()
        .collect()
}

/// Apply one timeline event.
///
/// Movements relocate their character; place changes and custom events only
/// record `<id>_fired`; crimes never touch the world.
pub fn apply_event(state: GameState, event: &TimelineEvent) -> GameState {
    match event.event_type {
        EventType::Crime => state,
        EventType::PlaceChange | EventType::Custom => state.with_flag(event.fired_flag(), true),
        EventType::CharacterMovement => {
            let flag = event.fired_flag();
            match (&event.character_id, &event.place_id) {
                (Some(who), Some(whither))
                    if state.character(who).is_some() && state.place(whither).is_some() =>
                {
                    tracing::debug!(
                        event = %event.id,
                        character = %who,
                        place = %whither,
                        "character moved"
                    );
                    state
                        .relocate_character(who, whither.clone())
                        .with_flag(flag, true)
                }
                _ => {
                    tracing::warn!(
                        event = %event.id,
                        character = ?event.character_id,
                        place = ?event.place_id,
                        "movement event references unknown character or place"
                    );
                    state.with_flag(flag, true)
                }
            }
        }
    }
}

/// Advance the clock and apply every event crossed, reporting what fired.
///
/// Events whose fired flag is already set are skipped, so replaying a window
/// never applies an event twice.
pub fn advance(state: GameState, delta_minutes: u32) -> Advance {
    let from = state.current_time;
    let state = advance_time(state, delta_minutes);
    let to = state.current_time;

    let mut fired = Vec::new();
    let mut state = state;
    for event in triggered_events_between(&state.timeline, from, to) {
        if event.event_type != EventType::Crime && state.flags.is_set(&event.fired_flag()) {
            continue;
        }
        state = apply_event(state, &event);
        fired.push(event);
    }

    if !fired.is_empty() {
        tracing::info!(
            from = %from,
            to = %to,
            fired = fired.len(),
            "timeline events fired"
        );
    }
    Advance { state, fired }
}

/// Advance the clock and apply every event crossed.
pub fn advance_time_and_process_events(state: GameState, delta_minutes: u32) -> GameState {
    advance(state, delta_minutes).state
}
