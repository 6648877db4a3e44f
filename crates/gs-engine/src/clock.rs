use gs_core::GameState;

/// Advance the clock by `delta_minutes`, capped at the timeline's deadline.
///
/// Moving past the deadline is not an error; the clock simply stops there.
pub fn advance_time(state: GameState, delta_minutes: u32) -> GameState {
    let target = state
        .current_time
        .add_minutes(i64::from(delta_minutes))
        .min(state.timeline.end_time);
    state.with_time(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_core::{Flags, GamePhase, GameTime, Place, Player, Timeline};

    fn bare_state(now: i64, end: i64) -> GameState {
        GameState {
            title: "t".into(),
            description: String::new(),
            phase: GamePhase::Investigation,
            current_time: GameTime::new(now),
            player: Player::new("p", "hall"),
            characters: Vec::new(),
            places: vec![Place::new("hall", "Hall")],
            clues: Vec::new(),
            timeline: Timeline::new(GameTime::new(0), GameTime::new(60), GameTime::new(end)),
            flags: Flags::new(),
        }
    }

    #[test]
    fn advances_by_delta() {
        let state = advance_time(bare_state(60, 300), 15);
        assert_eq!(state.current_time, GameTime::new(75));
    }

    #[test]
    fn caps_at_deadline() {
        let state = advance_time(bare_state(290, 300), 30);
        assert_eq!(state.current_time, GameTime::new(300));
    }

    #[test]
    fn zero_delta_is_identity() {
        let before = bare_state(90, 300);
        assert_eq!(advance_time(before.clone(), 0), before);
    }
}
