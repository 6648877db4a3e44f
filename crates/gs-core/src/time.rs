use std::fmt;

use serde::{Deserialize, Serialize};

/// Granularity of engine-produced times, in minutes.
pub const TIME_STEP: i64 = 5;

/// A point on the scenario clock: whole minutes from the scenario's zero point.
///
/// Serializes as `{ "minutes": N }`, the shape content generators produce.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GameTime {
    /// Minutes since the scenario's zero point.
    pub minutes: i64,
}

impl GameTime {
    /// Create a time from a raw minute count.
    pub const fn new(minutes: i64) -> Self {
        Self { minutes }
    }

    /// Create a time from hours and minutes past the zero point.
    pub const fn from_hm(hours: i64, minutes: i64) -> Self {
        Self {
            minutes: hours * 60 + minutes,
        }
    }

    /// Whole hours since the zero point.
    pub fn hours(self) -> i64 {
        self.minutes.div_euclid(60)
    }

    /// Minutes past the current hour (0..60).
    pub fn minute_of_hour(self) -> i64 {
        self.minutes.rem_euclid(60)
    }

    /// Return a new time `delta` minutes later (or earlier, if negative).
    pub fn add_minutes(self, delta: i64) -> Self {
        Self {
            minutes: self.minutes.saturating_add(delta),
        }
    }

    /// Minutes from `self` until `later`, or zero if `later` is not after `self`.
    pub fn remaining_until(self, later: GameTime) -> i64 {
        later.minutes.saturating_sub(self.minutes).max(0)
    }

    /// True if the time sits on the 5-minute grid.
    pub fn is_aligned(self) -> bool {
        self.minutes.rem_euclid(TIME_STEP) == 0
    }

    /// Round to the nearest point on the 5-minute grid (halves round up).
    pub fn aligned(self) -> Self {
        let rem = self.minutes.rem_euclid(TIME_STEP);
        let down = self.minutes.saturating_sub(rem);
        if rem * 2 >= TIME_STEP {
            Self::new(down.saturating_add(TIME_STEP))
        } else {
            Self::new(down)
        }
    }
}

impl From<i64> for GameTime {
    fn from(minutes: i64) -> Self {
        Self::new(minutes)
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minute_of_hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_minutes_moves_forward() {
        assert_eq!(GameTime::new(30).add_minutes(15), GameTime::new(45));
    }

    #[test]
    fn display_is_hours_and_minutes() {
        insta::assert_snapshot!(GameTime::new(125).to_string(), @"02:05");
        insta::assert_snapshot!(GameTime::from_hm(21, 30).to_string(), @"21:30");
    }

    #[test]
    fn derived_components() {
        let t = GameTime::new(125);
        assert_eq!(t.hours(), 2);
        assert_eq!(t.minute_of_hour(), 5);
    }

    #[test]
    fn alignment() {
        assert!(GameTime::new(45).is_aligned());
        assert!(!GameTime::new(47).is_aligned());
        assert_eq!(GameTime::new(47).aligned(), GameTime::new(45));
        assert_eq!(GameTime::new(48).aligned(), GameTime::new(50));
        assert_eq!(GameTime::new(-3).aligned(), GameTime::new(-5));
    }

    #[test]
    fn remaining_never_negative() {
        assert_eq!(GameTime::new(30).remaining_until(GameTime::new(90)), 60);
        assert_eq!(GameTime::new(90).remaining_until(GameTime::new(30)), 0);
    }

    #[test]
    fn extreme_times_saturate() {
        let min = GameTime::new(i64::MIN);
        let max = GameTime::new(i64::MAX);
        assert_eq!(min.remaining_until(max), i64::MAX);
        assert_eq!(max.remaining_until(min), 0);
        assert_eq!(min.aligned(), min);
        assert_eq!(max.aligned(), GameTime::new(i64::MAX - 2));
    }

    #[test]
    fn serializes_as_minutes_object() {
        let json = serde_json::to_string(&GameTime::new(60)).unwrap();
        assert_eq!(json, r#"{"minutes":60}"#);
        let back: GameTime = serde_json::from_str(r#"{"minutes":75}"#).unwrap();
        assert_eq!(back, GameTime::new(75));
    }
}
