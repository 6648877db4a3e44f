//! Quantified properties of unlock evaluation and timeline queries.

use gs_core::{EventType, Flags, GameTime, Timeline, TimelineEvent, is_unlocked};
use proptest::prelude::*;

fn flag_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-d]", 0..6)
}

fn timeline(times: &[i64]) -> Timeline {
    times.iter().enumerate().fold(
        Timeline::new(GameTime::new(0), GameTime::new(10), GameTime::new(1000)),
        |tl, (i, t)| {
            tl.with_event(TimelineEvent::new(
                format!("e{i}"),
                GameTime::new(*t),
                EventType::Custom,
            ))
        },
    )
}

proptest! {
    #[test]
    fn prop_unlocked_iff_every_condition_true(
        conditions in flag_names(),
        set in prop::collection::btree_map("[a-d]", any::<bool>(), 0..4),
    ) {
        let flags: Flags = set.clone().into_iter().collect();
        let expected = conditions.iter().all(|c| set.get(c).copied().unwrap_or(false));
        prop_assert_eq!(is_unlocked(conditions.as_slice(), &flags), expected);
    }

    #[test]
    fn prop_empty_conditions_always_unlocked(
        set in prop::collection::btree_map("[a-d]", any::<bool>(), 0..4),
    ) {
        let flags: Flags = set.into_iter().collect();
        prop_assert!(is_unlocked::<String>(&[], &flags));
    }

    #[test]
    fn prop_past_and_future_partition(
        times in prop::collection::vec(0i64..1000, 0..20),
        t in 0i64..1000,
    ) {
        let tl = timeline(&times);
        let t = GameTime::new(t);
        let past = tl.past_events(t);
        let future = tl.future_events(t);
        prop_assert_eq!(past.len() + future.len(), tl.len());
        prop_assert!(past.iter().all(|e| e.time <= t));
        prop_assert!(future.iter().all(|e| e.time > t));
        prop_assert!(past.windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn prop_adjacent_windows_compose(
        times in prop::collection::vec(0i64..1000, 0..20),
        a in 0i64..1000,
        b in 0i64..1000,
        c in 0i64..1000,
    ) {
        let mut bounds = [a, b, c];
        bounds.sort();
        let [a, b, c] = bounds.map(GameTime::new);
        let tl = timeline(&times);
        let ids = |from, to| -> Vec<String> {
            tl.events_between(from, to).into_iter().map(|e| e.id.clone()).collect()
        };
        let mut joined = ids(a, b);
        joined.extend(ids(b, c));
        let whole = ids(a, c);
        prop_assert_eq!(joined, whole);
    }
}
