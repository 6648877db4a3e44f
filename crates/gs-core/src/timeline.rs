use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::time::GameTime;

/// What a scripted event does when the clock crosses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// A place changes; narrative only.
    PlaceChange,
    /// A character relocates to the event's place.
    CharacterMovement,
    /// The crime itself. Happens before play and is only recalled.
    Crime,
    /// Anything else; narrative only.
    Custom,
}

impl EventType {
    /// Map a loosely spelled event type onto a variant.
    ///
    /// Matching ignores case and separators, so `character_movement`,
    /// `CharacterMovement`, and `character movement` are all accepted.
    pub fn normalize(raw: &str) -> Option<EventType> {
        let key: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "placechange" => Some(Self::PlaceChange),
            "charactermovement" | "movement" => Some(Self::CharacterMovement),
            "crime" => Some(Self::Crime),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// A scripted occurrence bound to an absolute time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Unique event ID.
    pub id: String,
    /// When the event fires.
    pub time: GameTime,
    /// What the event does.
    pub event_type: EventType,
    /// Prose description.
    #[serde(default)]
    pub description: String,
    /// Character involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<EntityId>,
    /// Place involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<EntityId>,
}

impl TimelineEvent {
    /// Create an event with no character or place attached.
    pub fn new(id: impl Into<String>, time: GameTime, event_type: EventType) -> Self {
        Self {
            id: id.into(),
            time,
            event_type,
            description: String::new(),
            character_id: None,
            place_id: None,
        }
    }

    /// Attach a character.
    pub fn with_character(mut self, id: impl Into<EntityId>) -> Self {
        self.character_id = Some(id.into());
        self
    }

    /// Attach a place.
    pub fn with_place(mut self, id: impl Into<EntityId>) -> Self {
        self.place_id = Some(id.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Name of the flag recorded when this event fires.
    pub fn fired_flag(&self) -> String {
        format!("{}_fired", self.id)
    }
}

/// The scenario's time bounds and scripted events.
///
/// Events are kept in insertion order; every query returns them sorted by
/// time with ties left in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Earliest point; the crime happens between here and `start_time`.
    pub base_time: GameTime,
    /// Play begins here.
    pub start_time: GameTime,
    /// The deadline.
    pub end_time: GameTime,
    /// Scripted events in insertion order.
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

impl Timeline {
    /// Create a timeline with no events.
    pub fn new(base_time: GameTime, start_time: GameTime, end_time: GameTime) -> Self {
        Self {
            base_time,
            start_time,
            end_time,
            events: Vec::new(),
        }
    }

    /// Append an event.
    pub fn with_event(mut self, event: TimelineEvent) -> Self {
        self.events.push(event);
        self
    }

    fn sorted_where(&self, pred: impl Fn(&TimelineEvent) -> bool) -> Vec<&TimelineEvent> {
        let mut out: Vec<&TimelineEvent> = self.events.iter().filter(|e| pred(e)).collect();
        out.sort_by_key(|e| e.time);
        out
    }

    /// Events with `from < time <= to`, ascending.
    pub fn events_between(&self, from: GameTime, to: GameTime) -> Vec<&TimelineEvent> {
        self.sorted_where(|e| from < e.time && e.time <= to)
    }

    /// Events at or before `t`, ascending.
    pub fn past_events(&self, t: GameTime) -> Vec<&TimelineEvent> {
        self.sorted_where(|e| e.time <= t)
    }

    /// Events after `t`, ascending.
    pub fn future_events(&self, t: GameTime) -> Vec<&TimelineEvent> {
        self.sorted_where(|e| e.time > t)
    }

    /// Crime events, ascending.
    pub fn crime_events(&self) -> Vec<&TimelineEvent> {
        self.sorted_where(|e| e.event_type == EventType::Crime)
    }

    /// Everything but crimes: the events that fire during play, ascending.
    pub fn play_events(&self) -> Vec<&TimelineEvent> {
        self.sorted_where(|e| e.event_type != EventType::Crime)
    }

    /// Events involving a character, ascending.
    pub fn events_for_character(&self, id: &EntityId) -> Vec<&TimelineEvent> {
        self.sorted_where(|e| e.character_id.as_ref() == Some(id))
    }

    /// True if `base_time < start_time < end_time`.
    pub fn bounds_ordered(&self) -> bool {
        self.base_time < self.start_time && self.start_time < self.end_time
    }

    /// True if the event lies in the window its type requires.
    ///
    /// Crimes belong to `[base_time, start_time)`; everything else to
    /// `[start_time, end_time]`.
    pub fn in_window(&self, event: &TimelineEvent) -> bool {
        match event.event_type {
            EventType::Crime => self.base_time <= event.time && event.time < self.start_time,
            _ => self.start_time <= event.time && event.time <= self.end_time,
        }
    }

    /// Look up an event by ID.
    pub fn event(&self, id: &str) -> Option<&TimelineEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if there are no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
