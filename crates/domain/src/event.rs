//! Event — an immutable record of something that happened.
//!
//! Events are produced by every light transition: rooms being added, lights
//! switched on or off, timers armed or expiring, and the emergency override.
//! The domain never prints anything; collaborators render or log events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::EventId;
use crate::room::RoomName;
use crate::time::{Timestamp, now};

/// Kind of transition an [`Event`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    RoomAdded,
    LightTurnedOn,
    LightTurnedOff,
    TimerArmed,
    TimerExpired,
    EmergencyActivated,
}

impl EventType {
    /// Stable `snake_case` name, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RoomAdded => "room_added",
            Self::LightTurnedOn => "light_turned_on",
            Self::LightTurnedOff => "light_turned_off",
            Self::TimerArmed => "timer_armed",
            Self::TimerExpired => "timer_expired",
            Self::EmergencyActivated => "emergency_activated",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transition record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    /// Room the event concerns; `None` for registry-wide events.
    pub room: Option<RoomName>,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create a new event stamped with the current time.
    #[must_use]
    pub fn new(event_type: EventType, room: Option<RoomName>, data: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            room,
            data,
            timestamp: now(),
        }
    }

    /// Timer length carried by a [`EventType::TimerArmed`] event.
    #[must_use]
    pub fn timer_seconds(&self) -> Option<u64> {
        match self.event_type {
            EventType::TimerArmed => self.data.get("seconds").and_then(serde_json::Value::as_u64),
            _ => None,
        }
    }
}
