//! Light registry — the aggregate owning every room's [`Light`].
//!
//! The registry is an ordinary value: callers construct one and pass it to
//! whatever loop drives it. Lights are keyed by [`RoomName`] in a `BTreeMap`
//! so snapshots come back sorted by room name.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde_json::json;

use crate::error::LightingError;
use crate::event::{Event, EventType};
use crate::light::Light;
use crate::room::RoomName;

/// One row of a [`LightRegistry::status_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomStatus {
    pub room: RoomName,
    pub is_on: bool,
    /// Deadline of the armed auto-off timer, if any.
    pub deadline: Option<Instant>,
}

/// Mapping from room name to the light it owns.
#[derive(Debug, Default)]
pub struct LightRegistry {
    lights: BTreeMap<RoomName, Light>,
}

impl LightRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    #[must_use]
    pub fn contains(&self, room: &str) -> bool {
        self.lights.contains_key(room)
    }

    /// Register a new room whose light starts off.
    ///
    /// # Errors
    ///
    /// Returns [`LightingError::RoomAlreadyExists`] if the name is taken; the
    /// existing light is left untouched.
    pub fn add_room(&mut self, room: RoomName) -> Result<Event, LightingError> {
        if self.lights.contains_key(&room) {
            return Err(LightingError::room_already_exists(room));
        }
        let event = Event::new(EventType::RoomAdded, Some(room.clone()), json!({}));
        self.lights.insert(room.clone(), Light::new(room));
        Ok(event)
    }

    /// # Errors
    ///
    /// Returns [`LightingError::RoomNotFound`] if the room was never added.
    pub fn turn_on(&mut self, room: &str) -> Result<Event, LightingError> {
        Ok(self.light_mut(room)?.turn_on())
    }

    /// # Errors
    ///
    /// Returns [`LightingError::RoomNotFound`] if the room was never added.
    pub fn turn_off(&mut self, room: &str) -> Result<Event, LightingError> {
        Ok(self.light_mut(room)?.turn_off())
    }

    /// Turn a room's light on with an auto-off timer expiring at
    /// `now + duration`.
    ///
    /// # Errors
    ///
    /// Returns [`LightingError::RoomNotFound`] if the room was never added,
    /// or [`LightingError::Validation`] if the deadline overflows.
    pub fn set_timer(
        &mut self,
        room: &str,
        now: Instant,
        duration: Duration,
    ) -> Result<Event, LightingError> {
        Ok(self.light_mut(room)?.set_timer(now, duration)?)
    }

    /// Current on/off status of one room.
    ///
    /// # Errors
    ///
    /// Returns [`LightingError::RoomNotFound`] if the room was never added.
    pub fn status(&self, room: &str) -> Result<bool, LightingError> {
        self.lights
            .get(room)
            .map(Light::is_on)
            .ok_or_else(|| LightingError::room_not_found(room))
    }

    #[must_use]
    pub fn light(&self, room: &str) -> Option<&Light> {
        self.lights.get(room)
    }

    /// Turn off every light whose timer is due at `now`.
    ///
    /// Returns one [`EventType::TimerExpired`] event per light switched off.
    pub fn poll(&mut self, now: Instant) -> Vec<Event> {
        self.lights
            .values_mut()
            .filter_map(|light| light.check_expiry(now))
            .collect()
    }

    /// Earliest deadline among armed timers.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.lights.values().filter_map(Light::deadline).min()
    }

    /// Force every light on and disarm every timer.
    ///
    /// The returned events start with [`EventType::EmergencyActivated`]
    /// followed by one [`EventType::LightTurnedOn`] per room.
    pub fn emergency_override(&mut self) -> Vec<Event> {
        let mut events = Vec::with_capacity(self.lights.len() + 1);
        events.push(Event::new(
            EventType::EmergencyActivated,
            None,
            json!({ "rooms": self.lights.len() }),
        ));
        events.extend(self.lights.values_mut().map(Light::turn_on));
        events
    }

    /// Status of every room, sorted by room name.
    #[must_use]
    pub fn status_snapshot(&self) -> Vec<RoomStatus> {
        self.lights
            .values()
            .map(|light| RoomStatus {
                room: light.name().clone(),
                is_on: light.is_on(),
                deadline: light.deadline(),
            })
            .collect()
    }

    fn light_mut(&mut self, room: &str) -> Result<&mut Light, LightingError> {
        self.lights
            .get_mut(room)
            .ok_or_else(|| LightingError::room_not_found(room))
    }
}
