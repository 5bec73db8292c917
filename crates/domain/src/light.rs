//! Light — per-room on/off state machine with an optional auto-off timer.
//!
//! ```text
//!            turn_on                      set_timer
//!   Off ───────────────▶ On ──────────────────────────▶ Timed
//!    ▲  ◀─────────────── │  ◀────────────────────────── │
//!    │     turn_off          turn_on (disarms)           │
//!    └───────────────────────────────────────────────────┘
//!         turn_off, or check_expiry once now >= deadline
//! ```
//!
//! `set_timer` is accepted from every state. Expiry is the only transition
//! that is not triggered by a caller command; it is detected by comparing
//! the deadline against the `now` handed to [`Light::check_expiry`].

use std::fmt;
use std::time::{Duration, Instant};

use serde_json::json;

use crate::error::ValidationError;
use crate::event::{Event, EventType};
use crate::room::RoomName;
use crate::time::remaining;

/// Discrete state of a light.
///
/// A timer only exists while the light is on: it is carried by the
/// [`Timed`](Self::Timed) variant, which counts as on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightState {
    #[default]
    Off,
    On,
    Timed { deadline: Instant },
}

impl LightState {
    #[must_use]
    pub fn is_on(self) -> bool {
        !matches!(self, Self::Off)
    }

    #[must_use]
    pub fn deadline(self) -> Option<Instant> {
        match self {
            Self::Timed { deadline } => Some(deadline),
            Self::Off | Self::On => None,
        }
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
            Self::Timed { .. } => f.write_str("timed"),
        }
    }
}

/// A single room's light.
#[derive(Debug, Clone)]
pub struct Light {
    name: RoomName,
    state: LightState,
}

impl Light {
    /// Create a light in the [`Off`](LightState::Off) state.
    #[must_use]
    pub fn new(name: RoomName) -> Self {
        Self {
            name,
            state: LightState::Off,
        }
    }

    #[must_use]
    pub fn name(&self) -> &RoomName {
        &self.name
    }

    #[must_use]
    pub fn state(&self) -> LightState {
        self.state
    }

    /// Current on/off status.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }

    /// Deadline of the armed timer, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.state.deadline()
    }

    /// Time left on the armed timer, if any.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|deadline| remaining(deadline, now))
    }

    /// Switch the light on, disarming any pending timer.
    pub fn turn_on(&mut self) -> Event {
        self.transition(LightState::On, EventType::LightTurnedOn)
    }

    /// Switch the light off, disarming any pending timer.
    pub fn turn_off(&mut self) -> Event {
        self.transition(LightState::Off, EventType::LightTurnedOff)
    }

    /// Switch the light on and arm an auto-off timer expiring at
    /// `now + duration`.
    ///
    /// A zero duration is valid: the timer expires on the next poll.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TimerOutOfRange`] when the deadline cannot
    /// be represented.
    pub fn set_timer(&mut self, now: Instant, duration: Duration) -> Result<Event, ValidationError> {
        let deadline = now
            .checked_add(duration)
            .ok_or(ValidationError::TimerOutOfRange)?;
        let mut event = self.transition(LightState::Timed { deadline }, EventType::TimerArmed);
        event.data["seconds"] = json!(duration.as_secs());
        Ok(event)
    }

    /// Turn the light off if its timer has reached its deadline.
    ///
    /// The deadline is inclusive: a timer due at `T` fires for `now == T`.
    pub fn check_expiry(&mut self, now: Instant) -> Option<Event> {
        match self.state {
            LightState::Timed { deadline } if now >= deadline => {
                Some(self.transition(LightState::Off, EventType::TimerExpired))
            }
            _ => None,
        }
    }

    fn transition(&mut self, to: LightState, event_type: EventType) -> Event {
        let from = std::mem::replace(&mut self.state, to);
        Event::new(
            event_type,
            Some(self.name.clone()),
            json!({ "from": from.to_string(), "to": to.to_string() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kitchen() -> Light {
        Light::new(RoomName::new("Kitchen").unwrap())
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn should_start_off_without_timer() {
        let light = kitchen();
        assert_eq!(light.state(), LightState::Off);
        assert!(!light.is_on());
        assert!(light.deadline().is_none());
    }

    #[test]
    fn should_report_on_after_turn_on() {
        let mut light = kitchen();
        let event = light.turn_on();
        assert!(light.is_on());
        assert_eq!(event.event_type, EventType::LightTurnedOn);
        assert_eq!(event.room.as_ref().map(RoomName::as_str), Some("Kitchen"));
        assert_eq!(event.data["from"], "off");
        assert_eq!(event.data["to"], "on");
    }

    #[test]
    fn should_report_off_after_turn_off() {
        let mut light = kitchen();
        light.turn_on();
        let event = light.turn_off();
        assert!(!light.is_on());
        assert_eq!(event.event_type, EventType::LightTurnedOff);
    }

    #[test]
    fn should_leave_same_state_when_turned_off_twice() {
        let mut light = kitchen();
        light.turn_on();
        light.turn_off();
        let once = light.state();
        light.turn_off();
        assert_eq!(light.state(), once);
    }

    #[test]
    fn should_arm_timer_and_turn_on() {
        let t0 = Instant::now();
        let mut light = kitchen();
        let event = light.set_timer(t0, secs(5)).unwrap();
        assert!(light.is_on());
        assert_eq!(light.deadline(), Some(t0 + secs(5)));
        assert_eq!(event.event_type, EventType::TimerArmed);
        assert_eq!(event.timer_seconds(), Some(5));
        assert_eq!(event.data["to"], "timed");
    }

    #[test]
    fn should_stay_on_before_deadline() {
        let t0 = Instant::now();
        let mut light = kitchen();
        light.set_timer(t0, secs(5)).unwrap();
        assert!(light.check_expiry(t0 + secs(4)).is_none());
        assert!(light.is_on());
    }

    #[test]
    fn should_expire_exactly_at_deadline() {
        let t0 = Instant::now();
        let mut light = kitchen();
        light.set_timer(t0, secs(5)).unwrap();
        let event = light.check_expiry(t0 + secs(5)).unwrap();
        assert_eq!(event.event_type, EventType::TimerExpired);
        assert_eq!(event.data["from"], "timed");
        assert_eq!(event.data["to"], "off");
        assert!(!light.is_on());
        assert!(light.deadline().is_none());
    }

    #[test]
    fn should_not_expire_again_after_firing() {
        let t0 = Instant::now();
        let mut light = kitchen();
        light.set_timer(t0, secs(5)).unwrap();
        light.check_expiry(t0 + secs(5));
        assert!(light.check_expiry(t0 + secs(6)).is_none());
        assert!(!light.is_on());
    }

    #[test]
    fn should_expire_zero_duration_timer_on_next_check() {
        let t0 = Instant::now();
        let mut light = kitchen();
        light.set_timer(t0, Duration::ZERO).unwrap();
        assert!(light.is_on());
        assert!(light.check_expiry(t0).is_some());
        assert!(!light.is_on());
    }

    #[test]
    fn should_disarm_timer_when_turned_on_manually() {
        let t0 = Instant::now();
        let mut light = kitchen();
        light.set_timer(t0, secs(5)).unwrap();
        light.turn_on();
        assert_eq!(light.state(), LightState::On);
        assert!(light.check_expiry(t0 + secs(10)).is_none());
        assert!(light.is_on());
    }

    #[test]
    fn should_disarm_timer_when_turned_off_manually() {
        let t0 = Instant::now();
        let mut light = kitchen();
        light.set_timer(t0, secs(5)).unwrap();
        light.turn_off();
        assert!(light.check_expiry(t0 + secs(10)).is_none());
        assert_eq!(light.state(), LightState::Off);
    }

    #[test]
    fn should_replace_deadline_when_timer_rearmed() {
        let t0 = Instant::now();
        let mut light = kitchen();
        light.set_timer(t0, secs(5)).unwrap();
        light.set_timer(t0 + secs(2), secs(10)).unwrap();
        assert!(light.check_expiry(t0 + secs(5)).is_none());
        assert!(light.check_expiry(t0 + secs(12)).is_some());
    }

    #[test]
    fn should_ignore_expiry_check_when_no_timer() {
        let mut light = kitchen();
        light.turn_on();
        assert!(light.check_expiry(Instant::now() + secs(3600)).is_none());
        assert!(light.is_on());
    }

    #[test]
    fn should_report_remaining_time_of_armed_timer() {
        let t0 = Instant::now();
        let mut light = kitchen();
        assert!(light.remaining(t0).is_none());
        light.set_timer(t0, secs(5)).unwrap();
        assert_eq!(light.remaining(t0 + secs(3)), Some(secs(2)));
    }

    #[test]
    fn should_reject_unrepresentable_deadline() {
        let mut light = kitchen();
        let result = light.set_timer(Instant::now(), Duration::MAX);
        assert_eq!(result, Err(ValidationError::TimerOutOfRange));
        assert_eq!(light.state(), LightState::Off);
    }

    #[test]
    fn should_display_state_names() {
        assert_eq!(LightState::Off.to_string(), "off");
        assert_eq!(LightState::On.to_string(), "on");
        let timed = LightState::Timed {
            deadline: Instant::now(),
        };
        assert_eq!(timed.to_string(), "timed");
        assert!(timed.is_on());
    }
}
