//! Text rendering of events, errors, help and status.

use std::fmt::Write as _;
use std::time::Duration;

use roomlight_domain::error::{LightingError, ValidationError};
use roomlight_domain::event::{Event, EventType};
use roomlight_domain::registry::RoomStatus;

pub const HELP: &str = "\nCommands:\n\
ADD [room]             - Add a new room\n\
ON [room]              - Turn on light\n\
OFF [room]             - Turn off light\n\
TIMER [room] [sec]     - Turn on light with auto-off timer\n\
STATUS                 - Show status of all lights\n\
EMERGENCY              - Turn on all lights\n\
HELP                   - Show this help\n\
EXIT                   - Quit the program\n\n";

/// One feedback line for an event.
#[must_use]
pub fn event(event: &Event) -> String {
    let room = event
        .room
        .as_ref()
        .map_or("", roomlight_domain::room::RoomName::as_str);
    match event.event_type {
        EventType::RoomAdded => format!("Room '{room}' added.\n"),
        EventType::LightTurnedOn => format!("{room} light turned ON.\n"),
        EventType::LightTurnedOff | EventType::TimerExpired => {
            format!("{room} light turned OFF.\n")
        }
        EventType::TimerArmed => format!(
            "{room} light set to auto-off in {} seconds.\n",
            event.timer_seconds().unwrap_or_default()
        ),
        EventType::EmergencyActivated => {
            "EMERGENCY MODE ACTIVATED: Turning all lights ON!\n".to_string()
        }
    }
}

/// One feedback line for a rejected command.
#[must_use]
pub fn error(err: &LightingError) -> String {
    match err {
        LightingError::RoomNotFound { .. } => "Room not found.\n".to_string(),
        LightingError::RoomAlreadyExists { .. } => "Room already exists.\n".to_string(),
        LightingError::Validation(ValidationError::TimerOutOfRange) => {
            "Timer duration is too long.\n".to_string()
        }
        LightingError::Validation(inner) => format!("Invalid room name: {inner}.\n"),
    }
}

/// Status block; `remaining` gives the time left on each row's timer.
#[must_use]
pub fn status<F>(rows: &[RoomStatus], remaining: F) -> String
where
    F: Fn(&RoomStatus) -> Option<Duration>,
{
    let mut out = String::from("\n-- Light Status --\n");
    for row in rows {
        let state = if row.is_on { "ON" } else { "OFF" };
        let _ = write!(out, "{}: {state}", row.room);
        if let Some(left) = remaining(row) {
            let _ = write!(out, " (auto-off in {}s)", ceil_secs(left));
        }
        out.push('\n');
    }
    out.push_str("-------------------\n\n");
    out
}

fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}
