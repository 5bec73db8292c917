//! Command parsing — one text line into one [`Command`].

use std::str::SplitWhitespace;
use std::time::Duration;

use roomlight_domain::room::RoomName;

use crate::error::ParseError;

const ADD_USAGE: &str = "ADD <room>";
const ON_USAGE: &str = "ON <room>";
const OFF_USAGE: &str = "OFF <room>";
const TIMER_USAGE: &str = "TIMER <room> <seconds>";
const STATUS_USAGE: &str = "STATUS";
const EMERGENCY_USAGE: &str = "EMERGENCY";
const HELP_USAGE: &str = "HELP";
const EXIT_USAGE: &str = "EXIT";

/// A parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(RoomName),
    On(RoomName),
    Off(RoomName),
    Timer { room: RoomName, duration: Duration },
    Status,
    Emergency,
    Help,
    Exit,
}

impl Command {
    /// Parse a single input line.
    ///
    /// Returns `Ok(None)` for a blank line. Keywords are uppercase only.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for an unknown keyword, a missing or extra
    /// argument, a bad room name, or seconds that are not a non-negative
    /// integer.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };

        let (command, usage) = match keyword {
            "ADD" => (Self::Add(room(&mut words, ADD_USAGE)?), ADD_USAGE),
            "ON" => (Self::On(room(&mut words, ON_USAGE)?), ON_USAGE),
            "OFF" => (Self::Off(room(&mut words, OFF_USAGE)?), OFF_USAGE),
            "TIMER" => {
                let room = room(&mut words, TIMER_USAGE)?;
                let duration = seconds(&mut words)?;
                (Self::Timer { room, duration }, TIMER_USAGE)
            }
            "STATUS" => (Self::Status, STATUS_USAGE),
            "EMERGENCY" => (Self::Emergency, EMERGENCY_USAGE),
            "HELP" => (Self::Help, HELP_USAGE),
            "EXIT" => (Self::Exit, EXIT_USAGE),
            _ => return Err(ParseError::UnknownCommand(keyword.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(ParseError::UnexpectedArgument {
                argument: extra.to_string(),
                usage,
            });
        }
        Ok(Some(command))
    }
}

fn room(words: &mut SplitWhitespace<'_>, usage: &'static str) -> Result<RoomName, ParseError> {
    let word = words.next().ok_or(ParseError::MissingArgument {
        argument: "<room>",
        usage,
    })?;
    Ok(RoomName::new(word)?)
}

fn seconds(words: &mut SplitWhitespace<'_>) -> Result<Duration, ParseError> {
    let word = words.next().ok_or(ParseError::MissingArgument {
        argument: "<seconds>",
        usage: TIMER_USAGE,
    })?;
    // `u64::from_str` accepts a leading '+', which is still a plain count.
    word.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ParseError::InvalidSeconds(word.to_string()))
}
