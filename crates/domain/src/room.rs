//! Room — the name under which a light is registered.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Validated room name.
///
/// Names are non-empty and free of whitespace so they can always be
/// addressed from a whitespace-separated command line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomName(String);

impl RoomName {
    /// Validate and wrap a room name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyRoomName`] for an empty string and
    /// [`ValidationError::WhitespaceInRoomName`] if any whitespace is present.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyRoomName);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ValidationError::WhitespaceInRoomName);
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomName> for String {
    fn from(value: RoomName) -> Self {
        value.0
    }
}

impl AsRef<str> for RoomName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RoomName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_simple_name() {
        let room = RoomName::new("Kitchen").unwrap();
        assert_eq!(room.as_str(), "Kitchen");
        assert_eq!(room.to_string(), "Kitchen");
    }

    #[test]
    fn should_reject_empty_name() {
        assert_eq!(RoomName::new(""), Err(ValidationError::EmptyRoomName));
    }

    #[test]
    fn should_reject_name_containing_whitespace() {
        assert_eq!(
            RoomName::new("Living Room"),
            Err(ValidationError::WhitespaceInRoomName)
        );
        assert_eq!(
            RoomName::new("Hall\t"),
            Err(ValidationError::WhitespaceInRoomName)
        );
    }

    #[test]
    fn should_keep_case_of_name() {
        let lower = RoomName::new("kitchen").unwrap();
        let upper = RoomName::new("Kitchen").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let room = RoomName::new("Garage").unwrap();
        assert_eq!(serde_json::to_string(&room).unwrap(), "\"Garage\"");
    }

    #[test]
    fn should_reject_invalid_name_when_deserializing() {
        let result: Result<RoomName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
