//! Common error types used across the workspace.
//!
//! Each failure is a typed variant; layers above convert via `#[from]`
//! instead of stringly-typed errors. Every variant is recoverable and is
//! reported to the caller as a value.

/// Top-level error returned by registry and service operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LightingError {
    /// An operation targeted a room that was never added.
    #[error("room not found: {room}")]
    RoomNotFound { room: String },

    /// `add_room` was called with a name that is already registered.
    #[error("room already exists: {room}")]
    RoomAlreadyExists { room: String },

    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),
}

impl LightingError {
    pub(crate) fn room_not_found(room: impl Into<String>) -> Self {
        Self::RoomNotFound { room: room.into() }
    }

    pub(crate) fn room_already_exists(room: impl Into<String>) -> Self {
        Self::RoomAlreadyExists { room: room.into() }
    }
}

/// Invariant violations detected while constructing domain values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("room name must not contain whitespace")]
    WhitespaceInRoomName,

    #[error("timer duration is too long")]
    TimerOutOfRange,
}
