//! Error types for the REPL adapter.

use roomlight_domain::error::ValidationError;

/// A command line that could not be turned into a [`Command`](crate::Command).
///
/// The `Display` text is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid command. Type HELP.")]
    UnknownCommand(String),

    #[error("Missing {argument}. Usage: {usage}")]
    MissingArgument {
        argument: &'static str,
        usage: &'static str,
    },

    #[error("Unexpected argument '{argument}'. Usage: {usage}")]
    UnexpectedArgument {
        argument: String,
        usage: &'static str,
    },

    #[error("Invalid seconds '{0}': expected a non-negative integer.")]
    InvalidSeconds(String),

    #[error("Invalid room name: {0}.")]
    InvalidRoom(#[from] ValidationError),
}

/// Failure of the session loop itself.
#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
}
