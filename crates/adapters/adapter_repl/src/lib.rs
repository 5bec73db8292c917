//! # roomlight-adapter-repl
//!
//! Line-oriented command interface for the lighting controller.
//!
//! ## Commands
//!
//! | Command | Effect |
//! |---------|--------|
//! | `ADD <room>` | Register a room (light starts off) |
//! | `ON <room>` / `OFF <room>` | Switch a light, disarming its timer |
//! | `TIMER <room> <seconds>` | Switch a light on with an auto-off timer |
//! | `STATUS` | Print every room's state |
//! | `EMERGENCY` | Switch every light on |
//! | `HELP` / `EXIT` | Show help / leave |
//!
//! Keywords must be written in uppercase; room names are case-sensitive.
//!
//! ## Dependency rule
//!
//! Depends on `roomlight-app` (the lighting service) and `roomlight-domain` only.

pub mod command;
pub mod error;
pub mod render;
pub mod session;

pub use command::Command;
pub use error::{ParseError, ReplError};
pub use session::{Flow, Session, SessionConfig};
