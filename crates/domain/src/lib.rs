//! # roomlight-domain
//!
//! Pure domain model for the roomlight lighting controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Rooms** (validated names addressing one light each)
//! - Define **Lights** (per-room on/off state machine with an auto-off timer)
//! - Define the **Light registry** (the aggregate owning every light)
//! - Define **Events** (transition records handed to collaborators)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! Timer deadlines are computed from a caller-supplied monotonic `now`; the
//! clock behind them is a port in `app`. Only event records read wall-clock time.

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod light;
pub mod registry;
pub mod room;
