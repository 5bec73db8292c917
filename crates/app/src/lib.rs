//! # roomlight-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters and infrastructure implement:
//!   - `Clock` — monotonic "now" for timers and polling
//!   - `EventPublisher` — fan out domain events to collaborators
//! - Define the **driving port** as a use-case struct:
//!   - `LightingService` — add rooms, switch lights, arm timers, poll, override
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (system clock, broadcast event bus)
//!
//! ## Dependency rule
//! Depends on `roomlight-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod clock;
pub mod event_bus;
pub mod ports;
pub mod services;
