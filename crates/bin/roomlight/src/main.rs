//! # roomlight — interactive lighting controller
//!
//! Composition root that wires the lighting service to the console.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber (stderr, so stdout stays the console)
//! - Construct the registry, clock and event bus
//! - Construct the lighting service, injecting its ports
//! - Register start-up rooms and run the console session until `EXIT`
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use tokio::io::BufReader;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing_subscriber::EnvFilter;

use roomlight_adapter_repl::{Session, SessionConfig};
use roomlight_app::clock::SystemClock;
use roomlight_app::event_bus::InProcessEventBus;
use roomlight_app::services::lighting_service::LightingService;
use roomlight_domain::event::Event;
use roomlight_domain::registry::LightRegistry;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_tracing(config.log_filter()?);

    // Event bus
    let event_bus = InProcessEventBus::new(config.events.capacity);
    let logger = tokio::spawn(log_events(event_bus.subscribe()));

    // Service
    let mut service = LightingService::new(LightRegistry::new(), SystemClock, event_bus);
    for room in config.rooms()? {
        service.add_room(room).await?;
    }

    // Console
    let mut session = Session::new(
        service,
        SessionConfig {
            prompt: config.repl.prompt.clone(),
            poll_interval: config.poll_interval(),
            show_help: config.repl.show_help,
        },
    );
    tracing::info!(
        rooms = session.service().registry().len(),
        poll_interval_ms = config.controller.poll_interval_ms,
        "roomlight started"
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    session.run(stdin, &mut stdout).await?;

    logger.abort();
    tracing::info!("roomlight stopped");
    Ok(())
}

fn init_tracing(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn log_events(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => tracing::debug!(
                id = %event.id,
                event = %event.event_type,
                room = ?event.room,
                data = %event.data,
                "event"
            ),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event logger lagged behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
