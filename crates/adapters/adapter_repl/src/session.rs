//! Interactive session — the poll/read/dispatch loop.
//!
//! Each iteration polls the registry, prompts, waits for a line, polls again
//! and dispatches the command. While waiting for input a fixed-interval tick
//! keeps polling so timers expire even when the user is idle; the worst-case
//! expiry latency is one `poll_interval`.

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::MissedTickBehavior;

use roomlight_app::ports::{Clock, EventPublisher};
use roomlight_app::services::lighting_service::LightingService;
use roomlight_domain::error::LightingError;
use roomlight_domain::event::Event;

use crate::command::Command;
use crate::error::ReplError;
use crate::render;

/// Session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub prompt: String,
    pub poll_interval: Duration,
    /// Print the command list when the session starts.
    pub show_help: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            poll_interval: Duration::from_millis(100),
            show_help: true,
        }
    }
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A REPL bound to one lighting service.
pub struct Session<C, P> {
    service: LightingService<C, P>,
    config: SessionConfig,
}

impl<C: Clock, P: EventPublisher> Session<C, P> {
    pub fn new(service: LightingService<C, P>, config: SessionConfig) -> Self {
        Self { service, config }
    }

    #[must_use]
    pub fn service(&self) -> &LightingService<C, P> {
        &self.service
    }

    /// Run until `EXIT` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ReplError::Io`] if reading input or writing output fails.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<(), ReplError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if self.config.show_help {
            output.write_all(render::HELP.as_bytes()).await?;
        }

        let mut lines = input.lines();
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            self.poll(output).await?;
            output.write_all(self.config.prompt.as_bytes()).await?;
            output.flush().await?;

            let line = loop {
                tokio::select! {
                    line = lines.next_line() => break line?,
                    _ = ticker.tick() => {
                        if self.poll(output).await? {
                            output.write_all(self.config.prompt.as_bytes()).await?;
                            output.flush().await?;
                        }
                    }
                }
            };

            let Some(line) = line else {
                tracing::debug!("input closed");
                output.write_all(b"\n").await?;
                break;
            };

            self.poll(output).await?;
            if self.handle_line(&line, output).await? == Flow::Exit {
                break;
            }
        }

        output.flush().await?;
        Ok(())
    }

    /// Run one poll cycle and print any lights switched off by it.
    ///
    /// Returns whether anything was printed.
    ///
    /// # Errors
    ///
    /// Returns [`ReplError::Io`] if writing output fails.
    pub async fn poll<W>(&mut self, output: &mut W) -> Result<bool, ReplError>
    where
        W: AsyncWrite + Unpin,
    {
        let expired = self.service.poll().await;
        write_events(output, &expired).await?;
        Ok(!expired.is_empty())
    }

    /// Parse and execute one input line, writing the feedback.
    ///
    /// # Errors
    ///
    /// Returns [`ReplError::Io`] if writing output fails.
    pub async fn handle_line<W>(&mut self, line: &str, output: &mut W) -> Result<Flow, ReplError>
    where
        W: AsyncWrite + Unpin,
    {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command, output).await,
            Ok(None) => Ok(Flow::Continue),
            Err(err) => {
                tracing::debug!(error = ?err, line, "unparsable command");
                output.write_all(format!("{err}\n").as_bytes()).await?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Execute a parsed command, writing the feedback.
    ///
    /// # Errors
    ///
    /// Returns [`ReplError::Io`] if writing output fails.
    pub async fn execute<W>(&mut self, command: Command, output: &mut W) -> Result<Flow, ReplError>
    where
        W: AsyncWrite + Unpin,
    {
        tracing::debug!(command = ?command, "dispatching command");
        let result = match command {
            Command::Add(room) => self.service.add_room(room).await,
            Command::On(room) => self.service.turn_on(room.as_str()).await,
            Command::Off(room) => self.service.turn_off(room.as_str()).await,
            Command::Timer { room, duration } => {
                self.service.set_timer(room.as_str(), duration).await
            }
            Command::Status => {
                let rows = self.service.status_snapshot();
                let text = render::status(&rows, |row| self.service.remaining(row));
                output.write_all(text.as_bytes()).await?;
                return Ok(Flow::Continue);
            }
            Command::Emergency => {
                let events = self.service.emergency_override().await;
                write_events(output, &events).await?;
                return Ok(Flow::Continue);
            }
            Command::Help => {
                output.write_all(render::HELP.as_bytes()).await?;
                return Ok(Flow::Continue);
            }
            Command::Exit => return Ok(Flow::Exit),
        };
        write_result(output, &result).await?;
        Ok(Flow::Continue)
    }
}

async fn write_result<W>(output: &mut W, result: &Result<Event, LightingError>) -> Result<(), ReplError>
where
    W: AsyncWrite + Unpin,
{
    let text = match result {
        Ok(event) => render::event(event),
        Err(err) => render::error(err),
    };
    output.write_all(text.as_bytes()).await?;
    Ok(())
}

async fn write_events<W>(output: &mut W, events: &[Event]) -> Result<(), ReplError>
where
    W: AsyncWrite + Unpin,
{
    for event in events {
        output.write_all(render::event(event).as_bytes()).await?;
    }
    Ok(())
}
