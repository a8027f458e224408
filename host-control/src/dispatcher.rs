//! The read/translate/dispatch loop.
//!
//! A two-state machine. `Reading` owns the live link; a read fault drops it
//! and moves to `Reconnecting`, which waits, acquires a fresh link, and goes
//! back to `Reading`. There is no terminal state.

use std::time::Duration;

use crate::{
    config::{BridgeConfig, CommandTemplate},
    connection::{AcquireConnection, LineSource},
    envelope::Envelope,
    error::ReadError,
    executor::ActionExecutor,
    orientation::{Orientation, TranslationTable},
    sleep::Sleeper,
};

pub enum DispatchState<H> {
    Reading(H),
    Reconnecting(ReadError),
}

impl<H> DispatchState<H> {
    pub fn is_reading(&self) -> bool {
        matches!(self, Self::Reading(_))
    }
}

/// What happened to one line read from the sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Nothing arrived before the read timeout, or a bare line ending.
    Empty,
    /// Diagnostic output without a command envelope.
    NotCommand,
    /// Envelope present but the token is not in the translation table.
    InvalidDirection(String),
    /// The rotation command was handed to the executor.
    Dispatched { orientation: Orientation, action: String, command: String },
}

pub struct Dispatcher<A, E, S> {
    acquirer: A,
    executor: E,
    sleeper: S,
    envelope: Envelope,
    translation: TranslationTable,
    command: CommandTemplate,
    reconnect_delay: Duration,
}

impl<A, E, S> Dispatcher<A, E, S>
where
    A: AcquireConnection,
    E: ActionExecutor,
    S: Sleeper,
{
    pub fn new(config: &BridgeConfig, acquirer: A, executor: E, sleeper: S) -> Self {
        Self {
            acquirer,
            executor,
            sleeper,
            envelope: config.envelope.clone(),
            translation: config.translation.clone(),
            command: config.command.clone(),
            reconnect_delay: config.retry_delay,
        }
    }

    /// Runs the loop on `link` until the process is killed.
    pub fn run(mut self, link: A::Handle) -> ! {
        let mut state = DispatchState::Reading(link);
        loop {
            state = self.step(state);
        }
    }

    /// Performs exactly one transition.
    pub fn step(&mut self, state: DispatchState<A::Handle>) -> DispatchState<A::Handle> {
        match state {
            DispatchState::Reading(mut link) => match link.read_line() {
                Ok(line) => {
                    self.handle_line(&line);
                    DispatchState::Reading(link)
                },
                Err(fault) => DispatchState::Reconnecting(fault),
            },
            DispatchState::Reconnecting(fault) => {
                tracing::error!(error = %fault, "serial link lost, probably not plugged in");
                self.sleeper.sleep(self.reconnect_delay);
                tracing::info!("trying to init serial again");
                DispatchState::Reading(self.acquirer.acquire_connection())
            },
        }
    }

    /// Parses one raw line and dispatches it if it is a valid command.
    ///
    /// The token is cut from the line as received. An envelope without an
    /// end marker keeps the line ending in its token and so never matches.
    pub fn handle_line(&mut self, raw: &str) -> LineOutcome {
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            tracing::trace!("skipping empty line");
            return LineOutcome::Empty;
        }
        tracing::debug!("line: {line}");

        let Some(token) = self.envelope.extract(raw) else {
            return LineOutcome::NotCommand;
        };
        tracing::info!("direction: {token:?}");

        let Some((orientation, action)) = self.translation.lookup(token) else {
            tracing::warn!("invalid direction: {token:?}, ignoring");
            return LineOutcome::InvalidDirection(token.to_owned());
        };
        tracing::info!("translation: {action}");

        let command = self.command.render(action);
        tracing::info!("running: {command}");
        if let Err(e) = self.executor.execute(&command) {
            tracing::error!(error = %e, "could not start rotation command");
        }

        LineOutcome::Dispatched { orientation, action: action.to_owned(), command }
    }

    pub fn acquirer(&self) -> &A {
        &self.acquirer
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }
}
