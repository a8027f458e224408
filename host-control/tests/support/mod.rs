//! Scripted collaborators for driving the dispatcher without hardware.

#![allow(dead_code)]

use std::{collections::VecDeque, io, time::Duration};

use autorotate_host::{
    AcquireConnection, ActionExecutor, BridgeConfig, Dispatcher, ExecError, LineSource, ReadError, Sleeper,
};

/// Link that replays a fixed sequence of reads, then times out forever.
#[derive(Debug, Default)]
pub struct ScriptedLink {
    pub name: &'static str,
    reads: VecDeque<Result<String, ReadError>>,
}

impl ScriptedLink {
    pub fn new(name: &'static str) -> Self {
        Self { name, reads: VecDeque::new() }
    }

    pub fn line(mut self, line: &str) -> Self {
        self.reads.push_back(Ok(line.to_owned()));
        self
    }

    pub fn unplug(mut self) -> Self {
        self.reads.push_back(Err(ReadError::Disconnected { device: self.name.to_owned() }));
        self
    }

    pub fn io_fault(mut self) -> Self {
        self.reads.push_back(Err(ReadError::Io {
            device: self.name.to_owned(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "device removed"),
        }));
        self
    }
}

impl LineSource for ScriptedLink {
    fn read_line(&mut self) -> Result<String, ReadError> {
        self.reads.pop_front().unwrap_or_else(|| Ok(String::new()))
    }
}

/// Hands out prepared links in order and counts acquisitions.
#[derive(Debug, Default)]
pub struct ScriptedAcquirer {
    links: VecDeque<ScriptedLink>,
    pub acquisitions: usize,
}

impl ScriptedAcquirer {
    pub fn new(links: impl IntoIterator<Item = ScriptedLink>) -> Self {
        Self { links: links.into_iter().collect(), acquisitions: 0 }
    }
}

impl AcquireConnection for ScriptedAcquirer {
    type Handle = ScriptedLink;

    fn acquire_connection(&mut self) -> ScriptedLink {
        self.acquisitions += 1;
        self.links.pop_front().expect("test acquired more links than scripted")
    }
}

/// Records every command instead of running it.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub commands: Vec<String>,
    pub fail: bool,
}

impl ActionExecutor for RecordingExecutor {
    fn execute(&mut self, command: &str) -> Result<(), ExecError> {
        self.commands.push(command.to_owned());
        if self.fail {
            return Err(ExecError {
                command: command.to_owned(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such program"),
            });
        }
        Ok(())
    }
}

/// Records requested delays and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    pub delays: Vec<Duration>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.delays.push(duration);
    }
}

pub type TestDispatcher = Dispatcher<ScriptedAcquirer, RecordingExecutor, RecordingSleeper>;

pub fn dispatcher(links: Vec<ScriptedLink>) -> TestDispatcher {
    dispatcher_with(RecordingExecutor::default(), links)
}

pub fn dispatcher_with(executor: RecordingExecutor, links: Vec<ScriptedLink>) -> TestDispatcher {
    Dispatcher::new(&BridgeConfig::default(), ScriptedAcquirer::new(links), executor, RecordingSleeper::default())
}
