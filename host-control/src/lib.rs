//! Host side of the auto-rotating monitor.
//!
//! An orientation sensor on a serial port prints lines such as
//! `Rotate Monitor <Y_POS>` between its diagnostics. This crate keeps a
//! link to the sensor open, picks the command lines out of that stream,
//! and runs the host's display rotation command for each one.
//!
//! [`connection::ConnectionManager`] finds and reopens the link;
//! [`dispatcher::Dispatcher`] consumes it forever.

pub mod config;
pub mod connection;
pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod orientation;
pub mod sleep;

pub use config::{BridgeConfig, CommandTemplate, Platform, SerialSettings};
pub use connection::{AcquireConnection, ConnectionManager, Connector, LineSource, SerialConnector, SerialLink};
pub use dispatcher::{DispatchState, Dispatcher, LineOutcome};
pub use envelope::Envelope;
pub use error::{ConfigError, ConnectError, ExecError, ReadError};
pub use executor::{ActionExecutor, ShellExecutor};
pub use orientation::{Orientation, TranslationTable};
pub use sleep::{Sleeper, ThreadSleeper};
