//! Error types for the sensor bridge.
//!
//! Only [`ConfigError`] is ever fatal, and only at startup. Everything else
//! is recovered inside the connect/read loop.

use std::{io, string::FromUtf8Error};

use thiserror::Error;

/// Invalid startup configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No candidate device paths were given.
    #[error("no candidate devices configured")]
    NoDevices,

    /// The rotation command template has nothing to substitute into.
    #[error("command template {0:?} does not contain the {{rotation}} placeholder")]
    MissingPlaceholder(String),

    /// One of the envelope markers is empty.
    #[error("envelope markers must not be empty")]
    EmptyMarker,
}

/// Failure to bring up a serial link on one candidate device.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The port could not be opened (missing, busy, permission denied...).
    #[error("failed to open {device}: {source}")]
    Open {
        /// Device path that was tried
        device: String,
        /// Underlying serial error
        #[source]
        source: serialport::Error,
    },

    /// The port opened but its buffers could not be flushed.
    #[error("failed to clear buffers on {device}: {source}")]
    Clear {
        /// Device path that was tried
        device: String,
        /// Underlying serial error
        #[source]
        source: serialport::Error,
    },
}

/// Mid-stream fault on a live link. Always answered with a reconnect.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The port returned an I/O error other than a read timeout.
    #[error("read from {device} failed: {source}")]
    Io {
        /// Device path of the link
        device: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The port reported end-of-stream, usually because it was unplugged.
    #[error("{device} closed the stream")]
    Disconnected {
        /// Device path of the link
        device: String,
    },

    /// A complete line was received but is not valid UTF-8.
    #[error("line from {device} is not valid UTF-8: {source}")]
    Decode {
        /// Device path of the link
        device: String,
        /// Decoding error
        #[source]
        source: FromUtf8Error,
    },
}

/// The rotation command could not be started.
#[derive(Debug, Error)]
#[error("failed to run {command:?}: {source}")]
pub struct ExecError {
    /// Rendered command line
    pub command: String,
    /// Spawn error
    #[source]
    pub source: io::Error,
}
