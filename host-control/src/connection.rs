//! Serial link setup and the device sweep that (re)establishes it.

use std::{
    io::{self, BufRead, BufReader, Read},
    mem,
    time::Duration,
};

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::{
    config::SerialSettings,
    error::{ConnectError, ReadError},
    sleep::Sleeper,
};

/// Something lines can be read from.
pub trait LineSource {
    /// Reads one newline-terminated line.
    ///
    /// Returns an empty string when the read timeout elapses first. Any
    /// error means the link is unusable and must be replaced.
    fn read_line(&mut self) -> Result<String, ReadError>;
}

/// Opens a single candidate device.
pub trait Connector {
    type Handle: LineSource;

    fn open(&mut self, device: &str) -> Result<Self::Handle, ConnectError>;
}

/// Blocks until a live connection exists. Never fails.
pub trait AcquireConnection {
    type Handle: LineSource;

    fn acquire_connection(&mut self) -> Self::Handle;
}

/// Line reader over an open port.
///
/// Bytes received before a read timeout are kept and prefixed to the next
/// line, so a line split across timeouts still arrives whole.
pub struct SerialLink<P = Box<dyn SerialPort>> {
    device: String,
    reader: BufReader<P>,
    pending: Vec<u8>,
}

impl<P: Read> SerialLink<P> {
    pub fn new(device: impl Into<String>, port: P) -> Self {
        Self { device: device.into(), reader: BufReader::new(port), pending: Vec::new() }
    }

    pub fn device(&self) -> &str {
        &self.device
    }
}

impl<P: Read> LineSource for SerialLink<P> {
    fn read_line(&mut self) -> Result<String, ReadError> {
        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) => Err(ReadError::Disconnected { device: self.device.clone() }),
            Ok(_) => String::from_utf8(mem::take(&mut self.pending))
                .map_err(|source| ReadError::Decode { device: self.device.clone(), source }),
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                Ok(String::new())
            },
            Err(source) => Err(ReadError::Io { device: self.device.clone(), source }),
        }
    }
}

/// Opens real serial ports, 8N1 without flow control.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialConnector {
    settings: SerialSettings,
}

impl SerialConnector {
    pub fn new(settings: SerialSettings) -> Self {
        Self { settings }
    }
}

impl Connector for SerialConnector {
    type Handle = SerialLink;

    fn open(&mut self, device: &str) -> Result<SerialLink, ConnectError> {
        let port = serialport::new(device, self.settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(self.settings.read_timeout)
            .open()
            .map_err(|source| ConnectError::Open { device: device.to_owned(), source })?;

        port.clear(ClearBuffer::All)
            .map_err(|source| ConnectError::Clear { device: device.to_owned(), source })?;

        Ok(SerialLink::new(device, port))
    }
}

/// Sweeps the candidate devices until one opens, sleeping between sweeps.
pub struct ConnectionManager<C, S> {
    connector: C,
    devices: Vec<String>,
    retry_delay: Duration,
    sleeper: S,
}

impl<C: Connector, S: Sleeper> ConnectionManager<C, S> {
    pub fn new(connector: C, devices: Vec<String>, retry_delay: Duration, sleeper: S) -> Self {
        Self { connector, devices, retry_delay, sleeper }
    }

    /// One pass over the candidates. Stops at the first that opens.
    pub fn sweep(&mut self) -> Option<C::Handle> {
        for device in &self.devices {
            match self.connector.open(device) {
                Ok(handle) => {
                    tracing::info!("device found on {device}");
                    return Some(handle);
                },
                Err(e) => tracing::warn!(error = %e, "failed to initialise device on {device}"),
            }
        }
        None
    }
}

impl<C: Connector, S: Sleeper> AcquireConnection for ConnectionManager<C, S> {
    type Handle = C::Handle;

    fn acquire_connection(&mut self) -> C::Handle {
        loop {
            if let Some(handle) = self.sweep() {
                return handle;
            }
            tracing::debug!("no device available, next sweep in {:?}", self.retry_delay);
            self.sleeper.sleep(self.retry_delay);
        }
    }
}
