//! Follows the sensor and rotates the display.
//!
//! ```bash
//! # Linux defaults: /dev/ttyACM0..2, xrandr on HDMI1
//! autorotate-host
//!
//! # Single monitor on a specific port
//! autorotate-host --device /dev/ttyUSB0 --command "xrandr --output eDP1 --rotate {rotation}"
//! ```

use autorotate_host::{
    AcquireConnection, CommandTemplate, ConnectionManager, Dispatcher, Platform, SerialConnector, ShellExecutor,
    ThreadSleeper,
};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Rotates the display to match an orientation sensor on a serial port
#[derive(Parser, Debug)]
#[command(name = "autorotate-host")]
#[command(version)]
struct Args {
    /// Platform preset for device names and the rotation command
    #[arg(long, value_enum, default_value_t = Platform::Linux)]
    platform: Platform,

    /// Candidate serial device, tried in the order given (repeatable)
    #[arg(short, long = "device")]
    devices: Vec<String>,

    /// Rotation command; `{rotation}` is replaced by the translated value
    #[arg(short, long)]
    command: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let mut config = args.platform.preset().with_devices(args.devices);
    if let Some(command) = args.command {
        config = config.with_command(CommandTemplate::new(command)?);
    }
    config.validate()?;

    tracing::info!("watching {} for rotation commands", config.devices.join(", "));
    tracing::debug!("rotation command: {}", config.command.as_str());

    let mut manager =
        ConnectionManager::new(SerialConnector::new(config.serial), config.devices.clone(), config.retry_delay, ThreadSleeper);
    let link = manager.acquire_connection();

    Dispatcher::new(&config, manager, ShellExecutor::new(), ThreadSleeper).run(link)
}
