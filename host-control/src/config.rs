//! Startup configuration.
//!
//! Everything here is built once in `main` and never mutated afterwards.
//! Platform differences are confined to [`Platform::preset`].

use std::time::Duration;

use crate::{envelope::Envelope, error::ConfigError, orientation::TranslationTable};

/// Placeholder replaced by the translated rotation action.
pub const ROTATION_PLACEHOLDER: &str = "{rotation}";

/// Fixed delay between failed device sweeps and before reconnecting.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialSettings {
    pub baud_rate: u32,
    pub read_timeout: Duration,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self { baud_rate: 9600, read_timeout: Duration::from_secs(1) }
    }
}

/// Shell command line with a `{rotation}` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate(String);

impl CommandTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();
        if !template.contains(ROTATION_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder(template));
        }
        Ok(Self(template))
    }

    pub fn render(&self, rotation: &str) -> String {
        self.0.replace(ROTATION_PLACEHOLDER, rotation)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Host platform whose rotation tool and device naming to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Platform {
    #[default]
    Linux,
    Windows,
}

impl Platform {
    pub fn preset(self) -> BridgeConfig {
        match self {
            Self::Linux => BridgeConfig {
                devices: ["/dev/ttyACM0", "/dev/ttyACM1", "/dev/ttyACM2"].map(String::from).to_vec(),
                serial: SerialSettings::default(),
                retry_delay: RETRY_DELAY,
                envelope: Envelope::default(),
                translation: TranslationTable::xrandr(),
                command: CommandTemplate(
                    "xrandr --output HDMI1 --rotate {rotation} --primary --output eDP1 --auto --right-of HDMI1"
                        .to_owned(),
                ),
            },
            Self::Windows => BridgeConfig {
                devices: vec!["COM3".to_owned()],
                serial: SerialSettings::default(),
                retry_delay: RETRY_DELAY,
                envelope: Envelope::default(),
                translation: TranslationTable::display_exe(),
                command: CommandTemplate("display.exe /rotate:{rotation}".to_owned()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Candidate device paths, tried in order.
    pub devices: Vec<String>,
    pub serial: SerialSettings,
    pub retry_delay: Duration,
    pub envelope: Envelope,
    pub translation: TranslationTable,
    pub command: CommandTemplate,
}

impl BridgeConfig {
    /// Replaces the preset device list when `devices` is non-empty.
    pub fn with_devices(mut self, devices: Vec<String>) -> Self {
        if !devices.is_empty() {
            self.devices = devices;
        }
        self
    }

    pub fn with_command(mut self, command: CommandTemplate) -> Self {
        self.command = command;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.devices.is_empty() {
            return Err(ConfigError::NoDevices);
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Platform::default().preset()
    }
}
