//! Command envelope recognition.
//!
//! The firmware interleaves diagnostics with commands. A command is a line
//! that begins with the start marker; the orientation token runs from there
//! up to the first end marker, or to the end of the line if none follows.

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    start: String,
    end: String,
}

impl Envelope {
    pub const DEFAULT_START: &'static str = "Rotate Monitor <";
    pub const DEFAULT_END: &'static str = ">";

    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self, ConfigError> {
        let (start, end) = (start.into(), end.into());
        if start.is_empty() || end.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        Ok(Self { start, end })
    }

    /// Returns the token candidate, or `None` if `line` is not a command.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        let rest = line.strip_prefix(self.start.as_str())?;
        Some(rest.find(self.end.as_str()).map_or(rest, |end| &rest[..end]))
    }

    /// Builds a command line for `token`.
    pub fn wrap(&self, token: &str) -> String {
        format!("{}{}{}", self.start, token, self.end)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self { start: Self::DEFAULT_START.to_owned(), end: Self::DEFAULT_END.to_owned() }
    }
}
