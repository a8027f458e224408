//! Sensor orientation tokens and their translation to rotation actions.

use std::{collections::BTreeMap, fmt, str::FromStr};

/// Which sensor axis points up, as reported by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    YPos,
    XPos,
    XNeg,
    YNeg,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [Self::YPos, Self::XPos, Self::XNeg, Self::YNeg];

    /// Wire spelling of the token.
    pub fn token(self) -> &'static str {
        match self {
            Self::YPos => "Y_POS",
            Self::XPos => "X_POS",
            Self::XNeg => "X_NEG",
            Self::YNeg => "Y_NEG",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Token that is not one of the four recognised orientations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken(pub String);

impl FromStr for Orientation {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|o| o.token() == s).ok_or_else(|| UnknownToken(s.to_owned()))
    }
}

/// Immutable mapping from orientation to the host's rotation argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
    actions: BTreeMap<Orientation, String>,
}

impl TranslationTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Orientation, S)>,
        S: Into<String>,
    {
        Self { actions: entries.into_iter().map(|(o, a)| (o, a.into())).collect() }
    }

    /// xrandr rotation names, for a Y axis pointing at the top of the monitor.
    pub fn xrandr() -> Self {
        Self::new([
            (Orientation::YPos, "left"),
            (Orientation::XPos, "inverted"),
            (Orientation::XNeg, "normal"),
            (Orientation::YNeg, "right"),
        ])
    }

    /// Degree values understood by `display.exe /rotate:`.
    pub fn display_exe() -> Self {
        Self::new([
            (Orientation::YPos, "0"),
            (Orientation::XPos, "270"),
            (Orientation::XNeg, "90"),
            (Orientation::YNeg, "180"),
        ])
    }

    pub fn get(&self, orientation: Orientation) -> Option<&str> {
        self.actions.get(&orientation).map(String::as_str)
    }

    /// Resolves a raw token. `None` for anything outside the table.
    pub fn lookup(&self, token: &str) -> Option<(Orientation, &str)> {
        let orientation = token.parse::<Orientation>().ok()?;
        self.get(orientation).map(|action| (orientation, action))
    }
}
