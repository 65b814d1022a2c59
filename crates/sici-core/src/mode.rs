//! Operating mode of the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SiciError;

/// How the engine reacts to non-conforming input.
///
/// Strict mode turns empty input, unsupported version markers, and
/// post-tokenization invalidity into hard errors; lax mode reports
/// them through the parse outcome and the problem trackers instead.
/// The mode is fixed when a [`Sici`](crate::Sici) is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Strict,
    #[default]
    Lax,
}

impl Mode {
    /// Parse a mode name, case- and whitespace-insensitively.
    ///
    /// Anything other than "strict" or "lax" is a hard error
    /// regardless of mode.
    pub fn parse(value: &str) -> Result<Self, SiciError> {
        match value.trim().to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lax" => Ok(Self::Lax),
            _ => Err(SiciError::UnknownMode {
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lax => "lax",
        }
    }

    pub fn is_strict(&self) -> bool {
        *self == Self::Strict
    }
}

impl FromStr for Mode {
    type Err = SiciError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
