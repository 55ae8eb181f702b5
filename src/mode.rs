use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Keypad layout. Switching resets the expression but keeps memory and history.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Basic,
    Scientific,
    Financial,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Scientific => "scientific",
            Self::Financial => "financial",
        }
    }

    /// Status line text, e.g. `"Mode: Scientific"`.
    pub fn label(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("Mode: {}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => "Mode:".to_string(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown mode `{0}`")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "scientific" => Ok(Self::Scientific),
            "financial" => Ok(Self::Financial),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}
