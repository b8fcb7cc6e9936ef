//! Difficulty tiers

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// Difficulty tier of the automated opponent, stored on a game as `aiLevel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AiLevel {
    /// Uniformly random legal move
    Random = 1,
    /// Random capture when one exists, otherwise any legal move
    CapturePreferring = 2,
    /// Reserved for a search-based policy; plays like `Random` for now
    Strong = 3,
}

impl AiLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiLevel::Random => "random",
            AiLevel::CapturePreferring => "capture_preferring",
            AiLevel::Strong => "strong",
        }
    }
}

impl TryFrom<u8> for AiLevel {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(AiLevel::Random),
            2 => Ok(AiLevel::CapturePreferring),
            3 => Ok(AiLevel::Strong),
            other => Err(Error::InvalidConfig(format!(
                "AI level must be 1, 2 or 3, got {}",
                other
            ))),
        }
    }
}

impl From<AiLevel> for u8 {
    fn from(level: AiLevel) -> Self {
        level as u8
    }
}

impl fmt::Display for AiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
