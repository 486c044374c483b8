use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// One of five ordered labels partitioning the 0–100 mood score range.
/// Ordering follows the score: `Critical < Poor < ... < Excellent`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MoodBand {
    Critical,
    Poor,
    Moderate,
    Good,
    Excellent,
}

/// Coarse grouping of bands used to pick default activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BandTier {
    Distressed,
    Neutral,
    Positive,
}

impl MoodBand {
    /// All bands, lowest score first. A band's position here is its class
    /// index for the learned classifier.
    pub const ALL: [MoodBand; 5] = [
        MoodBand::Critical,
        MoodBand::Poor,
        MoodBand::Moderate,
        MoodBand::Good,
        MoodBand::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodBand::Critical => "critical",
            MoodBand::Poor => "poor",
            MoodBand::Moderate => "moderate",
            MoodBand::Good => "good",
            MoodBand::Excellent => "excellent",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<MoodBand> {
        MoodBand::ALL.get(index).copied()
    }

    pub fn tier(&self) -> BandTier {
        match self {
            MoodBand::Critical | MoodBand::Poor => BandTier::Distressed,
            MoodBand::Moderate => BandTier::Neutral,
            MoodBand::Good | MoodBand::Excellent => BandTier::Positive,
        }
    }
}

impl fmt::Display for MoodBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodBand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodBand::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| CoreError::UnknownMoodBand(s.to_string()))
    }
}
