use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A coping activity (mini-game) the application can recommend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Activity {
    Breathing,
    Memory,
    Puzzle,
    Reaction,
    Trivia,
    /// Rock-paper-scissors.
    Rps,
    /// Number guessing.
    Guess,
}

impl Activity {
    pub const ALL: [Activity; 7] = [
        Activity::Breathing,
        Activity::Memory,
        Activity::Puzzle,
        Activity::Reaction,
        Activity::Trivia,
        Activity::Rps,
        Activity::Guess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Breathing => "breathing",
            Activity::Memory => "memory",
            Activity::Puzzle => "puzzle",
            Activity::Reaction => "reaction",
            Activity::Trivia => "trivia",
            Activity::Rps => "rps",
            Activity::Guess => "guess",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activity::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| CoreError::UnknownActivity(s.to_string()))
    }
}
