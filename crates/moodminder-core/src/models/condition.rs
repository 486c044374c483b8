use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A tracked symptom cluster. Each condition owns a subset of the question
/// catalog and an independent detection threshold.
///
/// Declaration order is the report order: detected conditions are listed
/// depression first, attention pattern last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Condition {
    Depression,
    Anxiety,
    /// Bipolar-pattern: mood swings, elevated energy, impulsivity.
    Bipolar,
    /// Trauma-pattern: intrusive memories, hypervigilance.
    Ptsd,
    /// Obsessive-compulsive pattern.
    Ocd,
    /// Attention pattern: concentration and restlessness.
    Adhd,
}

impl Condition {
    pub const ALL: [Condition; 6] = [
        Condition::Depression,
        Condition::Anxiety,
        Condition::Bipolar,
        Condition::Ptsd,
        Condition::Ocd,
        Condition::Adhd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Depression => "depression",
            Condition::Anxiety => "anxiety",
            Condition::Bipolar => "bipolar",
            Condition::Ptsd => "ptsd",
            Condition::Ocd => "ocd",
            Condition::Adhd => "adhd",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::UnknownCondition(s.to_string()))
    }
}
