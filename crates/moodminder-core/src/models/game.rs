use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Mini-game types whose telemetry feeds the game-performance analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GameKind {
    Memory,
    Reaction,
    Breathing,
    Puzzle,
}

impl GameKind {
    /// Resolve a telemetry tag. Tags without analysis rules return `None`.
    pub fn from_tag(tag: &str) -> Option<GameKind> {
        match tag {
            "memory" => Some(GameKind::Memory),
            "reaction" => Some(GameKind::Reaction),
            "breathing" => Some(GameKind::Breathing),
            "puzzle" => Some(GameKind::Puzzle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Memory => "memory",
            GameKind::Reaction => "reaction",
            GameKind::Breathing => "breathing",
            GameKind::Puzzle => "puzzle",
        }
    }
}

/// Performance fields reported by the game-tracking subsystem for one game.
/// Absent fields deserialize to 0 / false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct GamePerformance {
    /// Fraction of correct answers, 0.0–1.0.
    pub accuracy: f64,
    /// Milliseconds.
    pub avg_reaction_time: f64,
    pub completed: bool,
    /// Seconds.
    pub time_to_solve: f64,
}

/// Telemetry keyed by game tag (`"memory"`, `"reaction"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameTelemetry(pub BTreeMap<String, GamePerformance>);

impl GameTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tag: impl Into<String>, performance: GamePerformance) -> Self {
        self.0.insert(tag.into(), performance);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GamePerformance)> {
        self.0.iter().map(|(tag, perf)| (tag.as_str(), perf))
    }
}

/// Indicators derived from game telemetry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameAnalysis {
    pub concentration_score: i32,
    pub stress_level: i32,
    pub patience_level: i32,
    pub mood_indicators: Vec<String>,
}
