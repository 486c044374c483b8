use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::activity::Activity;
use super::condition::Condition;
use super::game::GameAnalysis;
use super::mood::MoodBand;

/// The structured output of one mood assessment. Produced once, never
/// mutated; callers own it and may persist it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisResult {
    /// 0–100, rounded to one decimal.
    pub overall_score: f64,
    pub mood_category: MoodBand,
    pub description: String,

    /// Mean normalized (0–100) response per question category.
    pub category_scores: BTreeMap<String, f64>,
    pub areas_of_concern: Vec<String>,
    pub areas_of_strength: Vec<String>,

    pub insights: Vec<String>,
    pub recommendations: Vec<String>,

    /// Conditions whose score strictly exceeds their threshold.
    pub detected_conditions: BTreeMap<Condition, f64>,
    pub condition_scores: BTreeMap<Condition, f64>,
    pub recommended_activities: BTreeSet<Activity>,

    pub game_analysis: Option<GameAnalysis>,
    pub created_at: jiff::Timestamp,
}
