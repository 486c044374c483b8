use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::analysis::AnalysisResult;
use super::mood::MoodBand;

/// A persisted assessment: one analysis, keyed by user and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub user: String,
    pub analysis: AnalysisResult,
    pub created_at: jiff::Timestamp,
}

impl AssessmentRecord {
    /// Wrap an analysis for storage. The record takes the analysis timestamp
    /// so history ordering matches assessment time.
    pub fn new(user: impl Into<String>, analysis: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            user: user.into(),
            created_at: analysis.created_at,
            analysis,
        }
    }

    pub fn status(&self) -> MoodStatus {
        MoodStatus {
            current_mood: self.analysis.mood_category,
            mood_score: self.analysis.overall_score,
            last_assessment: self.created_at,
        }
    }
}

/// A user's latest mood, as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MoodStatus {
    pub current_mood: MoodBand,
    pub mood_score: f64,
    pub last_assessment: jiff::Timestamp,
}
