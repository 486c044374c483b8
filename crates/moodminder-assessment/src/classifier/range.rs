use moodminder_core::models::mood::MoodBand;

use super::BandClassifier;
use crate::error::ClassifierError;
use crate::profiles::band_for_score;
use crate::scoring::ResponseVector;

/// Deterministic band lookup on the overall score.
pub struct RangeClassifier;

impl RangeClassifier {
    /// Band for `score`. Falls back to moderate for a score outside
    /// `[0, 100]`, which a valid catalog cannot produce.
    pub fn band(score: f64) -> MoodBand {
        band_for_score(score).unwrap_or_else(|| {
            tracing::warn!(score, "score outside band ranges, defaulting to moderate");
            MoodBand::Moderate
        })
    }
}

impl BandClassifier for RangeClassifier {
    fn id(&self) -> &str {
        "range"
    }

    fn classify(
        &self,
        _responses: &ResponseVector,
        score: f64,
    ) -> Result<MoodBand, ClassifierError> {
        Ok(Self::band(score))
    }
}
