use std::collections::BTreeMap;

use moodminder_core::models::responses::{LIKERT_MAX, LIKERT_MIN, LIKERT_NEUTRAL, Responses};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::profiles::{SCORE_MAX, SCORE_MIN};

/// Rejected response input. The only failure the scoring engine has.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected {expected} responses (one per question), got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("response {value} for question {question_id} is outside [1, 5]")]
    OutOfRange { question_id: u32, value: u8 },
}

/// Responses in canonical form: one validated Likert value per catalog
/// question, in catalog order. Only constructed by [`normalize`], so it is
/// always aligned with the catalog it was normalized against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseVector(Vec<u8>);

impl ResponseVector {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Bring either response shape into catalog order.
///
/// Id-keyed responses fill unanswered questions with the neutral value and
/// ignore ids the catalog does not know.
pub fn normalize(
    catalog: &Catalog,
    responses: &Responses,
) -> Result<ResponseVector, ValidationError> {
    let values = match responses {
        Responses::Sequence(values) => {
            if values.len() != catalog.len() {
                return Err(ValidationError::LengthMismatch {
                    expected: catalog.len(),
                    actual: values.len(),
                });
            }
            values.clone()
        }
        Responses::ById(by_id) => {
            let unknown = by_id.keys().filter(|id| catalog.get(**id).is_none()).count();
            if unknown > 0 {
                tracing::debug!(unknown, "ignoring responses for unknown question ids");
            }
            catalog
                .questions()
                .iter()
                .map(|q| by_id.get(&q.id).copied().unwrap_or(LIKERT_NEUTRAL))
                .collect()
        }
    };

    for (question, value) in catalog.questions().iter().zip(&values) {
        if !(LIKERT_MIN..=LIKERT_MAX).contains(value) {
            return Err(ValidationError::OutOfRange {
                question_id: question.id,
                value: *value,
            });
        }
    }

    Ok(ResponseVector(values))
}

/// A Likert value on the 0–1 scale.
pub fn unit_scale(value: u8) -> f64 {
    f64::from(value.saturating_sub(LIKERT_MIN)) / f64::from(LIKERT_MAX - LIKERT_MIN)
}

/// A Likert value on the 0–100 scale.
pub fn percent_scale(value: u8) -> f64 {
    unit_scale(value) * 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoodScore {
    /// Weighted sum of 0–100 normalized responses, rounded to one decimal.
    /// Bands are looked up on this value, so the reported score and band
    /// always agree.
    pub overall: f64,
    /// Unweighted mean of 0–100 normalized responses per category.
    pub categories: BTreeMap<String, f64>,
}

/// The overall score's reported precision.
pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

pub fn score(catalog: &Catalog, responses: &ResponseVector) -> MoodScore {
    let overall = overall_score(catalog, responses.as_slice());

    let mut buckets: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (question, value) in catalog.questions().iter().zip(responses.as_slice()) {
        let bucket = buckets.entry(question.category.as_str()).or_default();
        bucket.0 += percent_scale(*value);
        bucket.1 += 1;
    }
    let categories = buckets
        .into_iter()
        .map(|(category, (sum, count))| (category.to_string(), sum / count as f64))
        .collect();

    MoodScore {
        overall,
        categories,
    }
}

/// The overall-score formula on raw catalog-aligned values. Shared with the
/// learned classifier so its synthetic labels match real scores.
pub(crate) fn overall_score(catalog: &Catalog, values: &[u8]) -> f64 {
    // Catalog weights sum to 1 up to rounding.
    let weighted: f64 = catalog
        .questions()
        .iter()
        .zip(values)
        .map(|(q, v)| percent_scale(*v) * q.weight)
        .sum();
    round_score(weighted.clamp(SCORE_MIN, SCORE_MAX))
}
