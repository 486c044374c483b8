//! Condition detection.
//!
//! Each condition is scored as the weight-averaged 0–1 response over the
//! questions tagged with it, then compared against its own threshold.
//! Conditions are independent: any number may be detected at once.

use std::collections::BTreeMap;

use moodminder_core::models::condition::Condition;

use crate::catalog::Catalog;
use crate::profiles::condition_profile;
use crate::scoring::{ResponseVector, unit_scale};

/// Score every condition that has at least one tagged question. Conditions
/// without questions are absent, not zero.
pub fn detect(catalog: &Catalog, responses: &ResponseVector) -> BTreeMap<Condition, f64> {
    let values = responses.as_slice();
    let mut scores = BTreeMap::new();

    for condition in Condition::ALL {
        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        for (position, question) in catalog.questions_for(condition) {
            if let Some(value) = values.get(position) {
                weighted += unit_scale(*value) * question.weight;
                total_weight += question.weight;
            }
        }
        if total_weight > 0.0 {
            scores.insert(condition, weighted / total_weight);
        }
    }

    scores
}

/// Keep only conditions whose score strictly exceeds their threshold.
pub fn detected(scores: &BTreeMap<Condition, f64>) -> BTreeMap<Condition, f64> {
    scores
        .iter()
        .filter(|(condition, score)| condition_profile(**condition).is_detected(**score))
        .map(|(condition, score)| (*condition, *score))
        .collect()
}
