//! Mood-band classification.
//!
//! Two interchangeable strategies sit behind [`BandClassifier`]:
//! [`RangeClassifier`] looks the overall score up in the band table and is
//! the default; [`LearnedClassifier`] predicts from the raw response vector
//! with a model trained on synthetic data and cached on disk.

pub mod learned;
pub mod range;

use std::sync::Arc;

use moodminder_core::models::mood::MoodBand;

use crate::catalog::Catalog;
use crate::config::ClassifierSettings;
use crate::error::ClassifierError;
use crate::scoring::ResponseVector;

pub use learned::LearnedClassifier;
pub use range::RangeClassifier;

/// Maps one assessment to a mood band.
pub trait BandClassifier: Send + Sync {
    /// Short identifier for logs (e.g., "range", "learned").
    fn id(&self) -> &str;

    /// Classify a catalog-aligned response vector whose overall score is
    /// `score`.
    fn classify(&self, responses: &ResponseVector, score: f64)
    -> Result<MoodBand, ClassifierError>;

    /// Load or build any state the classifier needs ahead of the first
    /// request. A no-op for stateless strategies.
    fn warm_up(&self) -> Result<(), ClassifierError> {
        Ok(())
    }
}

/// Build the classifier described by `settings` for `catalog`.
pub fn from_settings(
    settings: &ClassifierSettings,
    catalog: Arc<Catalog>,
) -> Result<Box<dyn BandClassifier>, ClassifierError> {
    match settings {
        ClassifierSettings::Range => Ok(Box::new(RangeClassifier)),
        ClassifierSettings::Learned(learned) => {
            Ok(Box::new(LearnedClassifier::new(catalog, learned.clone())?))
        }
    }
}
