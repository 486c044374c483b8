use std::collections::BTreeMap;
use std::sync::Arc;

use moodminder_core::models::analysis::AnalysisResult;
use moodminder_core::models::condition::Condition;
use moodminder_core::models::game::GameTelemetry;
use moodminder_core::models::mood::MoodBand;
use moodminder_core::models::responses::Responses;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::{Catalog, Question};
use crate::classifier::{self, BandClassifier};
use crate::compose::compose;
use crate::conditions;
use crate::config::{AssessmentConfig, ClassifierSettings};
use crate::error::AssessmentError;
use crate::games;
use crate::scoring::{self, MoodScore, ValidationError};

/// The assessment engine: a loaded catalog plus the band classifier.
///
/// Build one at startup and share it (`&MoodAssessor` or `Arc<MoodAssessor>`);
/// every request works on its own input and the only shared state is the
/// classifier's lazily loaded model.
pub struct MoodAssessor {
    catalog: Arc<Catalog>,
    classifier: Box<dyn BandClassifier>,
}

impl MoodAssessor {
    pub fn new(config: &AssessmentConfig) -> Result<Self, AssessmentError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin()?,
        };
        Self::with_catalog(catalog, &config.classifier)
    }

    pub fn with_catalog(
        catalog: Catalog,
        classifier: &ClassifierSettings,
    ) -> Result<Self, AssessmentError> {
        let catalog = Arc::new(catalog);
        let classifier = classifier::from_settings(classifier, Arc::clone(&catalog))?;
        tracing::debug!(
            catalog_version = catalog.version(),
            questions = catalog.len(),
            classifier = classifier.id(),
            "mood assessor ready"
        );
        Ok(Self {
            catalog,
            classifier,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn classifier_id(&self) -> &str {
        self.classifier.id()
    }

    /// Overall score and per-category sub-scores.
    pub fn score(&self, responses: &Responses) -> Result<MoodScore, ValidationError> {
        let vector = scoring::normalize(&self.catalog, responses)?;
        Ok(scoring::score(&self.catalog, &vector))
    }

    pub fn classify(&self, responses: &Responses) -> Result<MoodBand, AssessmentError> {
        let vector = scoring::normalize(&self.catalog, responses)?;
        let score = scoring::score(&self.catalog, &vector);
        Ok(self.classifier.classify(&vector, score.overall)?)
    }

    /// Severity score for every condition the catalog covers.
    pub fn detect_conditions(
        &self,
        responses: &Responses,
    ) -> Result<BTreeMap<Condition, f64>, ValidationError> {
        let vector = scoring::normalize(&self.catalog, responses)?;
        Ok(conditions::detect(&self.catalog, &vector))
    }

    /// Run a full assessment.
    pub fn get_mood_analysis(
        &self,
        responses: &Responses,
        games: Option<&GameTelemetry>,
    ) -> Result<AnalysisResult, AssessmentError> {
        let vector = scoring::normalize(&self.catalog, responses)?;
        let MoodScore {
            overall,
            categories,
        } = scoring::score(&self.catalog, &vector);
        let band = self.classifier.classify(&vector, overall)?;
        let condition_scores = conditions::detect(&self.catalog, &vector);
        let game_analysis = games::analyze(games);

        let result = compose(overall, categories, band, condition_scores, game_analysis);
        tracing::debug!(
            score = result.overall_score,
            band = %result.mood_category,
            detected = ?result.detected_conditions.keys().collect::<Vec<_>>(),
            "mood analysis complete"
        );
        Ok(result)
    }

    /// `count` distinct questions for a quick mood check, drawn uniformly
    /// without replacement. More than the catalog holds returns all of them.
    pub fn get_random_questions(&self, count: usize) -> Vec<Question> {
        self.sample_questions(count, &mut rand::thread_rng())
    }

    pub fn sample_questions<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Question> {
        self.catalog
            .questions()
            .choose_multiple(rng, count)
            .cloned()
            .collect()
    }

    /// Load or train the classifier ahead of the first request.
    pub fn warm_up(&self) -> Result<(), AssessmentError> {
        Ok(self.classifier.warm_up()?)
    }
}
