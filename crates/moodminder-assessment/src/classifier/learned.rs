//! Learned band classifier.
//!
//! A multinomial logistic regression over standardized response vectors,
//! trained on uniformly random synthetic responses labeled with the
//! overall-score formula. The trained model is cached as JSON; a missing,
//! unreadable or stale cache is replaced by retraining.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use moodminder_core::models::mood::MoodBand;
use moodminder_core::models::responses::{LIKERT_MAX, LIKERT_MIN};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{BandClassifier, RangeClassifier};
use crate::catalog::Catalog;
use crate::config::{LearnedSettings, default_cache_dir};
use crate::error::ClassifierError;
use crate::scoring::{ResponseVector, overall_score};

const CACHE_FILE: &str = "mood_classifier.json";
const HOLDOUT_FRACTION: f64 = 0.2;
const CLASSES: usize = MoodBand::ALL.len();

/// Per-feature standardization fit on the training set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Standardizer {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl Standardizer {
    fn fit(rows: &[Vec<f64>], width: usize) -> Self {
        let n = rows.len().max(1) as f64;

        let mut mean = vec![0.0; width];
        for row in rows {
            for (m, x) in mean.iter_mut().zip(row) {
                *m += x;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut variance = vec![0.0; width];
        for row in rows {
            for ((v, x), m) in variance.iter_mut().zip(row).zip(&mean) {
                *v += (x - m).powi(2);
            }
        }
        let scale = variance
            .into_iter()
            .map(|v| {
                let sd = (v / n).sqrt();
                if sd > 0.0 { sd } else { 1.0 }
            })
            .collect();

        Self { mean, scale }
    }

    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(&self.mean)
            .zip(&self.scale)
            .map(|((x, m), s)| (x - m) / s)
            .collect()
    }
}

/// A trained model plus the metadata needed to tell whether it still fits
/// the catalog and settings in use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedModel {
    pub catalog_version: String,
    pub features: usize,
    pub samples: usize,
    pub seed: u64,
    pub epochs: usize,
    pub learning_rate: f64,
    /// Catalog weights the synthetic labels were computed with, in catalog
    /// order. Catches an edited catalog that kept its version string.
    pub label_weights: Vec<f64>,
    /// Accuracy on the held-out fifth of the synthetic data.
    pub holdout_accuracy: f64,
    scaler: Standardizer,
    /// One row of feature weights per band, in [`MoodBand::ALL`] order.
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl LearnedModel {
    /// Train on `settings.samples` synthetic response vectors. Deterministic
    /// for a given catalog and settings.
    pub fn train(catalog: &Catalog, settings: &LearnedSettings) -> Self {
        let features = catalog.len();
        let mut rng = StdRng::seed_from_u64(settings.seed);

        let samples: Vec<(Vec<f64>, usize)> = (0..settings.samples)
            .map(|_| {
                let values: Vec<u8> = (0..features)
                    .map(|_| rng.gen_range(LIKERT_MIN..=LIKERT_MAX))
                    .collect();
                let label = RangeClassifier::band(overall_score(catalog, &values)).index();
                (values.into_iter().map(f64::from).collect(), label)
            })
            .collect();

        let holdout = (samples.len() as f64 * HOLDOUT_FRACTION) as usize;
        let (train_set, test_set) = samples.split_at(samples.len() - holdout);

        let rows: Vec<Vec<f64>> = train_set.iter().map(|(x, _)| x.clone()).collect();
        let scaler = Standardizer::fit(&rows, features);
        let scaled: Vec<(Vec<f64>, usize)> = train_set
            .iter()
            .map(|(x, y)| (scaler.transform(x), *y))
            .collect();

        let mut model = Self {
            catalog_version: catalog.version().to_string(),
            features,
            samples: settings.samples,
            seed: settings.seed,
            epochs: settings.epochs,
            learning_rate: settings.learning_rate,
            label_weights: catalog_weights(catalog),
            holdout_accuracy: 0.0,
            scaler,
            weights: vec![vec![0.0; features]; CLASSES],
            bias: vec![0.0; CLASSES],
        };
        model.fit(&scaled, settings.epochs, settings.learning_rate);

        let correct = test_set
            .iter()
            .filter(|(x, y)| model.predict_scaled(&model.scaler.transform(x)) == *y)
            .count();
        model.holdout_accuracy = correct as f64 / test_set.len().max(1) as f64;
        model
    }

    /// Full-batch gradient descent on the cross-entropy loss.
    fn fit(&mut self, data: &[(Vec<f64>, usize)], epochs: usize, learning_rate: f64) {
        let n = data.len().max(1) as f64;
        for _ in 0..epochs {
            let mut grad_w = vec![vec![0.0; self.features]; CLASSES];
            let mut grad_b = vec![0.0; CLASSES];

            for (x, label) in data {
                let probs = softmax(&self.logits(x));
                for (class, p) in probs.iter().enumerate() {
                    let err = p - if class == *label { 1.0 } else { 0.0 };
                    grad_b[class] += err;
                    for (g, xi) in grad_w[class].iter_mut().zip(x) {
                        *g += err * xi;
                    }
                }
            }

            for class in 0..CLASSES {
                self.bias[class] -= learning_rate * grad_b[class] / n;
                for (w, g) in self.weights[class].iter_mut().zip(&grad_w[class]) {
                    *w -= learning_rate * g / n;
                }
            }
        }
    }

    fn logits(&self, x: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(x).map(|(w, xi)| w * xi).sum::<f64>() + b)
            .collect()
    }

    fn predict_scaled(&self, x: &[f64]) -> usize {
        self.logits(x)
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(class, _)| class)
            .unwrap_or(MoodBand::Moderate.index())
    }

    pub fn predict(&self, values: &[u8]) -> Result<MoodBand, ClassifierError> {
        if values.len() != self.features {
            return Err(ClassifierError::FeatureMismatch {
                expected: self.features,
                actual: values.len(),
            });
        }
        let raw: Vec<f64> = values.iter().copied().map(f64::from).collect();
        let class = self.predict_scaled(&self.scaler.transform(&raw));
        Ok(MoodBand::from_index(class).unwrap_or(MoodBand::Moderate))
    }

    /// Whether this model was trained for `catalog` with `settings` and has
    /// consistent dimensions. Any training input that differs makes it stale.
    pub fn fits(&self, catalog: &Catalog, settings: &LearnedSettings) -> bool {
        self.catalog_version == catalog.version()
            && self.features == catalog.len()
            && self.samples == settings.samples
            && self.seed == settings.seed
            && self.epochs == settings.epochs
            && self.learning_rate == settings.learning_rate
            && self.label_weights == catalog_weights(catalog)
            && self.scaler.mean.len() == self.features
            && self.scaler.scale.len() == self.features
            && self.bias.len() == CLASSES
            && self.weights.len() == CLASSES
            && self.weights.iter().all(|row| row.len() == self.features)
    }
}

fn catalog_weights(catalog: &Catalog) -> Vec<f64> {
    catalog.questions().iter().map(|q| q.weight).collect()
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// On-disk JSON copy of a trained model.
pub struct ModelCache {
    path: PathBuf,
}

impl ModelCache {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(CACHE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no cache file exists.
    pub fn load(&self) -> Result<Option<LearnedModel>, ClassifierError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ClassifierError::Cache {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Write atomically: tmp file, then rename over the cache file.
    pub fn store(&self, model: &LearnedModel) -> Result<(), ClassifierError> {
        let io_err = |source: std::io::Error| ClassifierError::Cache {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_vec(model)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json).map_err(io_err)?;
        std::fs::rename(&tmp_path, &self.path).map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), "classifier cached");
        Ok(())
    }
}

/// Band classifier backed by a [`LearnedModel`].
///
/// The model is loaded or trained on first use and then shared. The slot is
/// guarded by a mutex so concurrent first calls train only once; a failed
/// initialization leaves the slot empty and the next call tries again.
pub struct LearnedClassifier {
    catalog: Arc<Catalog>,
    settings: LearnedSettings,
    cache: ModelCache,
    model: Mutex<Option<Arc<LearnedModel>>>,
}

impl LearnedClassifier {
    pub fn new(catalog: Arc<Catalog>, settings: LearnedSettings) -> Result<Self, ClassifierError> {
        let dir = settings
            .cache_dir
            .clone()
            .or_else(default_cache_dir)
            .ok_or(ClassifierError::NoCacheDir)?;
        Ok(Self {
            catalog,
            settings,
            cache: ModelCache::in_dir(&dir),
            model: Mutex::new(None),
        })
    }

    pub fn cache(&self) -> &ModelCache {
        &self.cache
    }

    pub fn model(&self) -> Result<Arc<LearnedModel>, ClassifierError> {
        let mut slot = self.model.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(model) = slot.as_ref() {
            return Ok(Arc::clone(model));
        }
        let model = Arc::new(self.load_or_train()?);
        *slot = Some(Arc::clone(&model));
        Ok(model)
    }

    fn load_or_train(&self) -> Result<LearnedModel, ClassifierError> {
        match self.cache.load() {
            Ok(Some(model)) if model.fits(&self.catalog, &self.settings) => {
                tracing::info!(
                    path = %self.cache.path().display(),
                    "loaded cached mood classifier"
                );
                return Ok(model);
            }
            Ok(Some(_)) => {
                tracing::warn!(
                    path = %self.cache.path().display(),
                    "cached mood classifier is stale, retraining"
                );
            }
            Ok(None) => {
                tracing::info!(
                    path = %self.cache.path().display(),
                    "no cached mood classifier, training"
                );
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.cache.path().display(),
                    error = %e,
                    "cached mood classifier unreadable, retraining"
                );
            }
        }

        let model = LearnedModel::train(&self.catalog, &self.settings);
        tracing::info!(
            features = model.features,
            samples = model.samples,
            accuracy = model.holdout_accuracy,
            "mood classifier trained"
        );
        self.cache.store(&model)?;
        Ok(model)
    }
}

impl BandClassifier for LearnedClassifier {
    fn id(&self) -> &str {
        "learned"
    }

    fn classify(
        &self,
        responses: &ResponseVector,
        _score: f64,
    ) -> Result<MoodBand, ClassifierError> {
        self.model()?.predict(responses.as_slice())
    }

    fn warm_up(&self) -> Result<(), ClassifierError> {
        self.model().map(|_| ())
    }
}
