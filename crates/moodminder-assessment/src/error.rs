use std::path::PathBuf;

use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog format_version {found} is newer than this build supports ({supported})")]
    UnsupportedFormat { found: u32, supported: u32 },

    #[error("catalog has no questions")]
    Empty,

    #[error("duplicate question id {0}")]
    DuplicateId(u32),

    #[error("question id must be positive")]
    ZeroId,

    #[error("question {id} has {found} options, expected 5")]
    OptionCount { id: u32, found: usize },

    #[error("question {id} has non-positive weight {weight}")]
    Weight { id: u32, weight: f64 },

    #[error("question {id} has an empty category")]
    EmptyCategory { id: u32 },
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier cache I/O error at {path}: {source}")]
    Cache {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("classifier serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("model expects {expected} features, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("no cache directory available for the learned classifier")]
    NoCacheDir,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "config_version {found} is newer than this build supports ({supported}). \
         Please update MoodMinder."
    )]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("config is not a JSON object")]
    NotAnObject,
}
