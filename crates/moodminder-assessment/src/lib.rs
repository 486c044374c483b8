//! moodminder-assessment
//!
//! The mood-assessment and condition-detection engine. Turns questionnaire
//! responses (and optional mini-game telemetry) into an [`AnalysisResult`]:
//! a weighted mood score, a mood band, per-category sub-scores, detected
//! condition signals and recommended activities.
//!
//! Everything here is synchronous and in-memory. The only I/O is the optional
//! learned classifier's on-disk cache and loading a catalog or config file
//! when asked to.
//!
//! [`AnalysisResult`]: moodminder_core::models::analysis::AnalysisResult

pub mod catalog;
pub mod classifier;
pub mod compose;
pub mod conditions;
pub mod config;
pub mod engine;
pub mod error;
pub mod games;
pub mod profiles;
pub mod scoring;

pub use engine::MoodAssessor;
