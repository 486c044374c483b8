use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown condition: {0}")]
    UnknownCondition(String),

    #[error("unknown mood band: {0}")]
    UnknownMoodBand(String),

    #[error("unknown activity: {0}")]
    UnknownActivity(String),
}
