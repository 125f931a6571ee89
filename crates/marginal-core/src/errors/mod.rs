//! Error taxonomy for the active-learning core.
//!
//! One enum per subsystem, folded into [`MarginalError`] at the top.
//! No error is silently swallowed; every variant carries enough context
//! (instance id, round number, fold id) to reproduce the failure.

mod aggregation_error;
mod annotation_error;
mod config_error;
mod scoring_error;

pub use aggregation_error::AggregationError;
pub use annotation_error::AnnotationError;
pub use config_error::ConfigError;
pub use scoring_error::ScoringError;

/// Result alias used throughout the workspace.
pub type MarginalResult<T> = Result<T, MarginalError>;

/// Top-level error for the active-learning core.
#[derive(Debug, thiserror::Error)]
pub enum MarginalError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// Model-fit failure is fatal for the experiment: no partial model
    /// is installed and the loop does not continue.
    #[error("model fit failed at round {iter_num}: {message}")]
    FitFailed { iter_num: u32, message: String },
}

impl MarginalError {
    /// True if the caller may retry the operation that produced this
    /// error (currently only annotation failures are retriable).
    pub fn is_retriable(&self) -> bool {
        matches!(self, MarginalError::Annotation(_))
    }
}
