use crate::instance::InstanceId;

/// Scoring errors from the model capability. Fatal for the round that
/// hit them; the round is abandoned without mutating budget state.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("feature dimensionality mismatch: model expects {expected}, instance {instance_id} has {actual}")]
    DimensionMismatch {
        instance_id: InstanceId,
        expected: usize,
        actual: usize,
    },

    #[error("model could not score instance {instance_id}: {message}")]
    ScoreFailed {
        instance_id: InstanceId,
        message: String,
    },

    #[error("no trained model available for scoring")]
    ModelUnavailable,
}
