use crate::errors::MarginalResult;
use crate::instance::{InstanceId, LabeledInstance};

/// External annotation collaborator.
///
/// Takes a batch of instance ids and returns their ground-truth
/// labels. The call blocks the round until labels are available; a
/// failure aborts the round (recoverable — the caller may retry after
/// the budget rollback).
pub trait IAnnotator: Send + Sync {
    fn annotate(&self, batch: &[InstanceId]) -> MarginalResult<Vec<LabeledInstance>>;
}
