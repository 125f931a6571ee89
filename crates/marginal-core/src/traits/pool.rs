use crate::errors::MarginalResult;
use crate::instance::Instance;

/// External provider of the unlabeled candidate pool.
///
/// Yields a finite, ordered snapshot of the currently-unlabeled
/// instances. The core treats it as read-only; dropping annotated
/// instances from subsequent snapshots is the provider's concern.
pub trait ICandidatePool: Send + Sync {
    /// Current unlabeled candidates, in scan order.
    fn candidates(&self) -> MarginalResult<Vec<Instance>>;
}
