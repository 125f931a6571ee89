//! Margin scoring over the external model capability.

use marginal_core::errors::MarginalResult;
use marginal_core::instance::{Instance, ModelHandle};
use marginal_core::traits::IModel;

/// Scores candidates with the current trained model.
///
/// A thin view over the model capability bound to one handle: the
/// margin is the capability's `score` — signed distance to the
/// boundary for binary models, top-two class gap for multiclass.
/// Scoring failures (e.g. dimensionality mismatch) propagate
/// unchanged; they are configuration errors, not retried.
pub struct MarginScorer<'a> {
    model: &'a dyn IModel,
    handle: &'a ModelHandle,
}

impl<'a> MarginScorer<'a> {
    pub fn new(model: &'a dyn IModel, handle: &'a ModelHandle) -> Self {
        Self { model, handle }
    }

    /// Margin of `instance` under the bound model.
    pub fn margin(&self, instance: &Instance) -> MarginalResult<f64> {
        self.model.score(self.handle, instance)
    }

    /// The handle this scorer is bound to.
    pub fn handle(&self) -> &ModelHandle {
        self.handle
    }
}
