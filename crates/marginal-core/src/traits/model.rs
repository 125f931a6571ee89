use crate::errors::MarginalResult;
use crate::instance::{Instance, LabeledInstance, ModelHandle};
use crate::models::CoefficientMap;

/// External model capability: fit, score, coefficients.
///
/// The core never inspects model structure beyond these three
/// operations. `score` returns the real-valued margin of an instance:
/// signed distance to the decision boundary for binary classifiers, or
/// the gap between the top two class scores for multiclass. Larger
/// `|margin|` means more confident, hence less informative.
pub trait IModel: Send + Sync {
    /// Train a model on the labeled set and return a handle to it.
    fn fit(&self, labeled: &[LabeledInstance]) -> MarginalResult<ModelHandle>;

    /// Margin of `instance` under the model behind `handle`.
    ///
    /// Fails with a `ScoringError` if the instance's feature
    /// dimensionality does not match the model's — a schema error,
    /// never retried.
    fn score(&self, handle: &ModelHandle, instance: &Instance) -> MarginalResult<f64>;

    /// Feature coefficients of the trained model, if it exposes any.
    fn coefficients(&self, handle: &ModelHandle) -> MarginalResult<Option<CoefficientMap>>;
}
