use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Feature-id → weight mapping as exposed by the model capability for
/// one trained model.
pub type CoefficientMap = BTreeMap<String, f64>;

/// Cross-fold statistics for one feature's coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientStats {
    /// Mean weight across the folds that reported this feature.
    pub mean: f64,
    /// Population standard deviation across those folds.
    pub std_dev: f64,
    /// Raw weight per fold slot; `None` where the fold reported no
    /// coefficients (or not this feature).
    pub per_fold: Vec<Option<f64>>,
}

/// Combined coefficient report across all folds of an experiment,
/// produced by the monitoring layer after finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientReport {
    /// Number of fold slots the aggregation covered.
    pub num_folds: usize,
    /// Per-feature statistics, keyed by feature id.
    pub features: BTreeMap<String, CoefficientStats>,
}
