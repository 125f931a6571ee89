//! Cross-fold aggregation of model coefficients.

use std::collections::BTreeMap;

use marginal_core::errors::{AggregationError, ConfigError};
use marginal_core::models::{CoefficientMap, CoefficientReport, CoefficientStats};

/// Collects per-fold coefficient maps and combines them into one
/// report with per-feature mean and standard deviation.
///
/// Created lazily by the fold monitor on the first fold that actually
/// exposes coefficients; folds without coefficients simply leave their
/// slot empty.
#[derive(Debug, Clone)]
pub struct Coefficients {
    folds: Vec<Option<CoefficientMap>>,
    report: Option<CoefficientReport>,
}

impl Coefficients {
    pub fn new(num_folds: usize) -> Result<Self, ConfigError> {
        if num_folds == 0 {
            return Err(ConfigError::InvalidNumFolds { num_folds });
        }
        Ok(Self {
            folds: vec![None; num_folds],
            report: None,
        })
    }

    pub fn num_folds(&self) -> usize {
        self.folds.len()
    }

    /// Store one fold's coefficients. Last write wins for a slot.
    pub fn add_fold(
        &mut self,
        fold_id: usize,
        coefficients: CoefficientMap,
    ) -> Result<(), ConfigError> {
        if fold_id >= self.folds.len() {
            return Err(ConfigError::FoldIdOutOfRange {
                fold_id,
                num_folds: self.folds.len(),
            });
        }
        self.folds[fold_id] = Some(coefficients);
        Ok(())
    }

    /// Run the deferred cross-fold computation exactly once.
    pub fn final_computations(&mut self) -> Result<(), AggregationError> {
        if self.report.is_some() {
            return Err(AggregationError::AlreadyFinalized);
        }

        let mut features: BTreeMap<String, CoefficientStats> = BTreeMap::new();
        let feature_ids: std::collections::BTreeSet<&String> = self
            .folds
            .iter()
            .flatten()
            .flat_map(|map| map.keys())
            .collect();

        for feature in feature_ids {
            let per_fold: Vec<Option<f64>> = self
                .folds
                .iter()
                .map(|slot| slot.as_ref().and_then(|map| map.get(feature).copied()))
                .collect();
            let present: Vec<f64> = per_fold.iter().flatten().copied().collect();
            let mean = present.iter().sum::<f64>() / present.len() as f64;
            let variance = present
                .iter()
                .map(|w| (w - mean).powi(2))
                .sum::<f64>()
                / present.len() as f64;
            features.insert(
                feature.clone(),
                CoefficientStats {
                    mean,
                    std_dev: variance.sqrt(),
                    per_fold,
                },
            );
        }

        self.report = Some(CoefficientReport {
            num_folds: self.folds.len(),
            features,
        });
        Ok(())
    }

    /// The combined report; `None` until [`Self::final_computations`]
    /// has run.
    pub fn report(&self) -> Option<&CoefficientReport> {
        self.report.as_ref()
    }
}
