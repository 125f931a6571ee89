//! Per-fold monitoring of trained models and their execution times.

use tracing::{debug, info};

use marginal_core::errors::{AggregationError, ConfigError, MarginalResult};
use marginal_core::instance::ModelHandle;
use marginal_core::models::CoefficientReport;
use marginal_core::traits::{IExportTarget, IModel};

use crate::coefficients::Coefficients;

/// Aggregates, across the folds of one experiment, the trained-model
/// handles, the total execution time, and (when the model exposes
/// them) a combined coefficient report.
///
/// Two-phase contract: record every fold, then [`FoldMonitor::finalize`]
/// exactly once, then [`FoldMonitor::export`]. Exporting before
/// finalizing is an [`AggregationError`].
#[derive(Debug)]
pub struct FoldMonitor {
    models: Vec<Option<ModelHandle>>,
    exec_time_secs: f64,
    coefficients: Option<Coefficients>,
    finalized: bool,
}

impl FoldMonitor {
    pub fn new(num_folds: usize) -> Result<Self, ConfigError> {
        if num_folds == 0 {
            return Err(ConfigError::InvalidNumFolds { num_folds });
        }
        Ok(Self {
            models: vec![None; num_folds],
            exec_time_secs: 0.0,
            coefficients: None,
            finalized: false,
        })
    }

    pub fn num_folds(&self) -> usize {
        self.models.len()
    }

    /// Total execution time accumulated over all recorded folds.
    pub fn total_exec_time(&self) -> f64 {
        self.exec_time_secs
    }

    /// Store one fold's trained model and accumulate its exec time.
    ///
    /// Overwriting a slot is allowed (last write wins); the exec time
    /// still accumulates. Coefficients are pulled from the model
    /// capability, and the combined aggregator is created lazily on
    /// the first fold that exposes a non-empty set.
    pub fn record(
        &mut self,
        fold_id: usize,
        model: &dyn IModel,
        handle: ModelHandle,
        exec_time_secs: f64,
    ) -> MarginalResult<()> {
        if self.finalized {
            return Err(AggregationError::AlreadyFinalized.into());
        }
        if fold_id >= self.models.len() {
            return Err(ConfigError::FoldIdOutOfRange {
                fold_id,
                num_folds: self.models.len(),
            }
            .into());
        }

        let coefficients = model.coefficients(&handle)?;
        info!(fold_id, exec_time_secs, model = %handle, "fold recorded");

        self.models[fold_id] = Some(handle);
        self.exec_time_secs += exec_time_secs;

        if let Some(coefficients) = coefficients.filter(|c| !c.is_empty()) {
            if self.coefficients.is_none() {
                debug!(
                    num_folds = self.models.len(),
                    "creating coefficient aggregator"
                );
                self.coefficients = Some(Coefficients::new(self.models.len())?);
            }
            if let Some(aggregator) = &mut self.coefficients {
                aggregator.add_fold(fold_id, coefficients)?;
            }
        }
        Ok(())
    }

    /// Run the deferred cross-fold computations exactly once.
    pub fn finalize(&mut self) -> Result<(), AggregationError> {
        if self.finalized {
            return Err(AggregationError::AlreadyFinalized);
        }
        if let Some(coefficients) = &mut self.coefficients {
            coefficients.final_computations()?;
        }
        self.finalized = true;
        Ok(())
    }

    /// The combined coefficient report, present only after
    /// finalization and only if at least one fold exposed
    /// coefficients.
    pub fn coefficient_report(&self) -> Option<&CoefficientReport> {
        self.coefficients.as_ref().and_then(|c| c.report())
    }

    /// Hand the finalized output to the export collaborator: one model
    /// artifact per fold, plus the coefficient report if one was
    /// built.
    pub fn export(&self, target: &mut dyn IExportTarget) -> MarginalResult<()> {
        if !self.finalized {
            return Err(AggregationError::ExportBeforeFinalize.into());
        }
        for (fold_id, slot) in self.models.iter().enumerate() {
            let handle = slot
                .as_ref()
                .ok_or(AggregationError::MissingFold { fold_id })?;
            target.export_model(fold_id, handle)?;
        }
        if let Some(report) = self.coefficient_report() {
            target.export_coefficients(report)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marginal_core::models::CoefficientMap;
    use test_support::{CollectingExport, FixedMarginModel};

    fn coefs(pairs: &[(&str, f64)]) -> CoefficientMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn single_fold_scenario() {
        // num_folds = 1, exec_time = 4.2, no coefficients.
        let model = FixedMarginModel::new([]);
        let handle = model.fit(&[]).unwrap();

        let mut monitor = FoldMonitor::new(1).unwrap();
        monitor.record(0, &model, handle.clone(), 4.2).unwrap();
        monitor.finalize().unwrap();

        assert_eq!(monitor.total_exec_time(), 4.2);
        assert!(monitor.coefficient_report().is_none());

        let mut export = CollectingExport::new();
        monitor.export(&mut export).unwrap();
        assert_eq!(export.models, vec![(0, handle)]);
        assert!(export.coefficient_report.is_none());
    }

    #[test]
    fn exec_time_sums_across_folds() {
        let model = FixedMarginModel::new([]);
        let mut monitor = FoldMonitor::new(3).unwrap();
        for fold_id in 0..3 {
            let handle = model.fit(&[]).unwrap();
            monitor.record(fold_id, &model, handle, 1.5).unwrap();
        }
        assert!((monitor.total_exec_time() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn coefficients_aggregated_when_present() {
        let model = FixedMarginModel::new([])
            .with_coefficients(coefs(&[("size", 2.0), ("entropy", -1.0)]));
        let mut monitor = FoldMonitor::new(2).unwrap();
        for fold_id in 0..2 {
            let handle = model.fit(&[]).unwrap();
            monitor.record(fold_id, &model, handle, 0.5).unwrap();
        }
        monitor.finalize().unwrap();

        let report = monitor.coefficient_report().unwrap();
        assert_eq!(report.features["size"].mean, 2.0);
        assert_eq!(report.features["size"].std_dev, 0.0);

        let mut export = CollectingExport::new();
        monitor.export(&mut export).unwrap();
        assert!(export.coefficient_report.is_some());
        assert_eq!(export.models.len(), 2);
    }

    #[test]
    fn last_write_wins_per_slot() {
        let model = FixedMarginModel::new([]);
        let first = model.fit(&[]).unwrap();
        let second = model.fit(&[]).unwrap();

        let mut monitor = FoldMonitor::new(1).unwrap();
        monitor.record(0, &model, first, 1.0).unwrap();
        monitor.record(0, &model, second.clone(), 2.0).unwrap();
        monitor.finalize().unwrap();

        let mut export = CollectingExport::new();
        monitor.export(&mut export).unwrap();
        assert_eq!(export.models, vec![(0, second)]);
        // Exec time still accumulates over both writes.
        assert_eq!(monitor.total_exec_time(), 3.0);
    }

    #[test]
    fn export_before_finalize_is_rejected() {
        let model = FixedMarginModel::new([]);
        let handle = model.fit(&[]).unwrap();
        let mut monitor = FoldMonitor::new(1).unwrap();
        monitor.record(0, &model, handle, 1.0).unwrap();

        let mut export = CollectingExport::new();
        let err = monitor.export(&mut export).unwrap_err();
        assert!(matches!(
            err,
            marginal_core::MarginalError::Aggregation(
                AggregationError::ExportBeforeFinalize
            )
        ));
    }

    #[test]
    fn out_of_range_fold_is_a_config_error() {
        let model = FixedMarginModel::new([]);
        let handle = model.fit(&[]).unwrap();
        let mut monitor = FoldMonitor::new(2).unwrap();
        let err = monitor.record(2, &model, handle, 1.0).unwrap_err();
        assert!(matches!(
            err,
            marginal_core::MarginalError::Config(ConfigError::FoldIdOutOfRange { .. })
        ));
    }

    #[test]
    fn missing_fold_blocks_export() {
        let model = FixedMarginModel::new([]);
        let handle = model.fit(&[]).unwrap();
        let mut monitor = FoldMonitor::new(2).unwrap();
        monitor.record(0, &model, handle, 1.0).unwrap();
        monitor.finalize().unwrap();

        let mut export = CollectingExport::new();
        let err = monitor.export(&mut export).unwrap_err();
        assert!(matches!(
            err,
            marginal_core::MarginalError::Aggregation(
                AggregationError::MissingFold { fold_id: 1 }
            )
        ));
    }
}
