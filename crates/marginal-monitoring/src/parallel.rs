//! Parallel execution of independent cross-validation folds.
//!
//! Folds share no mutable state, so they run as a rayon parallel map;
//! the monitor is written sequentially afterwards, in fold order, which
//! keeps recording deterministic without a lock (each fold writes its
//! slot exactly once per experiment).

use rayon::prelude::*;

use marginal_core::errors::MarginalResult;
use marginal_core::instance::ModelHandle;
use marginal_core::traits::IModel;

use crate::fold::FoldMonitor;

/// Output of one fold's training run.
#[derive(Debug, Clone)]
pub struct FoldRun {
    pub fold_id: usize,
    pub handle: ModelHandle,
    pub exec_time_secs: f64,
}

/// Run `train` once per fold in parallel, then record every result
/// into `monitor` in fold order. The first fold error aborts the
/// whole recording.
pub fn run_folds<F>(
    monitor: &mut FoldMonitor,
    model: &dyn IModel,
    train: F,
) -> MarginalResult<()>
where
    F: Fn(usize) -> MarginalResult<FoldRun> + Send + Sync,
{
    let results: Vec<MarginalResult<FoldRun>> = (0..monitor.num_folds())
        .into_par_iter()
        .map(train)
        .collect();

    for result in results {
        let fold = result?;
        monitor.record(fold.fold_id, model, fold.handle, fold.exec_time_secs)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use marginal_core::errors::{AnnotationError, MarginalError};
    use test_support::FixedMarginModel;

    #[test]
    fn records_every_fold_once() {
        let model = FixedMarginModel::new([]);
        let mut monitor = FoldMonitor::new(4).unwrap();

        run_folds(&mut monitor, &model, |fold_id| {
            Ok(FoldRun {
                fold_id,
                handle: ModelHandle::new(format!("fold-{fold_id}")),
                exec_time_secs: 0.25,
            })
        })
        .unwrap();

        assert!((monitor.total_exec_time() - 1.0).abs() < 1e-12);
        monitor.finalize().unwrap();
    }

    #[test]
    fn a_failing_fold_aborts() {
        let model = FixedMarginModel::new([]);
        let mut monitor = FoldMonitor::new(3).unwrap();

        let err = run_folds(&mut monitor, &model, |fold_id| {
            if fold_id == 1 {
                return Err(AnnotationError::Unavailable {
                    message: "fold 1 down".to_string(),
                }
                .into());
            }
            Ok(FoldRun {
                fold_id,
                handle: ModelHandle::new(format!("fold-{fold_id}")),
                exec_time_secs: 0.25,
            })
        })
        .unwrap_err();

        assert!(matches!(err, MarginalError::Annotation(_)));
    }
}
