use crate::errors::MarginalResult;
use crate::instance::ModelHandle;
use crate::models::CoefficientReport;

/// External persistence/export target for finalized monitoring output.
///
/// Receives one model artifact per fold plus the timing table and the
/// combined coefficient report. Whether artifacts land in files or
/// records — and how single-fold exports are named — is the target's
/// concern.
pub trait IExportTarget {
    /// One serialized model artifact per fold slot.
    fn export_model(&mut self, fold_id: usize, handle: &ModelHandle) -> MarginalResult<()>;

    /// The experiment's timing table: header plus one row per round.
    fn export_timings(&mut self, header: &[String], rows: &[Vec<f64>]) -> MarginalResult<()>;

    /// The combined cross-fold coefficient report, if one was built.
    fn export_coefficients(&mut self, report: &CoefficientReport) -> MarginalResult<()>;
}
