/// Monitoring/aggregation contract violations. These indicate a
/// programming error in the caller, not a runtime condition; fatal.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("export requested before finalize")]
    ExportBeforeFinalize,

    #[error("finalize called twice")]
    AlreadyFinalized,

    #[error("timing row has {actual} values but the header has {expected} columns")]
    RowArityMismatch { expected: usize, actual: usize },

    #[error("timing source declares {titles} display series for {columns} header columns")]
    TitleArityMismatch { columns: usize, titles: usize },

    #[error("no model recorded for fold {fold_id}")]
    MissingFold { fold_id: usize },
}
