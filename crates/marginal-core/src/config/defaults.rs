//! Default values for the experiment configuration.

/// Default budget parameter `b`. Larger values query more aggressively.
pub const DEFAULT_BUDGET: f64 = 1.0;
/// Default maximum number of annotation queries per round.
pub const DEFAULT_BATCH_SIZE: usize = 100;
/// Default number of cross-validation folds.
pub const DEFAULT_NUM_FOLDS: usize = 1;
/// Default number of consecutive empty batches before the experiment
/// is considered exhausted.
pub const DEFAULT_MAX_CONSECUTIVE_EMPTY: u32 = 1;
/// Default seed for the acceptance-draw source.
pub const DEFAULT_SEED: u64 = 0;
