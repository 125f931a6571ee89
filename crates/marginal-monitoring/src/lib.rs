//! # marginal-monitoring
//!
//! Aggregation of per-fold execution statistics and model-interpretation
//! artifacts: the fold monitor, the cross-fold coefficient aggregator,
//! the per-round timing report, and a rayon-backed parallel fold runner.

pub mod coefficients;
pub mod exec_time;
pub mod fold;
pub mod parallel;

pub use coefficients::Coefficients;
pub use exec_time::{ExecTimeReport, FitTimings, Prepended, SamplingTimings, TimingSource};
pub use fold::FoldMonitor;
pub use parallel::{run_folds, FoldRun};
