//! # marginal-sampling
//!
//! Selective-sampling decision procedure: margin scoring over the
//! external model capability, the Cesa-Bianchi budget-aware acceptance
//! rule, and the batch-bounded query selection policy.

pub mod budget;
pub mod margin;
pub mod policy;

pub use budget::{BudgetSnapshot, BudgetTracker, SeededDraws};
pub use margin::MarginScorer;
pub use policy::{CesaBianchiPolicy, SamplingOutcome};
