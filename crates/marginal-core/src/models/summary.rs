use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// End-of-experiment summary returned by the iteration driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentSummary {
    /// Identifier of this experiment run.
    pub experiment_id: Uuid,
    /// Number of rounds that reached the recorded state.
    pub rounds_run: u32,
    /// Total annotation queries issued across all rounds.
    pub total_queries: u64,
    /// Final value of the adaptive budget estimate `b_t` (telemetry).
    pub final_budget_estimate: f64,
    /// Total acceptance-probability mass consumed.
    pub used_budget: f64,
}
