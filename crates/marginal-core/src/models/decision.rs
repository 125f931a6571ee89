use serde::{Deserialize, Serialize};

use crate::instance::InstanceId;

/// Per-candidate outcome of the acceptance test, kept for the full
/// round as an audit trace. Never cached beyond the round that
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDecision {
    /// The candidate that was evaluated.
    pub instance_id: InstanceId,
    /// Margin computed for the candidate (signed; near zero = uncertain).
    pub margin: f64,
    /// Acceptance probability `b / (b + |margin|)`.
    pub probability: f64,
    /// Whether the draw accepted the candidate for annotation.
    pub accepted: bool,
}
