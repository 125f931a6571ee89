use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::QueryDecision;
use crate::instance::InstanceId;

/// Statistics for one completed active-learning round.
///
/// Created when the round reaches its recorded state and handed to the
/// monitoring layer; the round itself is then gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Increasing round counter, starting at 1.
    pub iter_num: u32,
    /// When the round started.
    pub started_at: DateTime<Utc>,
    /// Accepted instance ids, in candidate scan order.
    pub batch: Vec<InstanceId>,
    /// Full per-candidate decision trace for the round.
    pub decisions: Vec<QueryDecision>,
    /// Wall-clock seconds spent scanning and deciding.
    pub sampling_time_secs: f64,
    /// Wall-clock seconds spent refitting the model.
    pub fit_time_secs: f64,
}
