//! The Cesa-Bianchi budget-aware acceptance rule.
//!
//! For a candidate with margin `m`, the acceptance probability is
//! `p = b / (b + |m|)` with the fixed budget parameter `b > 0`; a
//! uniform draw `u` triggers a query iff `u < p`. The adaptive
//! estimate `b_t` follows `b_{t+1} = b_t - 1 + p_t` after every
//! evaluated candidate. `b_t` is telemetry: it may go negative and
//! never gates the accept decision — only the fixed `b` does.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use marginal_core::errors::ConfigError;
use marginal_core::instance::InstanceId;
use marginal_core::models::QueryDecision;
use marginal_core::traits::IDrawSource;

/// Seeded PRNG draw source. Identical seeds reproduce identical
/// query decisions.
pub struct SeededDraws {
    rng: StdRng,
}

impl SeededDraws {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IDrawSource for SeededDraws {
    fn next_draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Point-in-time copy of the tracker's numeric state, taken before a
/// round so a failed round can be rolled back.
///
/// The draw source is not rewound: a retried round consumes fresh
/// draws, but no budget mass from the failed attempt is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    pub budget_estimate: f64,
    pub queries_issued: u64,
    pub used_budget: f64,
    pub candidates_evaluated: u64,
}

/// Depleting budget state for one experiment.
///
/// `b` is immutable after construction; the counters only increase
/// within an experiment (restore from a [`BudgetSnapshot`] is the one
/// sanctioned exception) and reset only at experiment boundary.
pub struct BudgetTracker {
    /// Fixed acceptance parameter, strictly positive.
    b: f64,
    /// Adaptive estimate `b_t`; starts at `b`, may go negative.
    budget_estimate: f64,
    /// Queries issued so far.
    queries_issued: u64,
    /// Acceptance-probability mass consumed so far.
    used_budget: f64,
    /// Candidates evaluated so far (queried or not).
    candidates_evaluated: u64,
    draws: Box<dyn IDrawSource>,
}

impl BudgetTracker {
    /// Tracker seeded with the default PRNG draw source.
    pub fn new(b: f64, seed: u64) -> Result<Self, ConfigError> {
        Self::with_draw_source(b, Box::new(SeededDraws::new(seed)))
    }

    /// Tracker over an explicit draw source (tests script the draws).
    pub fn with_draw_source(
        b: f64,
        draws: Box<dyn IDrawSource>,
    ) -> Result<Self, ConfigError> {
        if !(b.is_finite() && b > 0.0) {
            return Err(ConfigError::InvalidBudget { b });
        }
        Ok(Self {
            b,
            budget_estimate: b,
            queries_issued: 0,
            used_budget: 0.0,
            candidates_evaluated: 0,
            draws,
        })
    }

    /// The fixed budget parameter.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Current adaptive estimate `b_t` (telemetry only).
    pub fn budget_estimate(&self) -> f64 {
        self.budget_estimate
    }

    pub fn queries_issued(&self) -> u64 {
        self.queries_issued
    }

    pub fn used_budget(&self) -> f64 {
        self.used_budget
    }

    pub fn candidates_evaluated(&self) -> u64 {
        self.candidates_evaluated
    }

    /// Acceptance probability for a margin: `b / (b + |m|)`, clipped
    /// to [0, 1]. A margin of zero (on the boundary) yields 1.
    pub fn acceptance_probability(&self, margin: f64) -> f64 {
        (self.b / (self.b + margin.abs())).clamp(0.0, 1.0)
    }

    /// Run the acceptance test for one candidate and update the
    /// budget state.
    pub fn evaluate(&mut self, instance_id: InstanceId, margin: f64) -> QueryDecision {
        let probability = self.acceptance_probability(margin);
        let draw = self.draws.next_draw();
        let accepted = draw < probability;

        self.budget_estimate += probability - 1.0;
        self.used_budget += probability;
        self.candidates_evaluated += 1;
        if accepted {
            self.queries_issued += 1;
        }

        debug!(
            %instance_id,
            margin,
            probability,
            draw,
            accepted,
            budget_estimate = self.budget_estimate,
            "acceptance test"
        );

        QueryDecision {
            instance_id,
            margin,
            probability,
            accepted,
        }
    }

    /// Copy of the numeric state for pre-round rollback.
    pub fn snapshot(&self) -> BudgetSnapshot {
        BudgetSnapshot {
            budget_estimate: self.budget_estimate,
            queries_issued: self.queries_issued,
            used_budget: self.used_budget,
            candidates_evaluated: self.candidates_evaluated,
        }
    }

    /// Roll the numeric state back to a snapshot taken earlier.
    pub fn restore(&mut self, snapshot: BudgetSnapshot) {
        self.budget_estimate = snapshot.budget_estimate;
        self.queries_issued = snapshot.queries_issued;
        self.used_budget = snapshot.used_budget;
        self.candidates_evaluated = snapshot.candidates_evaluated;
    }
}

impl std::fmt::Debug for BudgetTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetTracker")
            .field("b", &self.b)
            .field("budget_estimate", &self.budget_estimate)
            .field("queries_issued", &self.queries_issued)
            .field("used_budget", &self.used_budget)
            .field("candidates_evaluated", &self.candidates_evaluated)
            .finish_non_exhaustive()
    }
}
