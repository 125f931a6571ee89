//! Batch-bounded selective sampling over an ordered candidate pool.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use marginal_core::config::ExperimentConfig;
use marginal_core::errors::{ConfigError, MarginalResult};
use marginal_core::instance::{Instance, InstanceId};
use marginal_core::models::QueryDecision;

use crate::budget::{BudgetSnapshot, BudgetTracker};
use crate::margin::MarginScorer;

/// What one round of sampling produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingOutcome {
    /// Accepted instance ids, in candidate scan order. At most
    /// `batch` long; shorter if the pool ran out first.
    pub batch: Vec<InstanceId>,
    /// Per-candidate decision trace, one entry per scored candidate.
    pub trace: Vec<QueryDecision>,
    /// Wall-clock seconds spent scanning and deciding.
    pub sampling_time_secs: f64,
}

/// The Cesa-Bianchi selective-sampling policy.
///
/// Owns the budget tracker so budget state carries over across rounds
/// of the same experiment. Each round scans the pool in order, scores
/// each candidate exactly once, runs the acceptance test, and stops as
/// soon as the batch quota is filled or the pool is exhausted.
///
/// Determinism: identical pool order, draw sequence, and model state
/// produce identical batches.
pub struct CesaBianchiPolicy {
    batch_size: usize,
    budget: BudgetTracker,
}

impl CesaBianchiPolicy {
    /// Policy configured from the experiment config (seeded PRNG).
    pub fn new(config: &ExperimentConfig) -> Result<Self, ConfigError> {
        Self::with_budget(config.batch, BudgetTracker::new(config.b, config.seed)?)
    }

    /// Policy over an explicit budget tracker.
    pub fn with_budget(batch_size: usize, budget: BudgetTracker) -> Result<Self, ConfigError> {
        if batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize { batch: batch_size });
        }
        Ok(Self { batch_size, budget })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn budget(&self) -> &BudgetTracker {
        &self.budget
    }

    /// Pre-round snapshot of the budget state.
    pub fn budget_snapshot(&self) -> BudgetSnapshot {
        self.budget.snapshot()
    }

    /// Roll the budget state back after an aborted round.
    pub fn restore_budget(&mut self, snapshot: BudgetSnapshot) {
        self.budget.restore(snapshot);
    }

    /// Run one round of selective sampling over `pool`.
    ///
    /// A scoring failure aborts the scan and propagates; the caller is
    /// responsible for restoring the pre-round budget snapshot.
    pub fn run_round(
        &mut self,
        scorer: &MarginScorer<'_>,
        pool: &[Instance],
    ) -> MarginalResult<SamplingOutcome> {
        let started = Instant::now();
        let mut batch = Vec::new();
        let mut trace = Vec::new();

        for instance in pool {
            if batch.len() >= self.batch_size {
                break;
            }
            let margin = scorer.margin(instance)?;
            let decision = self.budget.evaluate(instance.id, margin);
            if decision.accepted {
                batch.push(instance.id);
            }
            trace.push(decision);
        }

        let sampling_time_secs = started.elapsed().as_secs_f64();
        info!(
            scanned = trace.len(),
            accepted = batch.len(),
            batch_size = self.batch_size,
            budget_estimate = self.budget.budget_estimate(),
            "sampling round complete"
        );

        Ok(SamplingOutcome {
            batch,
            trace,
            sampling_time_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marginal_core::traits::IModel;
    use test_support::{FixedMarginModel, ScriptedDraws};

    fn policy(b: f64, batch: usize, draws: Vec<f64>) -> CesaBianchiPolicy {
        let budget =
            BudgetTracker::with_draw_source(b, Box::new(ScriptedDraws::new(draws))).unwrap();
        CesaBianchiPolicy::with_budget(batch, budget).unwrap()
    }

    fn pool(ids: &[u64]) -> Vec<Instance> {
        ids.iter().map(|&id| Instance::new(id, vec![0.0])).collect()
    }

    #[test]
    fn published_scenario_accepts_positions_0_2_3() {
        // b = 2.0, batch = 3, margins [0.0, 5.0, 1.0, 0.0],
        // draws [0.1, 0.9, 0.3, 0.05]
        // => probabilities [1.0, 2/7, 2/3, 1.0]
        // => accepted [true, false, true, true].
        let model =
            FixedMarginModel::new([(0, 0.0), (1, 5.0), (2, 1.0), (3, 0.0), (4, 0.0)]);
        let handle = model.fit(&[]).unwrap();
        let scorer = MarginScorer::new(&model, &handle);
        let mut policy = policy(2.0, 3, vec![0.1, 0.9, 0.3, 0.05]);

        let outcome = policy
            .run_round(&scorer, &pool(&[0, 1, 2, 3, 4]))
            .unwrap();

        assert_eq!(
            outcome.batch,
            vec![InstanceId(0), InstanceId(2), InstanceId(3)]
        );
        // Candidate 4 was never scanned: the quota was reached first.
        assert_eq!(outcome.trace.len(), 4);
        let probs: Vec<f64> = outcome.trace.iter().map(|d| d.probability).collect();
        assert!((probs[0] - 1.0).abs() < 1e-12);
        assert!((probs[1] - 2.0 / 7.0).abs() < 1e-12);
        assert!((probs[2] - 2.0 / 3.0).abs() < 1e-12);
        assert!((probs[3] - 1.0).abs() < 1e-12);
        let accepts: Vec<bool> = outcome.trace.iter().map(|d| d.accepted).collect();
        assert_eq!(accepts, vec![true, false, true, true]);
    }

    #[test]
    fn batch_never_exceeds_quota() {
        // Every candidate is on the boundary, so every draw accepts.
        let model = FixedMarginModel::new((0..10).map(|id| (id, 0.0)));
        let handle = model.fit(&[]).unwrap();
        let scorer = MarginScorer::new(&model, &handle);
        let mut policy = policy(1.0, 4, vec![0.5; 10]);

        let ids: Vec<u64> = (0..10).collect();
        let outcome = policy.run_round(&scorer, &pool(&ids)).unwrap();
        assert_eq!(outcome.batch.len(), 4);
        assert_eq!(outcome.trace.len(), 4);
    }

    #[test]
    fn short_batch_when_pool_runs_out() {
        let model = FixedMarginModel::new([(0, 0.0), (1, 0.0)]);
        let handle = model.fit(&[]).unwrap();
        let scorer = MarginScorer::new(&model, &handle);
        let mut policy = policy(1.0, 5, vec![0.5, 0.5]);

        let outcome = policy.run_round(&scorer, &pool(&[0, 1])).unwrap();
        assert_eq!(outcome.batch.len(), 2);
    }

    #[test]
    fn budget_state_carries_over_between_rounds() {
        let model = FixedMarginModel::new([(0, 5.0), (1, 5.0)]);
        let handle = model.fit(&[]).unwrap();
        let scorer = MarginScorer::new(&model, &handle);
        let mut policy = policy(2.0, 3, vec![0.99, 0.99]);

        policy.run_round(&scorer, &pool(&[0])).unwrap();
        let after_first = policy.budget().budget_estimate();
        policy.run_round(&scorer, &pool(&[1])).unwrap();
        assert!(policy.budget().budget_estimate() < after_first);
        assert_eq!(policy.budget().candidates_evaluated(), 2);
    }

    #[test]
    fn identical_seeds_give_identical_batches() {
        let model = FixedMarginModel::new((0..20).map(|id| (id, (id as f64) * 0.3)));
        let handle = model.fit(&[]).unwrap();
        let ids: Vec<u64> = (0..20).collect();

        let run = |seed: u64| {
            let scorer = MarginScorer::new(&model, &handle);
            let mut policy = CesaBianchiPolicy::with_budget(
                5,
                BudgetTracker::new(1.5, seed).unwrap(),
            )
            .unwrap();
            policy.run_round(&scorer, &pool(&ids)).unwrap().batch
        };

        assert_eq!(run(7), run(7));
    }
}
