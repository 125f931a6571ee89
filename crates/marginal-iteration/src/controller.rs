//! The per-round state machine of one active-learning experiment.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use marginal_core::config::ExperimentConfig;
use marginal_core::errors::{MarginalError, MarginalResult};
use marginal_core::instance::{LabeledInstance, ModelHandle};
use marginal_core::models::{CoefficientMap, ExperimentSummary, RoundRecord};
use marginal_core::traits::{IAnnotator, ICandidatePool, IModel};
use marginal_monitoring::{ExecTimeReport, FitTimings, Prepended, SamplingTimings};
use marginal_sampling::{CesaBianchiPolicy, MarginScorer};

/// Where the controller currently is in the round cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Between rounds; the next call starts round `iter_num + 1`.
    Ready,
    /// Scanning candidates and running acceptance tests.
    Sampling,
    /// Annotating the batch and refitting the model.
    Retraining,
    /// Round statistics handed off; transient before `Ready`.
    Recorded,
    /// Terminal: pool empty, round cap reached, or too many
    /// consecutive empty batches.
    Exhausted,
}

/// Result of driving one round.
#[derive(Debug, Clone)]
pub enum RoundStatus {
    /// The round completed and its statistics were recorded.
    Completed(RoundRecord),
    /// The experiment is exhausted; no round was run.
    Exhausted,
}

/// Drives the sample → annotate → retrain → record cycle.
///
/// Strictly sequential within one experiment: round `n + 1` scores
/// margins with the model retrained in round `n`. The controller owns
/// the policy (and through it the budget state) plus the per-round
/// timing report; cross-fold monitoring lives with the caller.
pub struct IterationController {
    config: ExperimentConfig,
    experiment_id: Uuid,
    model: Arc<dyn IModel>,
    pool: Arc<dyn ICandidatePool>,
    annotator: Arc<dyn IAnnotator>,
    policy: CesaBianchiPolicy,
    timings: Prepended<FitTimings, SamplingTimings>,
    report: ExecTimeReport,
    labeled: Vec<LabeledInstance>,
    current: ModelHandle,
    state: RoundState,
    iter_num: u32,
    consecutive_empty: u32,
}

impl IterationController {
    /// Validate the configuration, fit the initial model on the seed
    /// labeled set, and stand ready for round 1.
    pub fn new(
        config: ExperimentConfig,
        model: Arc<dyn IModel>,
        pool: Arc<dyn ICandidatePool>,
        annotator: Arc<dyn IAnnotator>,
        seed_labeled: Vec<LabeledInstance>,
    ) -> MarginalResult<Self> {
        config.validate()?;
        let policy = CesaBianchiPolicy::new(&config)?;
        let current = model
            .fit(&seed_labeled)
            .map_err(|e| MarginalError::FitFailed {
                iter_num: 0,
                message: e.to_string(),
            })?;
        let timings = Prepended::new(FitTimings, SamplingTimings);
        let report = ExecTimeReport::new(&timings)?;
        let experiment_id = Uuid::new_v4();
        info!(%experiment_id, b = config.b, batch = config.batch, "experiment initialized");
        Ok(Self {
            config,
            experiment_id,
            model,
            pool,
            annotator,
            policy,
            timings,
            report,
            labeled: seed_labeled,
            current,
            state: RoundState::Ready,
            iter_num: 0,
            consecutive_empty: 0,
        })
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Rounds completed so far.
    pub fn iter_num(&self) -> u32 {
        self.iter_num
    }

    pub fn experiment_id(&self) -> Uuid {
        self.experiment_id
    }

    /// Handle of the most recently fitted model.
    pub fn current_model(&self) -> &ModelHandle {
        &self.current
    }

    /// Size of the labeled set, including the seed instances.
    pub fn labeled_len(&self) -> usize {
        self.labeled.len()
    }

    /// Per-round timing table built so far.
    pub fn exec_time_report(&self) -> &ExecTimeReport {
        &self.report
    }

    /// Coefficients of the current model, if it exposes any.
    pub fn current_coefficients(&self) -> MarginalResult<Option<CoefficientMap>> {
        self.model.coefficients(&self.current)
    }

    /// Run one round, or report exhaustion.
    ///
    /// Failure semantics: an annotation failure aborts the round with
    /// budget state rolled back (retriable — call again); a scoring
    /// failure abandons the round the same way; a fit failure is fatal
    /// and leaves the controller exhausted with the previous model
    /// still installed.
    pub fn run_round(&mut self) -> MarginalResult<RoundStatus> {
        if self.state == RoundState::Exhausted {
            return Ok(RoundStatus::Exhausted);
        }
        if let Some(max) = self.config.max_iterations {
            if self.iter_num >= max {
                info!(iter_num = self.iter_num, "round cap reached");
                self.state = RoundState::Exhausted;
                return Ok(RoundStatus::Exhausted);
            }
        }

        let pool = self.pool.candidates()?;
        if pool.is_empty() {
            info!(iter_num = self.iter_num, "candidate pool exhausted");
            self.state = RoundState::Exhausted;
            return Ok(RoundStatus::Exhausted);
        }

        let iter_num = self.iter_num + 1;
        let started_at = Utc::now();
        let snapshot = self.policy.budget_snapshot();
        self.state = RoundState::Sampling;
        info!(iter_num, pool = pool.len(), "round started");

        let scorer = MarginScorer::new(self.model.as_ref(), &self.current);
        let outcome = match self.policy.run_round(&scorer, &pool) {
            Ok(outcome) => outcome,
            Err(e) => {
                // Scoring failed: abandon the round without budget mutation.
                warn!(iter_num, error = %e, "sampling aborted");
                self.policy.restore_budget(snapshot);
                self.state = RoundState::Ready;
                return Err(e);
            }
        };

        self.state = RoundState::Retraining;
        if outcome.batch.is_empty() {
            self.consecutive_empty += 1;
        } else {
            self.consecutive_empty = 0;
            let labeled = match self.annotator.annotate(&outcome.batch) {
                Ok(labeled) => labeled,
                Err(e) => {
                    // Recoverable: roll back to the pre-round snapshot so
                    // the caller may retry the same round.
                    warn!(iter_num, error = %e, "annotation failed, round aborted");
                    self.policy.restore_budget(snapshot);
                    self.state = RoundState::Ready;
                    return Err(e);
                }
            };
            self.labeled.extend(labeled);
        }

        let fit_started = Instant::now();
        let new_handle = match self.model.fit(&self.labeled) {
            Ok(handle) => handle,
            Err(e) => {
                // Fatal: no partial model is installed.
                self.state = RoundState::Exhausted;
                return Err(MarginalError::FitFailed {
                    iter_num,
                    message: e.to_string(),
                });
            }
        };
        let fit_time_secs = fit_started.elapsed().as_secs_f64();
        self.current = new_handle;

        let record = RoundRecord {
            iter_num,
            started_at,
            batch: outcome.batch,
            decisions: outcome.trace,
            sampling_time_secs: outcome.sampling_time_secs,
            fit_time_secs,
        };
        self.report.add_round(&self.timings, &record)?;
        self.iter_num = iter_num;
        self.state = RoundState::Recorded;
        info!(
            iter_num,
            queried = record.batch.len(),
            labeled = self.labeled.len(),
            budget_estimate = self.policy.budget().budget_estimate(),
            "round recorded"
        );

        if record.batch.is_empty() && self.consecutive_empty >= self.config.max_consecutive_empty
        {
            info!(
                iter_num,
                consecutive_empty = self.consecutive_empty,
                "exhausted after consecutive empty batches"
            );
            self.state = RoundState::Exhausted;
        } else {
            self.state = RoundState::Ready;
        }
        Ok(RoundStatus::Completed(record))
    }

    /// Drive rounds until the experiment is exhausted.
    pub fn run(&mut self) -> MarginalResult<ExperimentSummary> {
        loop {
            match self.run_round()? {
                RoundStatus::Completed(_) => continue,
                RoundStatus::Exhausted => break,
            }
        }
        Ok(self.summary())
    }

    /// Summary of the experiment so far.
    pub fn summary(&self) -> ExperimentSummary {
        let budget = self.policy.budget();
        ExperimentSummary {
            experiment_id: self.experiment_id,
            rounds_run: self.iter_num,
            total_queries: budget.queries_issued(),
            final_budget_estimate: budget.budget_estimate(),
            used_budget: budget.used_budget(),
        }
    }
}
