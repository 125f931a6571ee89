//! Experiment configuration.
//!
//! All knobs the core consumes are explicit, immutable per-experiment
//! parameters passed at construction. No ambient mutable globals.

pub mod defaults;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Configuration for one active-learning experiment.
///
/// Loaded from TOML with every field optional (missing fields take
/// defaults), then validated once with [`ExperimentConfig::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Budget parameter `b` for the acceptance rule. Must be strictly
    /// positive; fixed for the whole experiment.
    pub b: f64,
    /// Maximum number of annotation queries per round.
    pub batch: usize,
    /// Number of cross-validation folds monitored per experiment.
    pub num_folds: usize,
    /// Hard cap on rounds; `None` runs until the pool is exhausted.
    pub max_iterations: Option<u32>,
    /// Number of consecutive empty batches after which the experiment
    /// is treated as exhausted.
    pub max_consecutive_empty: u32,
    /// Seed for the acceptance-draw source. Identical seeds reproduce
    /// identical query decisions.
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            b: defaults::DEFAULT_BUDGET,
            batch: defaults::DEFAULT_BATCH_SIZE,
            num_folds: defaults::DEFAULT_NUM_FOLDS,
            max_iterations: None,
            max_consecutive_empty: defaults::DEFAULT_MAX_CONSECUTIVE_EMPTY,
            seed: defaults::DEFAULT_SEED,
        }
    }
}

impl ExperimentConfig {
    /// Parse a configuration from a TOML string. Missing fields take
    /// their defaults.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants: `b > 0` and finite, `batch >= 1`,
    /// `num_folds >= 1`, `max_consecutive_empty >= 1`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.b.is_finite() && self.b > 0.0) {
            return Err(ConfigError::InvalidBudget { b: self.b });
        }
        if self.batch == 0 {
            return Err(ConfigError::InvalidBatchSize { batch: self.batch });
        }
        if self.num_folds == 0 {
            return Err(ConfigError::InvalidNumFolds {
                num_folds: self.num_folds,
            });
        }
        if self.max_consecutive_empty == 0 {
            return Err(ConfigError::InvalidMaxConsecutiveEmpty {
                value: self.max_consecutive_empty,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_budget() {
        let config = ExperimentConfig {
            b: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBudget { .. })
        ));
    }

    #[test]
    fn rejects_nan_budget() {
        let config = ExperimentConfig {
            b: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_batch() {
        let config = ExperimentConfig {
            batch: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBatchSize { .. })
        ));
    }
}
