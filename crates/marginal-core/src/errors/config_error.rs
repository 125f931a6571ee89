/// Configuration errors. Fatal, surfaced immediately, never retried.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("budget parameter must be strictly positive, got b = {b}")]
    InvalidBudget { b: f64 },

    #[error("batch size must be at least 1, got {batch}")]
    InvalidBatchSize { batch: usize },

    #[error("num_folds must be at least 1, got {num_folds}")]
    InvalidNumFolds { num_folds: usize },

    #[error("max_consecutive_empty must be at least 1, got {value}")]
    InvalidMaxConsecutiveEmpty { value: u32 },

    #[error("fold id {fold_id} out of range for {num_folds} folds")]
    FoldIdOutOfRange { fold_id: usize, num_folds: usize },

    #[error("configuration parse error: {message}")]
    Parse { message: String },
}
