use marginal_core::errors::*;
use marginal_core::instance::InstanceId;

#[test]
fn config_error_messages_carry_values() {
    let err = ConfigError::InvalidBudget { b: -1.5 };
    assert!(err.to_string().contains("-1.5"));

    let err = ConfigError::FoldIdOutOfRange {
        fold_id: 5,
        num_folds: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains('5') && msg.contains('3'));
}

#[test]
fn scoring_error_carries_instance_context() {
    let err = ScoringError::DimensionMismatch {
        instance_id: InstanceId(12),
        expected: 30,
        actual: 28,
    };
    let msg = err.to_string();
    assert!(msg.contains("12") && msg.contains("30") && msg.contains("28"));
}

#[test]
fn top_level_error_converts_from_subsystems() {
    let err: MarginalError = ConfigError::InvalidBatchSize { batch: 0 }.into();
    assert!(matches!(err, MarginalError::Config(_)));
    assert!(!err.is_retriable());

    let err: MarginalError = AnnotationError::Unavailable {
        message: "down".to_string(),
    }
    .into();
    assert!(err.is_retriable());
}

#[test]
fn fit_failure_names_the_round() {
    let err = MarginalError::FitFailed {
        iter_num: 4,
        message: "singular matrix".to_string(),
    };
    assert!(err.to_string().contains("round 4"));
}
