use marginal_core::config::ExperimentConfig;
use marginal_core::errors::ConfigError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = ExperimentConfig::from_toml("").unwrap();
    assert_eq!(config.b, 1.0);
    assert_eq!(config.batch, 100);
    assert_eq!(config.num_folds, 1);
    assert_eq!(config.max_iterations, None);
    assert_eq!(config.max_consecutive_empty, 1);
    assert_eq!(config.seed, 0);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
b = 2.0
batch = 3
seed = 7
"#;
    let config = ExperimentConfig::from_toml(toml).unwrap();
    assert_eq!(config.b, 2.0);
    assert_eq!(config.batch, 3);
    assert_eq!(config.seed, 7);
    // Non-overridden fields keep defaults
    assert_eq!(config.num_folds, 1);
    assert_eq!(config.max_consecutive_empty, 1);
}

#[test]
fn config_rejects_invalid_budget_from_toml() {
    let err = ExperimentConfig::from_toml("b = -0.5").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBudget { .. }));
}

#[test]
fn config_rejects_malformed_toml() {
    let err = ExperimentConfig::from_toml("b = [not a number").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn config_serde_roundtrip() {
    let config = ExperimentConfig {
        b: 3.5,
        ..Default::default()
    };
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = ExperimentConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.b, config.b);
    assert_eq!(roundtripped.batch, config.batch);
}
