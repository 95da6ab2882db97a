use cortex_core::config::CortexConfig;
use cortex_core::CortexError;

#[test]
fn empty_document_yields_defaults() {
    let config = CortexConfig::from_toml("").unwrap();
    assert_eq!(config.prediction.max_predictions, 20);
    assert_eq!(config.prediction.cache_max_entries, 100);
    assert_eq!(config.retrieval.max_level, 3);
    assert!((config.retrieval.stop_utilization - 0.95).abs() < f64::EPSILON);
    assert!(config.prediction.enable_behavioral);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = CortexConfig::from_toml(
        r#"
        [prediction]
        enable_behavioral = false
        cache_ttl_ms = 1000

        [decay.half_life_overrides]
        episodic = 14
        "#,
    )
    .unwrap();

    assert!(!config.prediction.enable_behavioral);
    assert_eq!(config.prediction.cache_ttl_ms, 1000);
    assert_eq!(config.prediction.min_confidence, 0.3);
    assert_eq!(
        config
            .decay
            .half_life_days(cortex_core::MemoryType::Episodic),
        Some(14)
    );
    assert_eq!(
        config.decay.half_life_days(cortex_core::MemoryType::Core),
        None
    );
}

#[test]
fn inverted_level_range_is_rejected() {
    let err = CortexConfig::from_toml(
        r#"
        [retrieval]
        min_level = 3
        max_level = 1
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, CortexError::InvalidLevelRange { min: 3, max: 1 }));
}

#[test]
fn out_of_range_confidence_is_rejected() {
    let err = CortexConfig::from_toml("[prediction]\nmin_confidence = 1.5\n").unwrap_err();
    assert!(matches!(err, CortexError::ConfigError(_)));
}

#[test]
fn unknown_type_override_is_rejected() {
    let err = CortexConfig::from_toml("[decay.half_life_overrides]\nwidget = 3\n").unwrap_err();
    assert!(matches!(err, CortexError::ConfigError(msg) if msg.contains("widget")));
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = CortexConfig::from_toml("[retrieval\n").unwrap_err();
    assert!(matches!(err, CortexError::ConfigError(_)));
}
