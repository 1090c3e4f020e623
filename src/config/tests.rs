use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_cryptosights_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("CRYPTOSIGHTS_QUERY_LOGS");
        env::remove_var("CRYPTOSIGHTS_VALIDATION_OUTPUT");
        env::remove_var("CRYPTOSIGHTS_VECTORISED");
        env::remove_var("CRYPTOSIGHTS_CONFUSION_MATRIX");
        env::remove_var("CRYPTOSIGHTS_PREDICTIONS");
        env::remove_var("CRYPTOSIGHTS_SIMILARITY_THRESHOLD");
        env::remove_var("CRYPTOSIGHTS_TEST_SIZE");
        env::remove_var("CRYPTOSIGHTS_RANDOM_SEED");
        env::remove_var("CRYPTOSIGHTS_SELECTED_MODEL");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.query_logs_path, PathBuf::from("query_logs.json"));
    assert_eq!(
        config.validation_output_path,
        PathBuf::from("validation_results.csv")
    );
    assert_eq!(config.vectorised_path, PathBuf::from("vectorised.csv"));
    assert_eq!(
        config.confusion_matrix_path,
        PathBuf::from("confusion_matrix.png")
    );
    assert_eq!(config.predictions_path, PathBuf::from("predictions.csv"));
    assert_eq!(config.similarity_threshold, 0.6);
    assert_eq!(config.test_size, 0.2);
    assert_eq!(config.random_seed, 42);
    assert_eq!(config.selected_model, ClassifierKind::RandomForest);
}

#[test]
fn test_default_config_validates() {
    assert!(Config::default().validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_cryptosights_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.query_logs_path, PathBuf::from("query_logs.json"));
    assert_eq!(config.random_seed, 42);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_cryptosights_env();

    let config = with_env_vars(
        &[
            ("CRYPTOSIGHTS_QUERY_LOGS", "/data/logs.json"),
            ("CRYPTOSIGHTS_SIMILARITY_THRESHOLD", "0.75"),
            ("CRYPTOSIGHTS_TEST_SIZE", "0.3"),
            ("CRYPTOSIGHTS_RANDOM_SEED", "7"),
            ("CRYPTOSIGHTS_SELECTED_MODEL", "svm"),
        ],
        Config::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.query_logs_path, PathBuf::from("/data/logs.json"));
    assert_eq!(config.similarity_threshold, 0.75);
    assert_eq!(config.test_size, 0.3);
    assert_eq!(config.random_seed, 7);
    assert_eq!(config.selected_model, ClassifierKind::Svm);
}

#[test]
#[serial]
fn test_from_env_blank_path_uses_default() {
    clear_cryptosights_env();

    let config = with_env_vars(&[("CRYPTOSIGHTS_PREDICTIONS", "   ")], Config::from_env)
        .expect("blank values fall back");

    assert_eq!(config.predictions_path, PathBuf::from("predictions.csv"));
}

#[test]
#[serial]
fn test_from_env_bad_threshold() {
    clear_cryptosights_env();

    let result = with_env_vars(
        &[("CRYPTOSIGHTS_SIMILARITY_THRESHOLD", "high")],
        Config::from_env,
    );

    match result {
        Err(ConfigError::FloatParseError { name, .. }) => {
            assert_eq!(name, "CRYPTOSIGHTS_SIMILARITY_THRESHOLD")
        }
        other => panic!("expected a float parse error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_from_env_bad_seed() {
    clear_cryptosights_env();

    let result = with_env_vars(&[("CRYPTOSIGHTS_RANDOM_SEED", "-1")], Config::from_env);

    assert!(matches!(result, Err(ConfigError::IntParseError { .. })));
}

#[test]
#[serial]
fn test_from_env_unknown_model() {
    clear_cryptosights_env();

    let result = with_env_vars(
        &[("CRYPTOSIGHTS_SELECTED_MODEL", "xgboost")],
        Config::from_env,
    );

    match result {
        Err(ConfigError::UnknownClassifier { value }) => assert_eq!(value, "xgboost"),
        other => panic!("expected UnknownClassifier, got {:?}", other),
    }
}

#[test]
fn test_validate_threshold_range() {
    let config = Config {
        similarity_threshold: 1.5,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidThreshold { .. })
    ));

    let config = Config {
        similarity_threshold: -1.0,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_test_size_bounds() {
    for value in [0.0, 1.0, -0.2, f64::NAN] {
        let config = Config {
            test_size: value,
            ..Default::default()
        };
        assert!(
            matches!(config.validate(), Err(ConfigError::InvalidTestSize { .. })),
            "test_size {} should be rejected",
            value
        );
    }
}

#[test]
fn test_validate_empty_input_path() {
    let config = Config {
        vectorised_path: PathBuf::new(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyPath { .. })
    ));
}

#[test]
fn test_validate_output_is_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        predictions_path: dir.path().to_path_buf(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutputIsDirectory { .. })
    ));
}

#[test]
fn test_config_clone() {
    let config = Config {
        random_seed: 99,
        ..Default::default()
    };
    let cloned = config.clone();
    assert_eq!(cloned.random_seed, 99);
}
