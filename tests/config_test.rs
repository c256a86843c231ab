use std::fs;

use redraft::infrastructure::config::{ConfigLoader, CONFIG_DIR};
use tempfile::TempDir;

fn project_with(config_yaml: &str) -> TempDir {
    let root = TempDir::new().unwrap();
    let dir = root.path().join(CONFIG_DIR);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yaml"), config_yaml).unwrap();
    root
}

#[test]
fn test_project_file_overrides_defaults() {
    let root = project_with(
        "optimizer:\n  score_threshold: 20.0\n  max_escalations: 2\nrate_limit:\n  requests_per_second: 0.5\n",
    );
    let config = ConfigLoader::load_from_dir(root.path()).unwrap();

    assert!((config.optimizer.score_threshold - 20.0).abs() < f64::EPSILON);
    assert_eq!(config.optimizer.max_escalations, 2);
    assert!((config.rate_limit.requests_per_second - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.rate_limit.burst_size, 4);
}

#[test]
fn test_env_overrides_nested_keys() {
    let root = project_with("provider:\n  model: from-file\n");
    temp_env::with_vars(
        [
            ("REDRAFT_PROVIDER__MODEL", Some("from-env")),
            ("REDRAFT_OPTIMIZER__MAX_ESCALATIONS", Some("1")),
        ],
        || {
            let config = ConfigLoader::load_from_dir(root.path()).unwrap();
            assert_eq!(config.provider.model, "from-env");
            assert_eq!(config.optimizer.max_escalations, 1);
        },
    );
}

#[test]
fn test_invalid_values_fail_validation() {
    let root = project_with("logging:\n  format: xml\n");
    let err = ConfigLoader::load_from_dir(root.path()).unwrap_err();
    assert!(err.to_string().contains("xml"));

    let root = project_with("rate_limit:\n  burst_size: 0\n");
    assert!(ConfigLoader::load_from_dir(root.path()).is_err());
}

#[test]
fn test_escalation_budget_above_three_is_rejected() {
    let root = project_with("optimizer:\n  max_escalations: 4\n");
    let err = ConfigLoader::load_from_dir(root.path()).unwrap_err();
    assert!(format!("{err:#}").contains("max_escalations 4 exceeds 3"));

    let root = project_with("optimizer:\n  max_escalations: 3\n");
    assert!(ConfigLoader::load_from_dir(root.path()).is_ok());
}

#[test]
fn test_malformed_yaml_is_reported() {
    let root = project_with("optimizer: [not, a, map\n");
    assert!(ConfigLoader::load_from_dir(root.path()).is_err());
}

#[test]
fn test_api_key_falls_back_to_environment() {
    let root = project_with("logging:\n  level: info\n");
    temp_env::with_vars(
        [
            ("ANTHROPIC_API_KEY", Some("env-key")),
            ("REDRAFT_PROVIDER__API_KEY", None::<&str>),
        ],
        || {
            let config = ConfigLoader::load_from_dir(root.path()).unwrap();
            assert!(config.provider.api_key.is_none());
            assert_eq!(config.provider.resolved_api_key().as_deref(), Some("env-key"));
        },
    );
}
