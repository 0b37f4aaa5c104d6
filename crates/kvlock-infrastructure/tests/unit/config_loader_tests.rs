//! Configuration loading and validation tests
//!
//! Every test points the loader at an explicit file and a test-only env
//! prefix, so the developer's own `kvlock.toml` and `KVLOCK_*` variables
//! never leak in.

use kvlock_infrastructure::config::loader::validate_app_config;
use kvlock_infrastructure::config::{AppConfig, ConfigLoader, StoreProvider};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const TEST_PREFIX: &str = "KVLOCK_UNIT_TEST_UNSET";

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

fn load(contents: &str) -> kvlock_domain::Result<AppConfig> {
    let file = config_file(contents);
    ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix(TEST_PREFIX)
        .load()
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.namespace.environment, "dev");
    assert_eq!(config.namespace.application_name, "kvlock");
    assert_eq!(config.store.provider, StoreProvider::Redis);
    assert_eq!(config.store.uri, "redis://127.0.0.1:6379");
    assert_eq!(config.lock.default_ttl_ms, 30_000);
    assert_eq!(config.lock.default_timeout_ms, 5_000);
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_file_overrides_defaults() {
    let config = load(
        r#"
[namespace]
environment = "prod"
application_name = "billing"

[store]
provider = "memory"

[lock]
default_ttl_ms = 10000
"#,
    )
    .unwrap();

    assert_eq!(config.namespace.environment, "prod");
    assert_eq!(config.namespace.application_name, "billing");
    assert_eq!(config.store.provider, StoreProvider::Memory);
    assert_eq!(config.lock.default_ttl_ms, 10_000);
    // Untouched fields keep their defaults
    assert_eq!(config.lock.default_timeout_ms, 5_000);
    assert_eq!(config.store.uri, "redis://127.0.0.1:6379");
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let result = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .with_env_prefix(TEST_PREFIX)
        .load();
    assert!(matches!(
        result,
        Err(kvlock_domain::Error::Configuration { .. })
    ));
}

#[test]
fn test_unknown_provider_rejected() {
    assert!(load("[store]\nprovider = \"etcd\"\n").is_err());
}

#[test]
fn test_namespace_with_separator_rejected() {
    assert!(load("[namespace]\nenvironment = \"eu:west\"\n").is_err());
    assert!(load("[namespace]\napplication_name = \"\"\n").is_err());
}

#[test]
fn test_lock_bounds_validated() {
    assert!(load("[lock]\ndefault_timeout_ms = 0\n").is_err());
    assert!(load("[lock]\ndefault_timeout_ms = 60001\n").is_err());
    assert!(load("[lock]\ndefault_timeout_ms = 60000\n").is_ok());
    assert!(load("[lock]\ndefault_ttl_ms = 999\n").is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    assert!(load("[logging]\nlevel = \"loud\"\n").is_err());
}

#[test]
fn test_empty_redis_uri_rejected() {
    assert!(load("[store]\nprovider = \"redis\"\nuri = \"\"\n").is_err());
    assert!(load("[store]\nprovider = \"memory\"\nuri = \"\"\n").is_ok());
}

#[test]
fn test_store_timeouts_loaded_and_validated() {
    let config = load(
        r#"
[store]
connection_timeout_ms = 200
response_timeout_ms = 300
connection_retries = 0
"#,
    )
    .unwrap();
    assert_eq!(config.store.connection_timeout_ms, 200);
    assert_eq!(config.store.response_timeout_ms, 300);
    assert_eq!(config.store.connection_retries, 0);

    assert!(load("[store]\nconnection_timeout_ms = 0\n").is_err());
    assert!(load("[store]\nresponse_timeout_ms = 0\n").is_err());
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kvlock.toml");

    let mut config = AppConfig::default();
    config.namespace.environment = "staging".to_string();
    config.store.provider = StoreProvider::Memory;

    let loader = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix(TEST_PREFIX);
    loader.save_to_file(&config, &path).unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("provider = \"memory\""));

    let loaded = loader.load().unwrap();
    assert_eq!(loaded.namespace, config.namespace);
    assert_eq!(loaded.store, config.store);
}

/// Run with: `cargo test -p kvlock-infrastructure --test unit -- --test-threads=1 --ignored`
#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_file() {
    let file = config_file("[store]\nprovider = \"redis\"\n");

    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        std::env::set_var("KVLOCK_STORE__PROVIDER", "memory");
        std::env::set_var("KVLOCK_LOCK__DEFAULT_TIMEOUT_MS", "1500");
    }

    let config = ConfigLoader::new().with_config_path(file.path()).load();

    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        std::env::remove_var("KVLOCK_STORE__PROVIDER");
        std::env::remove_var("KVLOCK_LOCK__DEFAULT_TIMEOUT_MS");
    }

    let config = config.unwrap();
    assert_eq!(config.store.provider, StoreProvider::Memory);
    assert_eq!(config.lock.default_timeout_ms, 1_500);
}
