/// Integration tests for configuration loading and saving
use primecount_core::config::{default_config, load_config, save_config, Config};
use primecount_core::PrimecountError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_loading_from_multiple_sources() {
    let dir = TempDir::new().unwrap();

    let server_config = dir.path().join("server.toml");
    let laptop_config = dir.path().join("laptop.toml");

    // Recalibrated for a many-core server
    fs::write(
        &server_config,
        r#"
[load_balancer]
thread_root_exponent = 3.2
chunks_per_thread = 16

[threads]
count = 192
"#,
    )
    .unwrap();

    // Laptop: fewer, larger chunks and slower status updates
    fs::write(
        &laptop_config,
        r#"
[load_balancer]
min_thread_distance = 16777216

[status]
interval_secs = 0.5
precision = 1
"#,
    )
    .unwrap();

    let server = load_config(&server_config).unwrap();
    assert_eq!(server.load_balancer.thread_root_exponent, 3.2);
    assert_eq!(server.load_balancer.chunks_per_thread, 16);
    assert_eq!(server.load_balancer.min_thread_distance, 1 << 23); // Default
    assert_eq!(server.threads.count, 192);

    let laptop = load_config(&laptop_config).unwrap();
    assert_eq!(laptop.load_balancer.min_thread_distance, 1 << 24);
    assert_eq!(laptop.status.interval_secs, 0.5);
    assert_eq!(laptop.status.precision, Some(1));
    assert_eq!(laptop.threads.count, 0); // Default
}

#[test]
fn test_empty_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config, default_config());
}

#[test]
fn test_invalid_values_are_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[load_balancer]\nchunks_per_thread = 0\n").unwrap();

    match load_config(&path) {
        Err(PrimecountError::Configuration(msg)) => assert!(msg.contains("chunks_per_thread")),
        other => panic!("Expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_wrong_type_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("typo.toml");
    fs::write(&path, "[threads]\ncount = \"many\"\n").unwrap();

    assert!(matches!(load_config(&path), Err(PrimecountError::Configuration(_))));
}

#[test]
fn test_save_creates_readable_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = Config::default();
    config.status.precision = Some(2);
    save_config(&path, &config).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[load_balancer]"));
    assert!(contents.contains("min_thread_distance = 8388608"));

    assert_eq!(load_config(&path).unwrap(), config);
}

#[test]
fn test_save_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("config.toml");

    let result = save_config(&path, &Config::default());
    assert!(matches!(result, Err(PrimecountError::Io(_))));
}
