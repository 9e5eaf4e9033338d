//! Configuration loading from files and the environment.

mod support;

use std::io::Write;

use swift_vo::config::{ConfigError, ServiceConfig};
use swift_vo::engine::{EngineFactory, EngineKind};

use support::{with_scoped_env, CLEAN_ENV};

fn env_with<'a>(overrides: &[(&'a str, Option<&'a str>)]) -> Vec<(&'a str, Option<&'a str>)> {
    CLEAN_ENV.iter().chain(overrides).copied().collect()
}

#[test]
fn test_from_file_reads_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[server]
port = 9090
public_base_url = "https://vo.example.org/swift"

[engine]
kind = "static"
"#
    )
    .unwrap();

    let config = ServiceConfig::from_file(file.path()).unwrap();
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.public_base_url, "https://vo.example.org/swift");
    assert_eq!(config.engine.kind().unwrap(), EngineKind::Static);
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ServiceConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_env_overrides() {
    let changes = env_with(&[
        ("PORT", Some("7000")),
        ("VO_SERVER", Some("vo.swift.psu.edu")),
        ("ENGINE_KIND", Some("static")),
        ("ENGINE_TIMEOUT_SECS", Some("30")),
    ]);
    let config = with_scoped_env(&changes, || ServiceConfig::default().apply_env_overrides()).unwrap();

    assert_eq!(config.server.port, 7000);
    assert_eq!(config.server.public_base_url, "https://vo.swift.psu.edu");
    assert_eq!(config.engine.kind, "static");
    assert_eq!(config.engine.timeout_secs, 30);
    assert_eq!(config.server.bind_address(), "0.0.0.0:7000");
}

#[test]
fn test_vo_server_with_scheme_is_kept() {
    let changes = env_with(&[("VO_SERVER", Some("http://localhost:9000"))]);
    let config = with_scoped_env(&changes, || ServiceConfig::default().apply_env_overrides()).unwrap();
    assert_eq!(config.server.public_base_url, "http://localhost:9000");
}

#[test]
fn test_invalid_port_rejected() {
    let changes = env_with(&[("PORT", Some("not-a-port"))]);
    let err = with_scoped_env(&changes, || ServiceConfig::default().apply_env_overrides()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_engine_kind_from_env_rejected() {
    let changes = env_with(&[("ENGINE_KIND", Some("oracle"))]);
    let err = with_scoped_env(&changes, || ServiceConfig::default().apply_env_overrides()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_factory_builds_configured_engine() {
    let changes = env_with(&[("ENGINE_KIND", Some("static"))]);
    let config = with_scoped_env(&changes, || ServiceConfig::default().apply_env_overrides()).unwrap();
    let engine = EngineFactory::create(&config.engine).unwrap();
    assert_eq!(engine.name(), "static");

    let remote = EngineFactory::create(&ServiceConfig::default().engine).unwrap();
    assert_eq!(remote.name(), "swift-api");
}
