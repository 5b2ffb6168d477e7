use std::fs;

use plotline::config::{ChatBackend, Config};

#[test]
fn config_defaults_when_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::load_from_dir(dir.path());

    assert_eq!(config.chat.backend, ChatBackend::Rules);
    assert_eq!(config.chat.suggestion_limit, 5);
    assert!(!config.endpoint.is_configured());
}

#[test]
fn config_overrides_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join(".plotline.toml");
    let toml = r#"
[chat]
backend = "custom"
suggestion_limit = 3

[endpoint]
url = "https://llm.example.test/v1"
api_key = "secret"
model = "timeline-1"
api_version = "2026-01-01"
"#;

    fs::write(&config_path, toml)?;

    let config = Config::load_from_dir(dir.path());

    assert_eq!(config.chat.backend, ChatBackend::Custom);
    assert_eq!(config.chat.suggestion_limit, 3);
    assert!(config.endpoint.is_configured());
    assert_eq!(config.endpoint.model, "timeline-1");

    Ok(())
}

#[test]
fn suggestion_limit_never_exceeds_five() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join(".plotline.toml");
    fs::write(&config_path, "[chat]\nsuggestion_limit = 50\n").expect("write config");

    let config = Config::load_from_dir(dir.path());
    assert_eq!(config.suggestion_limit(), 5);
}

#[test]
fn malformed_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join(".plotline.toml");
    fs::write(&config_path, "not = [valid").expect("write config");

    let config = Config::load_from_dir(dir.path());
    assert_eq!(config.chat.backend, ChatBackend::Rules);
}

#[test]
fn config_round_trips_through_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(".plotline.toml");

    let mut config = Config::default();
    config.chat.backend = ChatBackend::Local;
    config.save(&path).expect("save");

    let loaded = Config::load(&path).expect("load");
    assert_eq!(loaded.chat.backend, ChatBackend::Local);
}
