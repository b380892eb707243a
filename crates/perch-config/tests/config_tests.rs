use std::io::Write;

use perch_config::schema::*;
use perch_config::ConfigLoader;

// ── Default tests ──────────────────────────────────────────────

#[test]
fn test_perch_config_defaults() {
    let config = PerchConfig::default();
    assert_eq!(config.bot.name, "perch");
    assert_eq!(config.bot.console_user, "console");
    assert_eq!(config.logging.level, "info");
    assert!(config.secrets.is_empty());
    assert!(config.http.user_agent.contains("Chrome"));
}

#[test]
fn test_services_defaults() {
    let config = ServicesConfig::default();
    assert_eq!(config.twitter_api_base, "https://api.twitter.com/1.1");
    assert!(config.twitter_proxy_url.starts_with("https://"));
}

// ── TOML roundtrip tests ───────────────────────────────────────

#[test]
fn test_config_toml_roundtrip() {
    let config = PerchConfig::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    let restored: PerchConfig = toml::from_str(&toml_str).unwrap();
    assert_eq!(restored.bot.name, config.bot.name);
    assert_eq!(restored.brain.db_path, config.brain.db_path);
    assert_eq!(restored.http.user_agent, config.http.user_agent);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let raw = r#"
[bot]
name = "birdie"

[secrets]
connstring = "/tmp/metrics.db"
"#;
    let config: PerchConfig = toml::from_str(raw).unwrap();
    assert_eq!(config.bot.name, "birdie");
    assert_eq!(config.secrets.get("connstring").unwrap(), "/tmp/metrics.db");
    // Untouched sections keep their defaults
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.services.twitter_api_base, "https://api.twitter.com/1.1");
}

// ── Loader tests ───────────────────────────────────────────────

#[test]
fn test_loader_reads_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("perch.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[bot]\nname = \"lookout\"").unwrap();

    let loader = ConfigLoader::load(Some(&path)).unwrap();
    assert_eq!(loader.get().bot.name, "lookout");
    assert_eq!(loader.path(), path);
}

#[test]
fn test_loader_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let loader = ConfigLoader::load(Some(&path)).unwrap();
    assert_eq!(loader.get().bot.name, "perch");
}

#[test]
fn test_loader_rejects_bad_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("perch.toml");
    std::fs::write(&path, "this is not toml = = =").unwrap();

    assert!(ConfigLoader::load(Some(&path)).is_err());
}

// ── Validation tests ───────────────────────────────────────────

#[test]
fn test_validate_rejects_empty_bot_name() {
    let mut config = PerchConfig::default();
    config.bot.name = "  ".into();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_warns_on_unknown_log_level() {
    let mut config = PerchConfig::default();
    config.logging.level = "loud".into();
    let warnings = config.validate().unwrap();
    assert!(warnings.iter().any(|w| w.contains("loud")));
}
