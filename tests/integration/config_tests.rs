use clap::Parser;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use sizedupe::cli::Cli;
use sizedupe::config::{Config, ConfigError, ConfigOverrides};
use sizedupe::duplicates::GroupFilter;
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clear all SIZEDUPE_* environment variables to avoid interference.
fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("SIZEDUPE_") {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn test_config_defaults_extract() {
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_from_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    fs::write(
        &config_path,
        r#"
min_size = 10
pattern = '.+\.(?:py|txt)$'
group_filter = { exactly = 3 }
follow_symlinks = true
"#,
    )
    .unwrap();

    let config = Config::load(Some(&config_path), &ConfigOverrides::default()).unwrap();

    assert_eq!(config.min_size, 10);
    assert_eq!(config.pattern.as_deref(), Some(r".+\.(?:py|txt)$"));
    assert_eq!(config.group_filter, GroupFilter::Exactly(3));
    assert!(config.follow_symlinks);
    assert!(!config.skip_vanished);
}

#[test]
fn test_config_env_overrides_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "min_size = 10\n").unwrap();

    std::env::set_var("SIZEDUPE_MIN_SIZE", "20");
    std::env::set_var("SIZEDUPE_SKIP_VANISHED", "true");

    let config = Config::load(Some(&config_path), &ConfigOverrides::default()).unwrap();

    assert_eq!(config.min_size, 20);
    assert!(config.skip_vanished);

    clear_env();
}

#[test]
fn test_cli_overrides_everything() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "min_size = 10\ngroup_filter = { exactly = 4 }\n",
    )
    .unwrap();
    std::env::set_var("SIZEDUPE_MIN_SIZE", "20");

    let cli = Cli::try_parse_from([
        "sizedupe",
        "/tmp",
        "--min-size",
        "30",
        "--at-least",
        "3",
    ])
    .unwrap();
    let config = Config::load(Some(&config_path), &cli.overrides()).unwrap();

    assert_eq!(config.min_size, 30);
    assert_eq!(config.group_filter, GroupFilter::AtLeast(3));

    clear_env();
}

#[test]
fn test_unset_cli_flags_keep_file_values() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "follow_symlinks = true\nmin_size = 5\n").unwrap();

    let cli = Cli::try_parse_from(["sizedupe", "/tmp"]).unwrap();
    let config = Config::load(Some(&config_path), &cli.overrides()).unwrap();

    assert!(config.follow_symlinks);
    assert_eq!(config.min_size, 5);
    assert_eq!(config.group_filter, GroupFilter::AtLeast(2));
}

#[test]
fn test_cli_negation_turns_off_file_switches() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "follow_symlinks = true\nskip_vanished = true\n").unwrap();

    let cli = Cli::try_parse_from([
        "sizedupe",
        "/tmp",
        "--no-follow-symlinks",
        "--no-skip-vanished",
    ])
    .unwrap();
    let config = Config::load(Some(&config_path), &cli.overrides()).unwrap();

    assert!(!config.follow_symlinks);
    assert!(!config.skip_vanished);
}

#[test]
fn test_config_invalid_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "min_size = \"lots\"").unwrap();

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let result: Result<Config, _> = figment.extract();
    assert!(result.is_err());

    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let result = Config::load(Some(&config_path), &ConfigOverrides::default());
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn test_config_group_filter_from_env() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    std::env::set_var("SIZEDUPE_GROUP_FILTER", "{at_least=5}");

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("SIZEDUPE_"));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config.group_filter, GroupFilter::AtLeast(5));

    clear_env();
}

#[test]
fn test_config_missing_file() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let result = Config::load(Some(&missing), &ConfigOverrides::default());
    assert!(matches!(result, Err(ConfigError::NotFound(path)) if path == missing));
}
