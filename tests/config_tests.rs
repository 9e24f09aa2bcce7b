use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rust_decimal_macros::dec;

use krent::error::{ConfigError, Error};
use krent::infrastructure::config::settings::Config;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("krent-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn shipped_example_config_is_valid() {
    let template = include_str!("../config.toml.example");
    let config = Config::parse_toml(template).expect("example config parses");

    assert_eq!(config.analysis.window_months, 6);
    assert_eq!(config.legal.cap().max_rate(), dec!(4.5));
    assert!(config.cache.enabled);
}

#[test]
fn empty_file_yields_defaults() {
    let path = write_temp_config("");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    let config = result.expect("empty config is valid");
    let policy = config.analysis_policy();
    assert_eq!(policy.window_months, 6);
    assert_eq!(policy.outlier.fence_k, dec!(1.5));
    assert_eq!(policy.recent_transaction_limit, 10);
}

#[test]
fn legal_section_drives_the_policy_cap() {
    let toml = r#"
[legal]
base_rate = 3.5
spread = 2.0
"#;
    let config = Config::parse_toml(toml).expect("valid config");
    assert_eq!(config.analysis_policy().legal.max_rate(), dec!(5.5));
}

#[test]
fn config_rejects_zero_window() {
    let toml = r#"
[analysis]
window_months = 0
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "analysis.window_months",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid window error, got {err}"),
        Ok(_) => panic!("Expected invalid window error, got Ok"),
    }
}

#[test]
fn config_rejects_negative_legal_rate() {
    let toml = r#"
[legal]
base_rate = -1.0
spread = 2.0
"#;

    match Config::parse_toml(toml) {
        Err(Error::Config(ConfigError::InvalidValue { field: "legal", .. })) => {}
        Err(err) => panic!("Expected invalid legal error, got {err}"),
        Ok(_) => panic!("Expected invalid legal error, got Ok"),
    }
}

#[test]
fn config_rejects_malformed_region_code() {
    let toml = r#"
[regions]
"경기도/분당구" = "4113"
"#;

    match Config::parse_toml(toml) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "regions", ..
        })) => {}
        Err(err) => panic!("Expected invalid region error, got {err}"),
        Ok(_) => panic!("Expected invalid region error, got Ok"),
    }
}

#[test]
fn config_reports_toml_syntax_errors() {
    match Config::parse_toml("[analysis\nwindow_months = 6") {
        Err(Error::Config(ConfigError::Parse(_))) => {}
        Err(err) => panic!("Expected parse error, got {err}"),
        Ok(_) => panic!("Expected parse error, got Ok"),
    }
}

#[test]
fn missing_file_is_a_read_error() {
    let mut path = std::env::temp_dir();
    path.push("krent-config-test-does-not-exist.toml");

    match Config::load(&path) {
        Err(Error::Config(ConfigError::ReadFile(_))) => {}
        Err(err) => panic!("Expected read error, got {err}"),
        Ok(_) => panic!("Expected read error, got Ok"),
    }
}
