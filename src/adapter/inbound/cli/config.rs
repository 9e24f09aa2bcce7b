//! Handler for the `config` command group and shared config loading.

use std::fs;
use std::path::Path;

use crate::adapter::inbound::cli::{diagnostic, output, paths};
use crate::adapter::outbound::molit::settings::{MolitConfig, SERVICE_KEY_ENV};
use crate::domain::money::format_rate;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Load configuration for a command.
///
/// Unless `required`, a missing file at the default location yields the
/// defaults. A missing file that was named explicitly is always an error.
pub fn load(path: &Path, required: bool) -> miette::Result<Config> {
    if !required && !path.exists() && path == paths::default_config() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|err| diagnostic::report(ConfigError::ReadFile(err).into()))?;
    Config::parse_toml(&content)
        .map_err(|err| diagnostic::config_report(&path.display().to_string(), &content, err))
}

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!("2. Set the {SERVICE_KEY_ENV} environment variable"));
    output::note(&format!("3. Run: krent config validate -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(config: &Config) {
    output::section("Effective Configuration");
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);

    output::section("MOLIT API");
    output::field("URL", &config.molit.api_url);
    output::field("Timeout", format!("{}ms", config.molit.timeout_ms));
    output::field("Page size", config.molit.rows_per_page);
    if MolitConfig::service_key().is_some() {
        output::success(&format!("Service key loaded from {SERVICE_KEY_ENV}"));
    } else {
        output::warning(&format!("{SERVICE_KEY_ENV} not set"));
    }

    let analysis = &config.analysis;
    output::section("Analysis");
    output::field("Window", format!("{} months", analysis.window_months));
    output::field("Outlier k", analysis.outlier_k);
    output::field("Min clean", analysis.min_clean);
    output::field("Half-life", format!("{} months", analysis.recency_half_life_months));
    output::field("Area tol.", analysis.area_tolerance);
    output::field("Scope min", analysis.min_scope_sample);
    output::field("Trend band", format!("±{}%", analysis.trend_stable_threshold));
    output::field("Validity", format!("{} days", analysis.report_validity_days));

    output::section("Legal Cap");
    output::field("Base rate", format_rate(config.legal.base_rate));
    output::field("Spread", format_rate(config.legal.spread));
    output::field("Maximum", format_rate(config.legal.cap().max_rate()));

    output::section("Cache");
    output::field("Enabled", if config.cache.enabled { "yes" } else { "no" });
    if config.cache.enabled {
        output::field("TTL", format!("{}s", config.cache.ttl_secs));
        output::field("Max entries", config.cache.max_entries);
    }

    if !config.regions.is_empty() {
        output::section("Region Overrides");
        let mut regions: Vec<_> = config.regions.iter().collect();
        regions.sort();
        for (name, code) in regions {
            output::field(name, code);
        }
    }
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path, config: &Config) {
    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");

    if MolitConfig::service_key().is_none() {
        output::warning(&format!(
            "{SERVICE_KEY_ENV} is not set; only --file analysis will work"
        ));
    }
    if !config.cache.enabled {
        output::warning("Cache disabled; every analysis refetches both windows");
    }

    output::field("Next", format!("krent config show -c {}", path.display()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp directory")
    }

    #[test]
    fn test_config_template_parses_to_defaults() {
        let config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.analysis.window_months, 6);
        assert_eq!(config.cache.ttl_secs, 86_400);
        assert!(config.regions.is_empty());
    }

    #[test]
    fn test_execute_init_writes_template_content() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        execute_init(&config_path, false).unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, CONFIG_TEMPLATE);
    }

    #[test]
    fn test_execute_init_fails_if_file_exists_without_force() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "existing content").unwrap();

        assert!(execute_init(&config_path, false).is_err());
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, "existing content");
    }

    #[test]
    fn test_execute_init_overwrites_with_force() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "existing content").unwrap();

        execute_init(&config_path, true).unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, CONFIG_TEMPLATE);
    }

    #[test]
    fn test_load_reads_explicit_file() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[legal]\nbase_rate = 3.0\n").unwrap();

        let config = load(&config_path, false).unwrap();
        assert_eq!(config.legal.cap().max_rate(), rust_decimal_macros::dec!(5.0));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = create_temp_dir();
        assert!(load(&temp_dir.path().join("absent.toml"), false).is_err());
    }
}
