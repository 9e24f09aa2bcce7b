//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the MOLIT service key is only
//! ever read from the `MOLIT_SERVICE_KEY` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use krent::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::analysis::{AnalysisConfig, LegalConfig};
use super::cache::CacheConfig;
use super::logging::LoggingConfig;
use crate::adapter::outbound::molit::settings::MolitConfig;
use crate::application::analysis::policy::AnalysisPolicy;
use crate::domain::region::RegionCode;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// MOLIT open API connection settings.
    #[serde(default)]
    pub molit: MolitConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Legal maximum conversion rate inputs.
    #[serde(default)]
    pub legal: LegalConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    /// Extra `"city/district" = "code"` region mappings.
    #[serde(default)]
    pub regions: HashMap<String, String>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Analyzer policy assembled from `[analysis]` and `[legal]`.
    #[must_use]
    pub fn analysis_policy(&self) -> AnalysisPolicy {
        self.analysis.policy(&self.legal)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.molit.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "molit.api_url" }.into());
        }
        if url::Url::parse(&self.molit.api_url).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "molit.api_url",
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }
        if self.molit.timeout_ms == 0 || self.molit.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "molit.timeout_ms",
                reason: "timeouts must be greater than 0".to_string(),
            }
            .into());
        }
        if self.molit.rows_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "molit.rows_per_page",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let analysis = &self.analysis;
        if analysis.window_months == 0 || analysis.window_months > 24 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.window_months",
                reason: "must be between 1 and 24".to_string(),
            }
            .into());
        }
        if analysis.outlier_k <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "analysis.outlier_k",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if analysis.recency_half_life_months <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "analysis.recency_half_life_months",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if analysis.area_tolerance < Decimal::ZERO || analysis.area_tolerance > Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "analysis.area_tolerance",
                reason: "must be between 0 and 1".to_string(),
            }
            .into());
        }
        if analysis.trend_stable_threshold < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "analysis.trend_stable_threshold",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if analysis.report_validity_days <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.report_validity_days",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.legal.base_rate < Decimal::ZERO || self.legal.spread < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "legal",
                reason: "base_rate and spread must be 0 or greater".to_string(),
            }
            .into());
        }
        if self.legal.cap().max_rate() <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "legal",
                reason: "legal maximum rate must be greater than 0".to_string(),
            }
            .into());
        }

        if self.cache.enabled && self.cache.max_entries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.max_entries",
                reason: "must be greater than 0 when the cache is enabled".to_string(),
            }
            .into());
        }

        if let Some((key, _)) = self
            .regions
            .iter()
            .find(|(_, code)| RegionCode::parse(code).is_none())
        {
            return Err(ConfigError::InvalidValue {
                field: "regions",
                reason: format!("{key}: region code must be five digits"),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.analysis.window_months, 6);
        assert_eq!(config.cache.ttl_secs, 86_400);
        assert_eq!(config.legal.cap().max_rate(), dec!(4.5));
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
            [legal]
            base_rate = 3.5
            spread = 2.0

            [analysis]
            window_months = 3
            min_scope_sample = 8

            [regions]
            "경기도/분당구" = "41135"
            "#,
        )
        .unwrap();
        let policy = config.analysis_policy();
        assert_eq!(policy.window_months, 3);
        assert_eq!(policy.scope.min_sample, 8);
        assert_eq!(policy.legal.max_rate(), dec!(5.5));
        assert_eq!(config.regions.get("경기도/분당구").map(String::as_str), Some("41135"));
    }

    #[test]
    fn rejects_bad_region_code() {
        let err = Config::parse_toml("[regions]\n\"분당구\" = \"4113\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "regions", .. })
        ));
    }

    #[test]
    fn rejects_zero_window() {
        let err = Config::parse_toml("[analysis]\nwindow_months = 0").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "analysis.window_months",
                ..
            })
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::parse_toml("[analysis\nwindow_months = 3").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
