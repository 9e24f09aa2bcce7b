//! Canonical test configurations.

use chrono::NaiveDate;

use crate::application::analysis::policy::AnalysisPolicy;
use crate::infrastructure::config::settings::Config;

/// Reference date used by analyzer tests: windows end in June 2024.
pub fn as_of() -> NaiveDate {
    super::domain::date(2024, 6, 30)
}

/// Defaults with logging quiet enough for test output.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.logging.level = "warn".into();
    config
}

/// Default analyzer policy.
pub fn test_policy() -> AnalysisPolicy {
    test_config().analysis_policy()
}
