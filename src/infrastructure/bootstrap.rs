//! Infrastructure bootstrap helpers for runtime wiring.

use std::path::Path;
use std::sync::Arc;

use chrono::Duration;
use tracing::info;

use crate::adapter::outbound::file::JsonFileSource;
use crate::adapter::outbound::molit::client::MolitClient;
use crate::application::analysis::service::RentAnalyzer;
use crate::application::cache::rate::{InMemoryRateCache, NoopRateCache};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::cache::RateCache;
use crate::port::outbound::source::TransactionSource;

/// Build the rate cache from configuration.
#[must_use]
pub fn build_rate_cache(config: &Config) -> Arc<dyn RateCache> {
    if config.cache.enabled {
        let ttl = Duration::seconds(i64::try_from(config.cache.ttl_secs).unwrap_or(i64::MAX));
        Arc::new(InMemoryRateCache::new(ttl, config.cache.max_entries))
    } else {
        Arc::new(NoopRateCache)
    }
}

/// Build the transaction source: a local file when given, MOLIT otherwise.
///
/// # Errors
///
/// Returns an error if MOLIT is selected and `MOLIT_SERVICE_KEY` is unset.
pub fn build_source(config: &Config, file: Option<&Path>) -> Result<Arc<dyn TransactionSource>> {
    match file {
        Some(path) => {
            info!(path = %path.display(), "Using local transaction file");
            Ok(Arc::new(JsonFileSource::new(path)))
        }
        None => {
            info!(api_url = %config.molit.api_url, "Using MOLIT transaction API");
            Ok(Arc::new(MolitClient::from_config(&config.molit)?))
        }
    }
}

/// Wire the analyzer from configuration.
///
/// # Errors
///
/// Propagates source construction errors.
pub fn build_analyzer(config: &Config, file: Option<&Path>) -> Result<RentAnalyzer> {
    let source = build_source(config, file)?;
    let cache = build_rate_cache(config);
    Ok(RentAnalyzer::new(source, cache, config.analysis_policy())
        .with_region_overrides(config.regions.clone()))
}
