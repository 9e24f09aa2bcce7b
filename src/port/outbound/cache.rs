//! Market-rate cache port.

use std::fmt;

use async_trait::async_trait;

use crate::domain::estimate::MarketRateEstimate;
use crate::domain::normalize::NormalizationReport;
use crate::domain::region::RegionCode;
use crate::domain::scope::{SampleScope, ScopeTarget};
use crate::domain::transaction::TransactionRecord;
use crate::domain::window::TimeWindow;

/// Cache key for one (area, unit size, window) market computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateCacheKey(String);

impl RateCacheKey {
    /// Build a key. The unit size is keyed exactly; `-` stands for any size.
    #[must_use]
    pub fn new(region: &RegionCode, target: &ScopeTarget, window: &TimeWindow) -> Self {
        let normalize = |value: Option<&str>| {
            value
                .unwrap_or_default()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase()
        };
        let area = target
            .exclusive_area_sqm
            .map_or_else(|| "-".to_string(), |area| area.normalize().to_string());

        Self(format!(
            "{}|{}|{}|{}|{}-{}",
            region,
            normalize(target.dong.as_deref()),
            normalize(target.apartment_name.as_deref()),
            area,
            window.start().as_deal_ymd(),
            window.end().as_deal_ymd(),
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RateCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything computed for one window that later requests can reuse.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedMarket {
    pub estimate: MarketRateEstimate,
    pub scope: SampleScope,
    pub normalization: NormalizationReport,
    /// Most recent clean contracts, newest first.
    pub recent_transactions: Vec<TransactionRecord>,
}

/// Key-value cache of computed market estimates.
///
/// Staleness is the implementation's concern: `get` must not return an
/// entry older than the configured TTL.
#[async_trait]
pub trait RateCache: Send + Sync {
    async fn get(&self, key: &RateCacheKey) -> Option<CachedMarket>;

    async fn put(&self, key: RateCacheKey, value: CachedMarket);
}
