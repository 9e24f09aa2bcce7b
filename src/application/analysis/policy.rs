//! Tunable parameters of the analysis pipeline.

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::estimate::WeightingPolicy;
use crate::domain::outlier::OutlierPolicy;
use crate::domain::rate::LegalRateCap;
use crate::domain::scope::ScopePolicy;
use crate::domain::trend::DEFAULT_STABLE_THRESHOLD;

/// Months in each of the recent and the prior window.
pub const DEFAULT_WINDOW_MONTHS: u32 = 6;

/// Everything the analyzer needs besides its ports.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPolicy {
    pub window_months: u32,
    pub outlier: OutlierPolicy,
    pub weighting: WeightingPolicy,
    pub scope: ScopePolicy,
    /// Clean contracts listed in the report, newest first.
    pub recent_transaction_limit: usize,
    pub trend_stable_threshold: Decimal,
    /// How long a report stays valid after it was produced.
    pub report_validity: Duration,
    pub legal: LegalRateCap,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            window_months: DEFAULT_WINDOW_MONTHS,
            outlier: OutlierPolicy::default(),
            weighting: WeightingPolicy::default(),
            scope: ScopePolicy {
                area_tolerance: dec!(0.15),
                min_sample: 5,
            },
            recent_transaction_limit: 10,
            trend_stable_threshold: DEFAULT_STABLE_THRESHOLD,
            report_validity: Duration::days(30),
            legal: LegalRateCap::default(),
        }
    }
}
