//! Analysis and legal-cap configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::application::analysis::policy::{AnalysisPolicy, DEFAULT_WINDOW_MONTHS};
use crate::domain::estimate::WeightingPolicy;
use crate::domain::outlier::OutlierPolicy;
use crate::domain::rate::LegalRateCap;
use crate::domain::scope::ScopePolicy;
use crate::domain::trend::DEFAULT_STABLE_THRESHOLD;

/// Statistical parameters of the analysis pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Months per window; the trend compares two adjacent windows.
    #[serde(default = "default_window_months")]
    pub window_months: u32,
    /// IQR multiplier for outlier fences.
    #[serde(default = "default_outlier_k")]
    pub outlier_k: Decimal,
    /// Minimum contracts that must survive outlier filtering.
    #[serde(default = "default_min_clean")]
    pub min_clean: usize,
    #[serde(default = "default_half_life")]
    pub recency_half_life_months: Decimal,
    /// Relative unit-size tolerance for comparable contracts.
    #[serde(default = "default_area_tolerance")]
    pub area_tolerance: Decimal,
    /// Contracts a scope needs before it is used instead of a wider one.
    #[serde(default = "default_min_scope_sample")]
    pub min_scope_sample: usize,
    #[serde(default = "default_recent_transaction_limit")]
    pub recent_transaction_limit: usize,
    #[serde(default = "default_trend_stable_threshold")]
    pub trend_stable_threshold: Decimal,
    #[serde(default = "default_report_validity_days")]
    pub report_validity_days: i64,
}

const fn default_window_months() -> u32 {
    DEFAULT_WINDOW_MONTHS
}

fn default_outlier_k() -> Decimal {
    dec!(1.5)
}

const fn default_min_clean() -> usize {
    3
}

fn default_half_life() -> Decimal {
    dec!(6)
}

fn default_area_tolerance() -> Decimal {
    dec!(0.15)
}

const fn default_min_scope_sample() -> usize {
    5
}

const fn default_recent_transaction_limit() -> usize {
    10
}

fn default_trend_stable_threshold() -> Decimal {
    DEFAULT_STABLE_THRESHOLD
}

const fn default_report_validity_days() -> i64 {
    30
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_months: default_window_months(),
            outlier_k: default_outlier_k(),
            min_clean: default_min_clean(),
            recency_half_life_months: default_half_life(),
            area_tolerance: default_area_tolerance(),
            min_scope_sample: default_min_scope_sample(),
            recent_transaction_limit: default_recent_transaction_limit(),
            trend_stable_threshold: default_trend_stable_threshold(),
            report_validity_days: default_report_validity_days(),
        }
    }
}

/// Legal maximum conversion rate: base rate plus statutory spread.
#[derive(Debug, Clone, Deserialize)]
pub struct LegalConfig {
    /// Bank of Korea base rate, percent.
    #[serde(default = "default_base_rate")]
    pub base_rate: Decimal,
    /// Spread over the base rate, percent points.
    #[serde(default = "default_spread")]
    pub spread: Decimal,
}

fn default_base_rate() -> Decimal {
    LegalRateCap::default().base_rate
}

fn default_spread() -> Decimal {
    LegalRateCap::default().spread
}

impl Default for LegalConfig {
    fn default() -> Self {
        Self {
            base_rate: default_base_rate(),
            spread: default_spread(),
        }
    }
}

impl LegalConfig {
    #[must_use]
    pub const fn cap(&self) -> LegalRateCap {
        LegalRateCap::new(self.base_rate, self.spread)
    }
}

impl AnalysisConfig {
    /// Assemble the analyzer policy.
    #[must_use]
    pub fn policy(&self, legal: &LegalConfig) -> AnalysisPolicy {
        AnalysisPolicy {
            window_months: self.window_months,
            outlier: OutlierPolicy {
                fence_k: self.outlier_k,
                min_clean: self.min_clean,
            },
            weighting: WeightingPolicy {
                recency_half_life_months: self.recency_half_life_months,
            },
            scope: ScopePolicy {
                area_tolerance: self.area_tolerance,
                min_sample: self.min_scope_sample,
            },
            recent_transaction_limit: self.recent_transaction_limit,
            trend_stable_threshold: self.trend_stable_threshold,
            report_validity: chrono::Duration::days(self.report_validity_days),
            legal: legal.cap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_analyzer_defaults() {
        let policy = AnalysisConfig::default().policy(&LegalConfig::default());
        assert_eq!(policy, AnalysisPolicy::default());
    }

    #[test]
    fn legal_cap_adds_spread() {
        let legal = LegalConfig {
            base_rate: dec!(3.0),
            spread: dec!(2.0),
        };
        assert_eq!(legal.cap().max_rate(), dec!(5.0));
    }
}
