//! Market-implied conversion rate estimation.
//!
//! # Method
//!
//! The central rate is the weighted median of the clean sample's implied
//! rates; the low/high rates are the weighted 25th/75th percentiles. Each
//! record's weight is the product of:
//!
//! - **Recency**: `0.5 ^ (age_months / half_life_months)`, age measured
//!   from the newest contract in the sample.
//! - **Area similarity**: `max(0.1, 1 − |area − target| / target)` when a
//!   target unit size is known, otherwise 1.
//!
//! All three rates come from the same weighted quantile function, so
//! `low ≤ central ≤ high` holds by construction.
//!
//! # Confidence
//!
//! Confidence depends only on the clean sample size:
//!
//! | clean count | level  |
//! |-------------|--------|
//! | 0–4         | low    |
//! | 5–14        | medium |
//! | 15+         | high   |

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Rate;
use super::outlier::FilterOutcome;
use super::stats::weighted_quantile;
use super::transaction::TransactionRecord;

/// Smallest clean count that earns medium confidence.
pub const MEDIUM_CONFIDENCE_MIN: usize = 5;

/// Smallest clean count that earns high confidence.
pub const HIGH_CONFIDENCE_MIN: usize = 15;

/// Lower bound on the area-similarity weight.
pub const AREA_WEIGHT_FLOOR: Decimal = dec!(0.1);

/// Average days per month used for contract age.
const DAYS_PER_MONTH: Decimal = dec!(30.4375);

/// Decimal places kept on published rates.
const RATE_DP: u32 = 4;

/// Confidence in an estimate, derived from the clean sample size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Confidence for a clean sample of `clean_count` records.
    #[must_use]
    pub const fn from_clean_count(clean_count: usize) -> Self {
        if clean_count >= HIGH_CONFIDENCE_MIN {
            Self::High
        } else if clean_count >= MEDIUM_CONFIDENCE_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Record weighting settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeightingPolicy {
    /// Months after which a contract counts half as much as the newest.
    #[serde(default = "default_half_life_months")]
    pub recency_half_life_months: Decimal,
}

fn default_half_life_months() -> Decimal {
    dec!(6)
}

impl Default for WeightingPolicy {
    fn default() -> Self {
        Self {
            recency_half_life_months: default_half_life_months(),
        }
    }
}

/// Aggregate market rate for one area and time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRateEstimate {
    central_rate: Rate,
    low_rate: Rate,
    high_rate: Rate,
    confidence_level: ConfidenceLevel,
    contract_count: usize,
    clean_count: usize,
    outlier_count: usize,
}

impl MarketRateEstimate {
    /// Create an estimate from known values, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEstimate`] when the rates are not
    /// ordered `low ≤ central ≤ high` or `clean_count > contract_count`.
    pub fn try_new(
        central_rate: Rate,
        low_rate: Rate,
        high_rate: Rate,
        contract_count: usize,
        clean_count: usize,
    ) -> Result<Self, DomainError> {
        if !(low_rate <= central_rate && central_rate <= high_rate) {
            return Err(DomainError::InvalidEstimate {
                reason: format!("rates out of order: {low_rate} / {central_rate} / {high_rate}"),
            });
        }
        if clean_count > contract_count {
            return Err(DomainError::InvalidEstimate {
                reason: format!("clean count {clean_count} exceeds contract count {contract_count}"),
            });
        }

        Ok(Self {
            central_rate,
            low_rate,
            high_rate,
            confidence_level: ConfidenceLevel::from_clean_count(clean_count),
            contract_count,
            clean_count,
            outlier_count: contract_count - clean_count,
        })
    }

    #[must_use]
    pub const fn central_rate(&self) -> Rate {
        self.central_rate
    }

    #[must_use]
    pub const fn low_rate(&self) -> Rate {
        self.low_rate
    }

    #[must_use]
    pub const fn high_rate(&self) -> Rate {
        self.high_rate
    }

    #[must_use]
    pub const fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    #[must_use]
    pub const fn contract_count(&self) -> usize {
        self.contract_count
    }

    #[must_use]
    pub const fn clean_count(&self) -> usize {
        self.clean_count
    }

    #[must_use]
    pub const fn outlier_count(&self) -> usize {
        self.outlier_count
    }

    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        self.confidence_level == ConfidenceLevel::Low
    }
}

fn recency_weight(date: NaiveDate, newest: NaiveDate, half_life_months: Decimal) -> Decimal {
    if half_life_months <= Decimal::ZERO {
        return Decimal::ONE;
    }
    let age_days = (newest - date).num_days().max(0);
    let age_months = Decimal::from(age_days) / DAYS_PER_MONTH;
    dec!(0.5)
        .checked_powd(age_months / half_life_months)
        .filter(|weight| *weight > Decimal::ZERO)
        .unwrap_or(AREA_WEIGHT_FLOOR)
}

fn area_weight(area: Decimal, target: Option<Decimal>) -> Decimal {
    match target {
        Some(target) if target > Decimal::ZERO => {
            let relative = (area - target).abs() / target;
            (Decimal::ONE - relative).max(AREA_WEIGHT_FLOOR)
        }
        _ => Decimal::ONE,
    }
}

/// Weight of each record: recency × area similarity.
#[must_use]
pub fn record_weights(
    records: &[TransactionRecord],
    policy: &WeightingPolicy,
    target_area: Option<Decimal>,
) -> Vec<Decimal> {
    let Some(newest) = records.iter().map(TransactionRecord::contract_date).max() else {
        return Vec::new();
    };

    records
        .iter()
        .map(|record| {
            recency_weight(
                record.contract_date(),
                newest,
                policy.recency_half_life_months,
            ) * area_weight(record.exclusive_area_sqm(), target_area)
        })
        .collect()
}

/// Estimate the market rate from a filtered sample.
///
/// `contract_count` is the size of the sample before outlier filtering.
///
/// # Errors
///
/// Returns [`DomainError::InsufficientData`] if the clean sample is empty.
pub fn estimate_market_rate(
    outcome: &FilterOutcome,
    contract_count: usize,
    policy: &WeightingPolicy,
    target_area: Option<Decimal>,
) -> Result<MarketRateEstimate, DomainError> {
    let weights = record_weights(&outcome.clean, policy, target_area);
    let mut weighted: Vec<(Rate, Decimal)> = outcome
        .clean
        .iter()
        .map(TransactionRecord::implied_rate)
        .zip(weights)
        .collect();
    weighted.sort_by(|a, b| a.0.cmp(&b.0));

    let insufficient = || DomainError::insufficient("no clean transactions to estimate from");
    let low = weighted_quantile(&weighted, dec!(0.25)).ok_or_else(insufficient)?;
    let central = weighted_quantile(&weighted, dec!(0.5)).ok_or_else(insufficient)?;
    let high = weighted_quantile(&weighted, dec!(0.75)).ok_or_else(insufficient)?;

    MarketRateEstimate::try_new(
        central.round_dp(RATE_DP),
        low.round_dp(RATE_DP),
        high.round_dp(RATE_DP),
        contract_count.max(outcome.clean.len()),
        outcome.clean.len(),
    )
}
