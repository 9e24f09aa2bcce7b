//! Market direction between two adjacent windows.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::estimate::MarketRateEstimate;
use super::rate::PERCENT;

/// Absolute percentage change below which the market counts as stable.
pub const DEFAULT_STABLE_THRESHOLD: Decimal = dec!(2);

/// Direction of the central conversion rate over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Declining,
    Stable,
}

impl TrendDirection {
    /// Fixed advisory text for renters.
    #[must_use]
    pub const fn advisory(&self) -> &'static str {
        match self {
            Self::Rising => {
                "최근 전월세 전환율이 오르는 추세입니다. 계약을 서두르거나 보증금 비중을 높여 월세 부담을 줄이는 방안을 검토해 보세요."
            }
            Self::Declining => {
                "최근 전월세 전환율이 내려가는 추세입니다. 시세 하락을 근거로 월세 인하를 협상할 여지가 큽니다."
            }
            Self::Stable => {
                "최근 전월세 전환율이 안정적입니다. 현재 시세를 기준으로 협상하시면 됩니다."
            }
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rising => write!(f, "rising"),
            Self::Declining => write!(f, "declining"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Classified change between the prior and the recent window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// Change of the central rate in percent of the prior central rate.
    pub percentage_change: Decimal,
    pub advisory_text: String,
}

/// Classify a percentage change.
#[must_use]
pub fn classify_change(percentage_change: Decimal, stable_threshold: Decimal) -> TrendDirection {
    if percentage_change.abs() < stable_threshold {
        TrendDirection::Stable
    } else if percentage_change > Decimal::ZERO {
        TrendDirection::Rising
    } else {
        TrendDirection::Declining
    }
}

/// Compare the recent window's estimate against the prior window's.
#[must_use]
pub fn detect_trend(
    recent: &MarketRateEstimate,
    prior: &MarketRateEstimate,
    stable_threshold: Decimal,
) -> TrendResult {
    let percentage_change = if prior.central_rate().is_zero() {
        Decimal::ZERO
    } else {
        ((recent.central_rate() - prior.central_rate()) / prior.central_rate() * PERCENT).round_dp(2)
    };
    let direction = classify_change(percentage_change, stable_threshold);

    TrendResult {
        direction,
        percentage_change,
        advisory_text: direction.advisory().to_string(),
    }
}
