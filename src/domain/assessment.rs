//! Quote assessment against the market and legal rates.
//!
//! Category cutpoints on the rent difference percentage `p`:
//!
//! | range            | category            |
//! |------------------|---------------------|
//! | `p ≤ −5`         | good-deal           |
//! | `−5 < p ≤ 5`     | fair                |
//! | `5 < p ≤ 15`     | overpriced          |
//! | `p > 15`         | severely-overpriced |

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::error::DomainError;
use super::estimate::{ConfidenceLevel, MarketRateEstimate};
use super::money::{Rate, Won};
use super::quote::UserQuote;
use super::rate::{rent_at_rate, MONTHS_PER_YEAR, PERCENT};

/// Upper bound (inclusive) of the good-deal band.
pub const GOOD_DEAL_MAX_PERCENT: Decimal = dec!(-5);

/// Upper bound (inclusive) of the fair band.
pub const FAIR_MAX_PERCENT: Decimal = dec!(5);

/// Upper bound (inclusive) of the overpriced band.
pub const OVERPRICED_MAX_PERCENT: Decimal = dec!(15);

/// How a quote compares to the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentCategory {
    GoodDeal,
    Fair,
    Overpriced,
    SeverelyOverpriced,
}

impl AssessmentCategory {
    /// Category for a rent difference in percent of the expected rent.
    #[must_use]
    pub fn from_difference_percent(percent: Decimal) -> Self {
        if percent <= GOOD_DEAL_MAX_PERCENT {
            Self::GoodDeal
        } else if percent <= FAIR_MAX_PERCENT {
            Self::Fair
        } else if percent <= OVERPRICED_MAX_PERCENT {
            Self::Overpriced
        } else {
            Self::SeverelyOverpriced
        }
    }

    /// Korean label shown to renters.
    #[must_use]
    pub const fn label_ko(&self) -> &'static str {
        match self {
            Self::GoodDeal => "시세보다 저렴",
            Self::Fair => "적정 수준",
            Self::Overpriced => "시세보다 비쌈",
            Self::SeverelyOverpriced => "시세보다 매우 비쌈",
        }
    }
}

impl fmt::Display for AssessmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoodDeal => write!(f, "good-deal"),
            Self::Fair => write!(f, "fair"),
            Self::Overpriced => write!(f, "overpriced"),
            Self::SeverelyOverpriced => write!(f, "severely-overpriced"),
        }
    }
}

/// Outcome of comparing a quote with the market and the legal cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteAssessment {
    #[serde(rename = "assessmentCategory")]
    pub category: AssessmentCategory,
    /// Rent at the quote's deposit under the market central rate.
    pub expected_rent: Won,
    /// Quote rent minus expected rent.
    pub rent_difference: Won,
    /// Rent difference in percent of the expected rent, two decimals.
    pub rent_difference_percent: Decimal,
    /// Yearly saving from negotiating down to the expected rent.
    pub savings_vs_market: Won,
    /// Yearly saving from negotiating down to the legal maximum rent.
    pub savings_vs_legal: Won,
    /// Rent at the quote's deposit under the legal maximum rate.
    pub legal_rent: Won,
    /// Rate implied by the quote.
    pub quote_rate: Rate,
    /// Market central rate the assessment used.
    pub market_rate: Rate,
    /// Legal maximum rate the assessment used.
    pub legal_max_rate: Rate,
    /// Confidence of the market estimate, carried through unchanged.
    pub confidence_level: ConfidenceLevel,
}

impl QuoteAssessment {
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        self.confidence_level == ConfidenceLevel::Low
    }
}

/// Rent difference in percent of `expected_rent`.
///
/// A positive difference over an expected rent that rounded to zero (or a
/// ratio too large for `Decimal`) saturates so the category still follows
/// the sign of the difference.
fn difference_percent(rent_difference: Won, expected_rent: Won) -> Decimal {
    rent_difference
        .checked_mul(PERCENT)
        .and_then(|scaled| scaled.checked_div(expected_rent))
        .unwrap_or(if rent_difference > Decimal::ZERO {
            Decimal::MAX
        } else if rent_difference < Decimal::ZERO {
            Decimal::MIN
        } else {
            Decimal::ZERO
        })
        .round_dp(2)
}

/// Compare a quote with the market estimate and the legal maximum rate.
///
/// # Errors
///
/// Returns [`DomainError::OutOfRange`] if the expected or legal rent at the
/// quote's deposit does not fit in a `Decimal`.
pub fn assess_quote(
    quote: &UserQuote,
    market: &MarketRateEstimate,
    legal_max_rate: Rate,
) -> Result<QuoteAssessment, DomainError> {
    let deposit = quote.deposit_amount();
    let rent = quote.monthly_rent();

    let expected_rent = rent_at_rate(deposit, market.central_rate())
        .ok_or(DomainError::OutOfRange { quantity: "expected rent" })?;
    let legal_rent = rent_at_rate(deposit, legal_max_rate)
        .ok_or(DomainError::OutOfRange { quantity: "legal maximum rent" })?;

    let rent_difference = rent - expected_rent;
    let rent_difference_percent = difference_percent(rent_difference, expected_rent);

    // rent is bounded by MAX_AMOUNT, so the yearly figures cannot overflow
    let savings_vs_market = rent_difference.max(Decimal::ZERO) * MONTHS_PER_YEAR;
    let savings_vs_legal = (rent - legal_rent).max(Decimal::ZERO) * MONTHS_PER_YEAR;

    Ok(QuoteAssessment {
        category: AssessmentCategory::from_difference_percent(rent_difference_percent),
        expected_rent,
        rent_difference,
        rent_difference_percent,
        savings_vs_market,
        savings_vs_legal,
        legal_rent,
        quote_rate: quote.implied_rate(),
        market_rate: market.central_rate(),
        legal_max_rate,
        confidence_level: market.confidence_level(),
    })
}
