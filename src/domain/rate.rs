//! Deposit/rent conversion formula.
//!
//! The implied rate of a contract is the annual rent expressed as a
//! percentage of the deposit:
//!
//! ```text
//! implied_rate = monthly_rent × 12 / deposit × 100
//! ```
//!
//! [`rent_at_rate`] is its inverse. Both the per-transaction rates and the
//! expected rent of a quote go through these two functions so that the
//! assessment stays internally consistent.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::money::{Rate, Won};

/// Months per year used to annualize monthly rent.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Scale factor from a fraction to percent.
pub const PERCENT: Decimal = dec!(100);

/// Annual percentage rate implied by `monthly_rent` over `deposit`.
///
/// Returns `None` when the deposit is not positive or the rate does not fit
/// in a `Decimal`.
#[must_use]
pub fn implied_rate(deposit: Won, monthly_rent: Won) -> Option<Rate> {
    if deposit <= Decimal::ZERO {
        return None;
    }
    monthly_rent
        .checked_mul(MONTHS_PER_YEAR * PERCENT)?
        .checked_div(deposit)
}

/// Monthly rent a landlord would charge on `deposit` at `rate`, in whole won.
///
/// Returns `None` when the rent does not fit in a `Decimal`.
#[must_use]
pub fn rent_at_rate(deposit: Won, rate: Rate) -> Option<Won> {
    deposit
        .checked_mul(rate)?
        .checked_div(PERCENT * MONTHS_PER_YEAR)
        .map(|rent| rent.round_dp(0))
}

/// Statutory cap on the deposit/rent conversion rate.
///
/// The cap is the central bank base rate plus a fixed spread set by the
/// Housing Lease Protection Act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalRateCap {
    /// Bank of Korea base rate in percent.
    pub base_rate: Rate,
    /// Statutory spread added on top of the base rate, in percent points.
    pub spread: Rate,
}

impl LegalRateCap {
    #[must_use]
    pub const fn new(base_rate: Rate, spread: Rate) -> Self {
        Self { base_rate, spread }
    }

    /// Maximum conversion rate a landlord may apply.
    #[must_use]
    pub fn max_rate(&self) -> Rate {
        self.base_rate + self.spread
    }
}

impl Default for LegalRateCap {
    fn default() -> Self {
        Self {
            base_rate: dec!(2.50),
            spread: dec!(2.0),
        }
    }
}
