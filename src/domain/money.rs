//! Monetary and rate types for KRW amounts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Amount in Korean won, kept as whole won after rounding.
pub type Won = Decimal;

/// Annual rate expressed in percent (36.5 means 36.5%).
pub type Rate = Decimal;

/// Largest deposit or rent accepted anywhere in the engine (1,000조원).
///
/// Together with [`MIN_DEPOSIT`] this keeps every implied rate, fence and
/// expected rent well inside `Decimal` range.
pub const MAX_AMOUNT: Won = dec!(1_000_000_000_000_000);

/// Smallest deposit a rate can be derived from.
pub const MIN_DEPOSIT: Won = Decimal::ONE;

/// Format a won amount with thousands separators, e.g. `1,500,000원`.
#[must_use]
pub fn format_won(amount: Won) -> String {
    let rounded = amount.round_dp(0);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}원")
    } else {
        format!("{grouped}원")
    }
}

/// Format a percent rate with at most two decimals, e.g. `5.5%`.
#[must_use]
pub fn format_rate(rate: Rate) -> String {
    format!("{}%", rate.round_dp(2).normalize())
}
