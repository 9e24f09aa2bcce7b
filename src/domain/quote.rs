//! The renter's deposit/rent quote.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;
use super::money::{format_won, Rate, Won, MAX_AMOUNT, MIN_DEPOSIT};
use super::normalize::parse_numeric;
use super::rate::implied_rate;

/// Deposit and monthly rent offered by a landlord, in won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuote {
    deposit_amount: Won,
    monthly_rent: Won,
}

impl UserQuote {
    /// Create a quote, rejecting non-positive or out-of-range amounts.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidQuote`] naming the offending field.
    pub fn try_new(deposit_amount: Won, monthly_rent: Won) -> Result<Self, DomainError> {
        check_amount("deposit_amount", deposit_amount)?;
        check_amount("monthly_rent", monthly_rent)?;
        if deposit_amount < MIN_DEPOSIT {
            return Err(DomainError::InvalidQuote {
                field: "deposit_amount",
                reason: format!("must be at least {}, got {deposit_amount}", format_won(MIN_DEPOSIT)),
            });
        }
        if implied_rate(deposit_amount, monthly_rent).is_none() {
            return Err(DomainError::InvalidQuote {
                field: "monthly_rent",
                reason: "implied conversion rate is out of range".to_string(),
            });
        }
        Ok(Self {
            deposit_amount,
            monthly_rent,
        })
    }

    /// Parse a quote from user-entered text such as `"50,000,000"`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidQuote`] for non-numeric or
    /// non-positive input.
    pub fn parse(deposit_amount: &str, monthly_rent: &str) -> Result<Self, DomainError> {
        let deposit = parse_numeric(deposit_amount).ok_or_else(|| DomainError::InvalidQuote {
            field: "deposit_amount",
            reason: format!("not a number: {deposit_amount:?}"),
        })?;
        let rent = parse_numeric(monthly_rent).ok_or_else(|| DomainError::InvalidQuote {
            field: "monthly_rent",
            reason: format!("not a number: {monthly_rent:?}"),
        })?;
        Self::try_new(deposit, rent)
    }

    #[must_use]
    pub const fn deposit_amount(&self) -> Won {
        self.deposit_amount
    }

    #[must_use]
    pub const fn monthly_rent(&self) -> Won {
        self.monthly_rent
    }

    /// Conversion rate implied by this quote, in percent.
    #[must_use]
    pub fn implied_rate(&self) -> Rate {
        // computability is checked in try_new
        implied_rate(self.deposit_amount, self.monthly_rent).unwrap_or(Decimal::ZERO)
    }
}

fn check_amount(field: &'static str, amount: Won) -> Result<(), DomainError> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::InvalidQuote {
            field,
            reason: format!("must be positive, got {amount}"),
        });
    }
    if amount > MAX_AMOUNT {
        return Err(DomainError::InvalidQuote {
            field,
            reason: format!("must not exceed {}, got {amount}", format_won(MAX_AMOUNT)),
        });
    }
    Ok(())
}
