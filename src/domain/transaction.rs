//! Historical rental contracts.
//!
//! [`RawTransaction`] is what a transaction source hands over: strings as
//! published, possibly malformed. [`TransactionRecord`] is a validated,
//! immutable contract the engine computes on.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;
use super::money::{Rate, Won, MAX_AMOUNT, MIN_DEPOSIT};
use super::rate::implied_rate;

/// One row of government transaction data before validation.
///
/// Amount fields are in units of 10,000 won (만원), as published.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTransaction {
    pub deposit: String,
    pub monthly_rent: String,
    pub exclusive_area: String,
    pub floor: Option<String>,
    pub year: String,
    pub month: String,
    pub day: String,
    pub dong: Option<String>,
    pub apartment_name: Option<String>,
}

/// A validated monthly-rent contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    deposit_amount: Won,
    monthly_rent: Won,
    exclusive_area_sqm: Decimal,
    floor: Option<i32>,
    contract_date: NaiveDate,
    dong: String,
    apartment_name: String,
}

impl TransactionRecord {
    /// Create a record, validating amounts and area.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransaction`] if the deposit is below one
    /// won, the area is not positive, the monthly rent is negative, or an
    /// amount exceeds [`MAX_AMOUNT`].
    pub fn try_new(
        deposit_amount: Won,
        monthly_rent: Won,
        exclusive_area_sqm: Decimal,
        contract_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        if deposit_amount < MIN_DEPOSIT || deposit_amount > MAX_AMOUNT {
            return Err(DomainError::InvalidTransaction {
                field: "deposit_amount",
                value: deposit_amount,
            });
        }
        if monthly_rent < Decimal::ZERO || monthly_rent > MAX_AMOUNT {
            return Err(DomainError::InvalidTransaction {
                field: "monthly_rent",
                value: monthly_rent,
            });
        }
        if exclusive_area_sqm <= Decimal::ZERO {
            return Err(DomainError::InvalidTransaction {
                field: "exclusive_area_sqm",
                value: exclusive_area_sqm,
            });
        }

        Ok(Self {
            deposit_amount,
            monthly_rent,
            exclusive_area_sqm,
            floor: None,
            contract_date,
            dong: String::new(),
            apartment_name: String::new(),
        })
    }

    /// Attach the floor number.
    #[must_use]
    pub fn with_floor(mut self, floor: Option<i32>) -> Self {
        self.floor = floor;
        self
    }

    /// Attach the legal dong and apartment complex name.
    #[must_use]
    pub fn with_location(mut self, dong: impl Into<String>, apartment_name: impl Into<String>) -> Self {
        self.dong = dong.into();
        self.apartment_name = apartment_name.into();
        self
    }

    #[must_use]
    pub const fn deposit_amount(&self) -> Won {
        self.deposit_amount
    }

    #[must_use]
    pub const fn monthly_rent(&self) -> Won {
        self.monthly_rent
    }

    #[must_use]
    pub const fn exclusive_area_sqm(&self) -> Decimal {
        self.exclusive_area_sqm
    }

    #[must_use]
    pub const fn floor(&self) -> Option<i32> {
        self.floor
    }

    #[must_use]
    pub const fn contract_date(&self) -> NaiveDate {
        self.contract_date
    }

    #[must_use]
    pub fn dong(&self) -> &str {
        &self.dong
    }

    #[must_use]
    pub fn apartment_name(&self) -> &str {
        &self.apartment_name
    }

    /// Annual conversion rate implied by this contract, in percent.
    #[must_use]
    pub fn implied_rate(&self) -> Rate {
        // try_new bounds both amounts, so the rate always fits
        implied_rate(self.deposit_amount, self.monthly_rent).unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn computes_implied_rate() {
        let record =
            TransactionRecord::try_new(dec!(50_000_000), dec!(1_500_000), dec!(84.97), date())
                .unwrap();
        assert_eq!(record.implied_rate(), dec!(36));
    }

    #[test]
    fn rejects_non_positive_deposit() {
        let result = TransactionRecord::try_new(dec!(0), dec!(1_500_000), dec!(84.97), date());
        assert!(matches!(
            result,
            Err(DomainError::InvalidTransaction {
                field: "deposit_amount",
                ..
            })
        ));
    }

    #[test]
    fn rejects_amounts_beyond_range() {
        let over = MAX_AMOUNT + Decimal::ONE;
        let result = TransactionRecord::try_new(dec!(10_000_000), over, dec!(84.97), date());
        assert!(matches!(
            result,
            Err(DomainError::InvalidTransaction {
                field: "monthly_rent",
                ..
            })
        ));

        let result = TransactionRecord::try_new(dec!(0.5), dec!(500_000), dec!(84.97), date());
        assert!(matches!(
            result,
            Err(DomainError::InvalidTransaction {
                field: "deposit_amount",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_positive_area() {
        let result =
            TransactionRecord::try_new(dec!(10_000_000), dec!(500_000), dec!(0), date());
        assert!(matches!(
            result,
            Err(DomainError::InvalidTransaction {
                field: "exclusive_area_sqm",
                ..
            })
        ));
    }

    #[test]
    fn location_and_floor_are_optional() {
        let record =
            TransactionRecord::try_new(dec!(10_000_000), dec!(500_000), dec!(59.9), date())
                .unwrap();
        assert_eq!(record.floor(), None);
        assert_eq!(record.dong(), "");

        let record = record.with_floor(Some(-1)).with_location("공덕동", "래미안");
        assert_eq!(record.floor(), Some(-1));
        assert_eq!(record.apartment_name(), "래미안");
    }
}
