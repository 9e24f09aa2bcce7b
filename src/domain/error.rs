//! Domain validation errors for rent analysis.
//!
//! This module defines errors that occur when domain invariants are violated
//! or when the engine cannot produce an estimate from the data it was given.
//! These errors are returned by `try_new` constructors and by the pure
//! pipeline stages (outlier filter, estimator, region resolution).
//!
//! # Examples
//!
//! Handling validation errors:
//!
//! ```
//! use krent::domain::error::DomainError;
//! use krent::domain::quote::UserQuote;
//! use rust_decimal_macros::dec;
//!
//! // A zero deposit cannot be converted into a rate.
//! let result = UserQuote::try_new(dec!(0), dec!(1_500_000));
//!
//! assert!(matches!(
//!     result,
//!     Err(DomainError::InvalidQuote { field: "deposit_amount", .. })
//! ));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// No transactions were available to estimate a market rate.
    #[error("insufficient transaction data: {context}")]
    InsufficientData {
        /// Where the data ran out (area, window, or pipeline stage).
        context: String,
    },

    /// A user-supplied quote value is non-positive or non-numeric.
    #[error("invalid quote {field}: {reason}")]
    InvalidQuote {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A transaction record violates a structural invariant.
    #[error("invalid transaction {field}: {value}")]
    InvalidTransaction {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// A market rate estimate violates ordering or count invariants.
    #[error("invalid market estimate: {reason}")]
    InvalidEstimate {
        /// Which invariant failed.
        reason: String,
    },

    /// A derived amount does not fit in a `Decimal`.
    #[error("{quantity} is out of range")]
    OutOfRange {
        /// What was being computed.
        quantity: &'static str,
    },

    /// A time window must cover at least one month.
    #[error("time window must span at least one month")]
    EmptyWindow,

    /// A year/month pair does not name a calendar month.
    #[error("invalid year-month {year}-{month}")]
    InvalidYearMonth {
        /// Calendar year.
        year: i32,
        /// Calendar month (1-12).
        month: u32,
    },

    /// The district could not be mapped to a MOLIT region code.
    #[error("unknown region: {city} {district}")]
    UnknownRegion {
        /// City or province name as supplied.
        city: String,
        /// District name as supplied.
        district: String,
    },
}

impl DomainError {
    /// Shorthand for an [`DomainError::InsufficientData`] error.
    pub fn insufficient(context: impl Into<String>) -> Self {
        Self::InsufficientData {
            context: context.into(),
        }
    }
}
