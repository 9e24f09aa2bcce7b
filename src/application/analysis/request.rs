//! Analysis input.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::money::Won;
use crate::domain::scope::ScopeTarget;

/// A renter's quote and the home it is for.
///
/// Amounts are taken as given; the analyzer validates them before doing
/// any work.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// City or province (`서울특별시`). Empty means Seoul.
    pub city: String,
    /// District name or 5-digit MOLIT code.
    pub district: String,
    pub dong: Option<String>,
    pub apartment_name: Option<String>,
    pub exclusive_area_sqm: Option<Decimal>,
    pub deposit_amount: Won,
    pub monthly_rent: Won,
    /// Reference date for the trailing window; today when absent.
    pub as_of: Option<NaiveDate>,
}

impl AnalysisRequest {
    /// Request for a district with no further narrowing.
    #[must_use]
    pub fn new(district: impl Into<String>, deposit_amount: Won, monthly_rent: Won) -> Self {
        Self {
            city: String::new(),
            district: district.into(),
            dong: None,
            apartment_name: None,
            exclusive_area_sqm: None,
            deposit_amount,
            monthly_rent,
            as_of: None,
        }
    }

    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    #[must_use]
    pub fn with_dong(mut self, dong: impl Into<String>) -> Self {
        self.dong = Some(dong.into());
        self
    }

    #[must_use]
    pub fn with_apartment(mut self, apartment_name: impl Into<String>) -> Self {
        self.apartment_name = Some(apartment_name.into());
        self
    }

    #[must_use]
    pub fn with_area(mut self, exclusive_area_sqm: Decimal) -> Self {
        self.exclusive_area_sqm = Some(exclusive_area_sqm);
        self
    }

    #[must_use]
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// The part of the request that narrows the transaction sample.
    #[must_use]
    pub fn scope_target(&self) -> ScopeTarget {
        ScopeTarget {
            dong: self.dong.clone(),
            apartment_name: self.apartment_name.clone(),
            exclusive_area_sqm: self.exclusive_area_sqm,
        }
    }
}
