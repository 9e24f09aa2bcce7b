//! Builders for domain primitives used across tests.
//!
//! Amounts in raw rows are in 10,000-won units, as MOLIT publishes them.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::transaction::{RawTransaction, TransactionRecord};

/// Shorthand for a calendar date.
///
/// # Panics
///
/// Panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// A raw MOLIT row for the given contract date.
pub fn raw_row(deposit_manwon: u32, rent_manwon: u32, area: &str, on: NaiveDate) -> RawTransaction {
    use chrono::Datelike;

    RawTransaction {
        deposit: format_manwon(deposit_manwon),
        monthly_rent: rent_manwon.to_string(),
        exclusive_area: area.to_string(),
        floor: Some("7".into()),
        year: on.year().to_string(),
        month: on.month().to_string(),
        day: on.day().to_string(),
        dong: Some("공덕동".into()),
        apartment_name: Some("공덕래미안".into()),
    }
}

/// Same row with a different dong and apartment.
pub fn located(mut row: RawTransaction, dong: &str, apartment: &str) -> RawTransaction {
    row.dong = Some(dong.into());
    row.apartment_name = Some(apartment.into());
    row
}

/// `count` identical rows spread over the days of one month.
pub fn rows_in_month(
    count: u32,
    deposit_manwon: u32,
    rent_manwon: u32,
    year: i32,
    month: u32,
) -> Vec<RawTransaction> {
    (0..count)
        .map(|i| raw_row(deposit_manwon, rent_manwon, "84.9", date(year, month, 1 + i % 28)))
        .collect()
}

/// A validated record in won.
///
/// # Panics
///
/// Panics if the amounts violate record invariants.
pub fn record(deposit: Decimal, rent: Decimal, area: Decimal, on: NaiveDate) -> TransactionRecord {
    TransactionRecord::try_new(deposit, rent, area, on)
        .expect("valid test record")
        .with_location("공덕동", "공덕래미안")
}

fn format_manwon(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_rows_use_molit_formatting() {
        let row = raw_row(5_000, 150, "84.9", date(2024, 5, 3));
        assert_eq!(row.deposit, "5,000");
        assert_eq!(row.monthly_rent, "150");
        assert_eq!(row.month, "5");
    }
}
