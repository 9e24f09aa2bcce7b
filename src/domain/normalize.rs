//! Coercion of raw government rows into validated records.
//!
//! Published rows carry amounts as strings in units of 10,000 won with
//! thousands separators and stray whitespace. Rows that cannot be coerced
//! are excluded and counted rather than failing the whole batch.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::transaction::{RawTransaction, TransactionRecord};

/// Won per published amount unit (만원).
pub const MANWON: Decimal = dec!(10_000);

/// Outcome counts for one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationReport {
    /// Rows converted into records.
    pub accepted: usize,
    /// Rows dropped for unparseable or out-of-range fields.
    pub rejected_malformed: usize,
    /// Pure jeonse rows (zero monthly rent), not part of a wolse sample.
    pub skipped_jeonse: usize,
}

impl NormalizationReport {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.accepted + self.rejected_malformed + self.skipped_jeonse
    }
}

/// Parse a published numeric string, tolerating separators and whitespace.
///
/// Returns `None` for empty or non-numeric input.
#[must_use]
pub fn parse_numeric(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

fn parse_floor(raw: Option<&str>) -> Option<i32> {
    let cleaned = raw?.trim();
    cleaned.parse::<i32>().ok()
}

fn parse_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year = year.trim().parse::<i32>().ok()?;
    let month = month.trim().parse::<u32>().ok()?;
    let day = day.trim().parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

enum RowOutcome {
    Accepted(TransactionRecord),
    Malformed,
    Jeonse,
}

fn normalize_row(row: &RawTransaction) -> RowOutcome {
    let Some(deposit) = parse_numeric(&row.deposit) else {
        return RowOutcome::Malformed;
    };
    let Some(rent) = parse_numeric(&row.monthly_rent) else {
        return RowOutcome::Malformed;
    };
    if rent.is_zero() {
        return RowOutcome::Jeonse;
    }
    let Some(area) = parse_numeric(&row.exclusive_area) else {
        return RowOutcome::Malformed;
    };
    let Some(date) = parse_date(&row.year, &row.month, &row.day) else {
        return RowOutcome::Malformed;
    };

    let (Some(deposit), Some(rent)) = (deposit.checked_mul(MANWON), rent.checked_mul(MANWON)) else {
        return RowOutcome::Malformed;
    };

    match TransactionRecord::try_new(deposit, rent, area, date) {
        Ok(record) => RowOutcome::Accepted(
            record
                .with_floor(parse_floor(row.floor.as_deref()))
                .with_location(
                    row.dong.as_deref().unwrap_or_default().trim(),
                    row.apartment_name.as_deref().unwrap_or_default().trim(),
                ),
        ),
        Err(_) => RowOutcome::Malformed,
    }
}

/// Convert raw rows into validated records.
#[must_use]
pub fn normalize(rows: &[RawTransaction]) -> (Vec<TransactionRecord>, NormalizationReport) {
    let mut report = NormalizationReport::default();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        match normalize_row(row) {
            RowOutcome::Accepted(record) => {
                report.accepted += 1;
                records.push(record);
            }
            RowOutcome::Malformed => report.rejected_malformed += 1,
            RowOutcome::Jeonse => report.skipped_jeonse += 1,
        }
    }

    (records, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(deposit: &str, rent: &str) -> RawTransaction {
        RawTransaction {
            deposit: deposit.into(),
            monthly_rent: rent.into(),
            exclusive_area: "84.97".into(),
            floor: Some("7".into()),
            year: "2024".into(),
            month: "3".into(),
            day: "15".into(),
            dong: Some(" 공덕동".into()),
            apartment_name: Some("공덕래미안".into()),
        }
    }

    #[test]
    fn parses_separators_and_whitespace() {
        assert_eq!(parse_numeric(" 50,000"), Some(dec!(50000)));
        assert_eq!(parse_numeric("84.97"), Some(dec!(84.97)));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("n/a"), None);
    }

    #[test]
    fn converts_manwon_to_won() {
        let (records, report) = normalize(&[row("5,000", "150")]);
        assert_eq!(report.accepted, 1);
        assert_eq!(records[0].deposit_amount(), dec!(50_000_000));
        assert_eq!(records[0].monthly_rent(), dec!(1_500_000));
        assert_eq!(records[0].floor(), Some(7));
        assert_eq!(records[0].dong(), "공덕동");
    }

    #[test]
    fn skips_jeonse_rows() {
        let (records, report) = normalize(&[row("30,000", "0")]);
        assert!(records.is_empty());
        assert_eq!(report.skipped_jeonse, 1);
    }

    #[test]
    fn rejects_malformed_rows() {
        let mut bad_date = row("5,000", "150");
        bad_date.month = "13".into();
        let mut bad_area = row("5,000", "150");
        bad_area.exclusive_area = "".into();

        let rows = vec![
            row("abc", "150"),
            row("5,000", "?"),
            row("0", "150"),
            bad_date,
            bad_area,
        ];
        let (records, report) = normalize(&rows);

        assert!(records.is_empty());
        assert_eq!(report.rejected_malformed, 5);
        assert_eq!(report.total(), rows.len());
    }

    #[test]
    fn rejects_amounts_too_large_to_convert() {
        let rows = vec![
            row("99,999,999,999,999,999,999,999,999", "150"),
            row("5,000", "99,999,999,999,999,999,999,999,999"),
            row("5,000", "1,000,000,000,000"),
        ];
        let (records, report) = normalize(&rows);

        assert!(records.is_empty());
        assert_eq!(report.rejected_malformed, 3);
    }

    #[test]
    fn tolerates_missing_or_bad_floor() {
        let mut missing = row("5,000", "150");
        missing.floor = None;
        let mut garbage = row("5,000", "150");
        garbage.floor = Some("B1".into());

        let (records, report) = normalize(&[missing, garbage]);
        assert_eq!(report.accepted, 2);
        assert!(records.iter().all(|r| r.floor().is_none()));
    }
}
