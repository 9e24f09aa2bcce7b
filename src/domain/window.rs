//! Calendar months and trailing time windows.
//!
//! Government transaction data is published per contract month, so every
//! window is a whole number of months ending at (and including) `end`.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::error::DomainError;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a year-month, validating the month number.
    pub fn try_new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidYearMonth { year, month });
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The preceding calendar month.
    #[must_use]
    pub const fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Step back `months` calendar months.
    #[must_use]
    pub fn minus_months(&self, months: u32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 - months as i32;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// `YYYYMM` form used by the MOLIT `DEAL_YMD` parameter.
    #[must_use]
    pub fn as_deal_ymd(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// True when `date` falls in this month.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A trailing window of whole months ending at `end` (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    end: YearMonth,
    months: u32,
}

impl TimeWindow {
    /// Create a window of `months` months ending at `end`.
    pub fn try_new(end: YearMonth, months: u32) -> Result<Self, DomainError> {
        if months == 0 {
            return Err(DomainError::EmptyWindow);
        }
        Ok(Self { end, months })
    }

    /// The window of `months` months ending in the month of `date`.
    pub fn trailing(date: NaiveDate, months: u32) -> Result<Self, DomainError> {
        Self::try_new(YearMonth::from_date(date), months)
    }

    #[must_use]
    pub const fn end(&self) -> YearMonth {
        self.end
    }

    #[must_use]
    pub const fn len_months(&self) -> u32 {
        self.months
    }

    /// First month of the window.
    #[must_use]
    pub fn start(&self) -> YearMonth {
        self.end.minus_months(self.months - 1)
    }

    /// All months of the window, oldest first.
    #[must_use]
    pub fn months(&self) -> Vec<YearMonth> {
        (0..self.months)
            .rev()
            .map(|offset| self.end.minus_months(offset))
            .collect()
    }

    /// The adjacent window of equal length immediately before this one.
    #[must_use]
    pub fn previous(&self) -> Self {
        Self {
            end: self.start().pred(),
            months: self.months,
        }
    }

    /// True when `date` falls in one of the window's months.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        let month = YearMonth::from_date(date);
        month >= self.start() && month <= self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start(), self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::try_new(year, month).unwrap()
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(matches!(
            YearMonth::try_new(2024, 13),
            Err(DomainError::InvalidYearMonth { month: 13, .. })
        ));
        assert!(YearMonth::try_new(2024, 0).is_err());
    }

    #[test]
    fn minus_months_crosses_year_boundary() {
        assert_eq!(ym(2024, 2).minus_months(3), ym(2023, 11));
        assert_eq!(ym(2024, 1).pred(), ym(2023, 12));
        assert_eq!(ym(2024, 12).minus_months(12), ym(2023, 12));
    }

    #[test]
    fn deal_ymd_is_zero_padded() {
        assert_eq!(ym(2024, 3).as_deal_ymd(), "202403");
    }

    #[test]
    fn window_months_are_oldest_first() {
        let window = TimeWindow::try_new(ym(2024, 2), 3).unwrap();
        assert_eq!(
            window.months(),
            vec![ym(2023, 12), ym(2024, 1), ym(2024, 2)]
        );
        assert_eq!(window.start(), ym(2023, 12));
    }

    #[test]
    fn previous_window_is_adjacent_and_equal_length() {
        let window = TimeWindow::try_new(ym(2024, 6), 6).unwrap();
        let previous = window.previous();
        assert_eq!(previous.end(), ym(2023, 12));
        assert_eq!(previous.start(), ym(2023, 7));
        assert_eq!(previous.len_months(), 6);
    }

    #[test]
    fn window_contains_dates_in_range() {
        let window = TimeWindow::try_new(ym(2024, 6), 2).unwrap();
        let inside = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let outside = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        assert!(window.contains(inside));
        assert!(!window.contains(outside));
    }

    #[test]
    fn zero_month_window_is_rejected() {
        assert_eq!(
            TimeWindow::try_new(ym(2024, 1), 0),
            Err(DomainError::EmptyWindow)
        );
    }
}
