//! Tukey-fence outlier rejection on implied conversion rates.
//!
//! Self-reported rent contracts contain typos and unusual arrangements
//! (rent-free months folded into the rent, unit-of-measure mistakes). A
//! record is an outlier when its implied rate falls below `Q1 − k·IQR` or
//! above `Q3 + k·IQR` of the sample.
//!
//! When filtering would leave fewer than [`OutlierPolicy::min_clean`]
//! records, the unfiltered sample is returned instead: an estimate from
//! raw data is preferred over no estimate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::error::DomainError;
use super::money::Rate;
use super::stats::quantile;
use super::transaction::TransactionRecord;

/// Outlier rejection settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OutlierPolicy {
    /// IQR multiplier for the Tukey fences.
    #[serde(default = "default_fence_k")]
    pub fence_k: Decimal,

    /// Minimum records that must survive filtering; otherwise the filter
    /// falls back to the unfiltered sample.
    #[serde(default = "default_min_clean")]
    pub min_clean: usize,
}

fn default_fence_k() -> Decimal {
    dec!(1.5)
}

const fn default_min_clean() -> usize {
    3
}

impl Default for OutlierPolicy {
    fn default() -> Self {
        Self {
            fence_k: default_fence_k(),
            min_clean: default_min_clean(),
        }
    }
}

/// Inclusive band of acceptable implied rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fences {
    pub lower: Rate,
    pub upper: Rate,
}

impl Fences {
    #[must_use]
    pub fn contains(&self, rate: Rate) -> bool {
        rate >= self.lower && rate <= self.upper
    }
}

/// Result of one filtering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Records kept for estimation.
    pub clean: Vec<TransactionRecord>,
    /// Records rejected by the fences (zero on fallback).
    pub outlier_count: usize,
    /// Fences computed from the sample.
    pub fences: Fences,
    /// True when too few records survived and the raw sample was kept.
    pub fell_back: bool,
}

/// Compute the Tukey fences of a sample of rates.
///
/// Returns `None` for an empty sample.
#[must_use]
pub fn tukey_fences(rates: &[Rate], fence_k: Decimal) -> Option<Fences> {
    let mut sorted = rates.to_vec();
    sorted.sort();

    let q1 = quantile(&sorted, dec!(0.25))?;
    let q3 = quantile(&sorted, dec!(0.75))?;
    let spread = (q3 - q1) * fence_k;

    Some(Fences {
        lower: q1 - spread,
        upper: q3 + spread,
    })
}

/// Remove records whose implied rate lies outside the Tukey fences.
///
/// # Errors
///
/// Returns [`DomainError::InsufficientData`] for an empty input.
pub fn filter_outliers(
    records: &[TransactionRecord],
    policy: &OutlierPolicy,
) -> Result<FilterOutcome, DomainError> {
    let rates: Vec<Rate> = records.iter().map(TransactionRecord::implied_rate).collect();
    let fences = tukey_fences(&rates, policy.fence_k)
        .ok_or_else(|| DomainError::insufficient("no transactions to filter"))?;

    let clean: Vec<TransactionRecord> = records
        .iter()
        .zip(&rates)
        .filter(|(_, rate)| fences.contains(**rate))
        .map(|(record, _)| record.clone())
        .collect();

    if clean.len() < policy.min_clean.min(records.len()) {
        return Ok(FilterOutcome {
            clean: records.to_vec(),
            outlier_count: 0,
            fences,
            fell_back: true,
        });
    }

    Ok(FilterOutcome {
        outlier_count: records.len() - clean.len(),
        clean,
        fences,
        fell_back: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(deposit: Decimal, rent: Decimal) -> TransactionRecord {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        TransactionRecord::try_new(deposit, rent, dec!(84), date).unwrap()
    }

    fn uniform_with_outliers() -> Vec<TransactionRecord> {
        let mut records: Vec<_> = (0..18)
            .map(|_| record(dec!(50_000_000), dec!(1_500_000)))
            .collect();
        records.push(record(dec!(50_000_000), dec!(5_000_000)));
        records.push(record(dec!(50_000_000), dec!(5_000_000)));
        records
    }

    #[test]
    fn empty_input_is_insufficient_data() {
        let result = filter_outliers(&[], &OutlierPolicy::default());
        assert!(matches!(result, Err(DomainError::InsufficientData { .. })));
    }

    #[test]
    fn excludes_high_rent_outliers() {
        let outcome = filter_outliers(&uniform_with_outliers(), &OutlierPolicy::default()).unwrap();

        assert_eq!(outcome.clean.len(), 18);
        assert_eq!(outcome.outlier_count, 2);
        assert!(!outcome.fell_back);
        assert!(outcome.clean.iter().all(|r| r.implied_rate() == dec!(36)));
    }

    #[test]
    fn keeps_spread_sample_without_outliers() {
        let records: Vec<_> = [dec!(1_000_000), dec!(1_050_000), dec!(1_100_000), dec!(1_150_000)]
            .into_iter()
            .map(|rent| record(dec!(50_000_000), rent))
            .collect();

        let outcome = filter_outliers(&records, &OutlierPolicy::default()).unwrap();
        assert_eq!(outcome.clean.len(), 4);
        assert_eq!(outcome.outlier_count, 0);
    }

    #[test]
    fn falls_back_when_too_few_survive() {
        let records = vec![
            record(dec!(50_000_000), dec!(1_000_000)),
            record(dec!(50_000_000), dec!(1_000_000)),
            record(dec!(50_000_000), dec!(1_000_000)),
            record(dec!(50_000_000), dec!(9_000_000)),
        ];
        let policy = OutlierPolicy {
            fence_k: dec!(1.5),
            min_clean: 4,
        };

        let outcome = filter_outliers(&records, &policy).unwrap();
        assert!(outcome.fell_back);
        assert_eq!(outcome.clean.len(), 4);
        assert_eq!(outcome.outlier_count, 0);
    }

    #[test]
    fn single_record_is_kept() {
        let records = vec![record(dec!(20_000_000), dec!(700_000))];
        let outcome = filter_outliers(&records, &OutlierPolicy::default()).unwrap();
        assert_eq!(outcome.clean.len(), 1);
        assert_eq!(outcome.outlier_count, 0);
    }

    #[test]
    fn clean_count_never_exceeds_input() {
        let mut records = uniform_with_outliers();
        for extra in 0..5 {
            records.push(record(dec!(30_000_000), Decimal::from(800_000 + extra * 10_000)));
            let outcome = filter_outliers(&records, &OutlierPolicy::default()).unwrap();
            assert!(outcome.clean.len() <= records.len());
            assert_eq!(outcome.clean.len() + outcome.outlier_count, records.len());
        }
    }

    #[test]
    fn fences_widen_with_k() {
        let rates = [dec!(10), dec!(12), dec!(14), dec!(16)];
        let narrow = tukey_fences(&rates, dec!(0.5)).unwrap();
        let wide = tukey_fences(&rates, dec!(3)).unwrap();
        assert!(wide.lower < narrow.lower);
        assert!(wide.upper > narrow.upper);
    }
}
