//! Sample selection with scope relaxation.
//!
//! A district-wide fetch is narrowed to the requested apartment complex and
//! comparable unit sizes. When that leaves too few contracts, the scope
//! widens to the dong and then to the whole district. The unit-size filter
//! applies at every scope.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::TransactionRecord;

/// How far the sample had to widen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleScope {
    Apartment,
    Dong,
    District,
}

impl fmt::Display for SampleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apartment => write!(f, "apartment"),
            Self::Dong => write!(f, "dong"),
            Self::District => write!(f, "district"),
        }
    }
}

/// What the renter is looking at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeTarget {
    pub dong: Option<String>,
    pub apartment_name: Option<String>,
    pub exclusive_area_sqm: Option<Decimal>,
}

/// Sample selection settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScopePolicy {
    /// Maximum relative unit-size difference (0.15 = ±15%).
    pub area_tolerance: Decimal,
    /// Minimum contracts a scope needs before it is used.
    pub min_sample: usize,
}

fn normalize_name(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

fn name_matches(candidate: &str, wanted: &str) -> bool {
    let candidate = normalize_name(candidate);
    let wanted = normalize_name(wanted);
    !wanted.is_empty() && (candidate == wanted || candidate.contains(&wanted))
}

fn area_matches(area: Decimal, target: Option<Decimal>, tolerance: Decimal) -> bool {
    match target {
        Some(target) if target > Decimal::ZERO => (area - target).abs() / target <= tolerance,
        _ => true,
    }
}

/// Select the narrowest scope holding at least `min_sample` contracts.
///
/// Falls back to the district scope even if it is below `min_sample`.
#[must_use]
pub fn select_sample(
    records: &[TransactionRecord],
    target: &ScopeTarget,
    policy: &ScopePolicy,
) -> (Vec<TransactionRecord>, SampleScope) {
    let sized: Vec<&TransactionRecord> = records
        .iter()
        .filter(|r| area_matches(r.exclusive_area_sqm(), target.exclusive_area_sqm, policy.area_tolerance))
        .collect();

    let dong_match = |record: &TransactionRecord| {
        target
            .dong
            .as_deref()
            .map_or(true, |dong| name_matches(record.dong(), dong))
    };

    if let Some(apartment) = target.apartment_name.as_deref() {
        let sample: Vec<TransactionRecord> = sized
            .iter()
            .filter(|r| dong_match(r) && name_matches(r.apartment_name(), apartment))
            .map(|r| (*r).clone())
            .collect();
        if sample.len() >= policy.min_sample {
            return (sample, SampleScope::Apartment);
        }
    }

    if target.dong.is_some() {
        let sample: Vec<TransactionRecord> = sized
            .iter()
            .filter(|r| dong_match(r))
            .map(|r| (*r).clone())
            .collect();
        if sample.len() >= policy.min_sample {
            return (sample, SampleScope::Dong);
        }
    }

    (
        sized.into_iter().cloned().collect(),
        SampleScope::District,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record(dong: &str, apartment: &str, area: Decimal) -> TransactionRecord {
        let date = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        TransactionRecord::try_new(dec!(30_000_000), dec!(900_000), area, date)
            .unwrap()
            .with_location(dong, apartment)
    }

    fn policy(min_sample: usize) -> ScopePolicy {
        ScopePolicy {
            area_tolerance: dec!(0.15),
            min_sample,
        }
    }

    fn target() -> ScopeTarget {
        ScopeTarget {
            dong: Some("공덕동".into()),
            apartment_name: Some("공덕 래미안".into()),
            exclusive_area_sqm: Some(dec!(84)),
        }
    }

    #[test]
    fn uses_apartment_scope_when_large_enough() {
        let records = vec![
            record("공덕동", "공덕래미안5차", dec!(84.9)),
            record("공덕동", "공덕래미안", dec!(84.5)),
            record("공덕동", "마포자이", dec!(84.5)),
        ];
        let (sample, scope) = select_sample(&records, &target(), &policy(2));
        assert_eq!(scope, SampleScope::Apartment);
        assert_eq!(sample.len(), 2);
    }

    #[test]
    fn widens_to_dong_then_district() {
        let records = vec![
            record("공덕동", "공덕래미안", dec!(84)),
            record("공덕동", "마포자이", dec!(84)),
            record("아현동", "마포래미안푸르지오", dec!(84)),
        ];

        let (sample, scope) = select_sample(&records, &target(), &policy(2));
        assert_eq!(scope, SampleScope::Dong);
        assert_eq!(sample.len(), 2);

        let (sample, scope) = select_sample(&records, &target(), &policy(3));
        assert_eq!(scope, SampleScope::District);
        assert_eq!(sample.len(), 3);
    }

    #[test]
    fn area_filter_applies_at_every_scope() {
        let records = vec![
            record("공덕동", "공덕래미안", dec!(84)),
            record("공덕동", "공덕래미안", dec!(114)),
            record("아현동", "마포자이", dec!(40)),
        ];
        let (sample, scope) = select_sample(&records, &target(), &policy(5));
        assert_eq!(scope, SampleScope::District);
        assert_eq!(sample.len(), 1);
    }

    #[test]
    fn no_target_keeps_everything() {
        let records = vec![record("공덕동", "a", dec!(30)), record("도화동", "b", dec!(150))];
        let (sample, scope) = select_sample(&records, &ScopeTarget::default(), &policy(1));
        assert_eq!(scope, SampleScope::District);
        assert_eq!(sample.len(), 2);
    }
}
