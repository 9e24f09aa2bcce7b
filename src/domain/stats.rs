//! Order statistics over decimal samples.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Quantile of an ascending sample by linear interpolation between order
/// statistics (`position = q × (n − 1)`).
///
/// `q` is clamped to `[0, 1]`. Returns `None` for an empty sample.
#[must_use]
pub fn quantile(sorted: &[Decimal], q: Decimal) -> Option<Decimal> {
    let first = *sorted.first()?;
    let last = *sorted.last()?;
    if q <= Decimal::ZERO {
        return Some(first);
    }
    if q >= Decimal::ONE {
        return Some(last);
    }

    let position = q * Decimal::from(sorted.len() - 1);
    let lower = position.floor();
    let index = lower.to_usize()?;
    let fraction = position - lower;

    let low = sorted[index];
    let high = sorted.get(index + 1).copied().unwrap_or(low);
    Some(low + (high - low) * fraction)
}

/// Weighted quantile of `(value, weight)` pairs sorted ascending by value.
///
/// Returns the smallest value whose cumulative weight reaches `q` of the
/// total. Falls back to the unweighted [`quantile`] when the weights do not
/// sum to a positive total.
#[must_use]
pub fn weighted_quantile(sorted: &[(Decimal, Decimal)], q: Decimal) -> Option<Decimal> {
    let total: Decimal = sorted.iter().map(|(_, weight)| *weight).sum();
    if total <= Decimal::ZERO {
        let values: Vec<Decimal> = sorted.iter().map(|(value, _)| *value).collect();
        return quantile(&values, q);
    }

    let threshold = q.clamp(Decimal::ZERO, Decimal::ONE) * total;
    let mut cumulative = Decimal::ZERO;
    for (value, weight) in sorted {
        cumulative += *weight;
        if cumulative >= threshold {
            return Some(*value);
        }
    }
    sorted.last().map(|(value, _)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn quantile_interpolates() {
        let sample = [dec!(1), dec!(2), dec!(3), dec!(4)];
        assert_eq!(quantile(&sample, dec!(0.5)), Some(dec!(2.5)));
        assert_eq!(quantile(&sample, dec!(0.25)), Some(dec!(1.75)));
        assert_eq!(quantile(&sample, dec!(0)), Some(dec!(1)));
        assert_eq!(quantile(&sample, dec!(1)), Some(dec!(4)));
    }

    #[test]
    fn quantile_of_single_value() {
        assert_eq!(quantile(&[dec!(7)], dec!(0.75)), Some(dec!(7)));
    }

    #[test]
    fn quantile_of_empty_sample_is_none() {
        assert_eq!(quantile(&[], dec!(0.5)), None);
        assert_eq!(weighted_quantile(&[], dec!(0.5)), None);
    }

    #[test]
    fn weighted_quantile_follows_weight_mass() {
        let sample = [(dec!(10), dec!(1)), (dec!(20), dec!(1)), (dec!(30), dec!(8))];
        assert_eq!(weighted_quantile(&sample, dec!(0.5)), Some(dec!(30)));
        assert_eq!(weighted_quantile(&sample, dec!(0.1)), Some(dec!(10)));
        assert_eq!(weighted_quantile(&sample, dec!(0.2)), Some(dec!(20)));
    }

    #[test]
    fn weighted_quantile_is_monotone_in_q() {
        let sample = [
            (dec!(3), dec!(0.4)),
            (dec!(5), dec!(1)),
            (dec!(8), dec!(0.2)),
            (dec!(13), dec!(0.9)),
        ];
        let q25 = weighted_quantile(&sample, dec!(0.25)).unwrap();
        let q50 = weighted_quantile(&sample, dec!(0.5)).unwrap();
        let q75 = weighted_quantile(&sample, dec!(0.75)).unwrap();
        assert!(q25 <= q50 && q50 <= q75);
    }

    #[test]
    fn zero_weights_fall_back_to_unweighted() {
        let sample = [(dec!(1), dec!(0)), (dec!(3), dec!(0))];
        assert_eq!(weighted_quantile(&sample, dec!(0.5)), Some(dec!(2)));
    }
}
