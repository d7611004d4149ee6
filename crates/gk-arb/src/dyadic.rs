//! Rounding helpers that keep midpoints and radii short dyadic rationals.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Number of significant bits kept when rounding a radius upwards.
pub const RADIUS_BITS: u32 = 30;

/// Returns `2^exp` as an exact rational.
pub fn pow2(exp: i64) -> BigRational {
    if exp >= 0 {
        BigRational::from_integer(BigInt::one() << (exp as usize))
    } else {
        BigRational::new(BigInt::one(), BigInt::one() << ((-exp) as usize))
    }
}

/// Multiplies `value` by `2^exp` exactly.
pub fn mul_pow2(value: &BigRational, exp: i64) -> BigRational {
    if exp >= 0 {
        BigRational::new(value.numer().clone() << (exp as usize), value.denom().clone())
    } else {
        BigRational::new(value.numer().clone(), value.denom().clone() << ((-exp) as usize))
    }
}

/// Estimate of `log2 |value|`, accurate to within one.
pub fn magnitude(value: &BigRational) -> i64 {
    value.numer().bits() as i64 - value.denom().bits() as i64
}

fn scale_for(value: &BigRational, bits: u32) -> i64 {
    bits as i64 - magnitude(value) + 1
}

/// Rounds `value` to a dyadic with at least `prec` significant bits.
///
/// Returns the rounded value and the exact absolute rounding error.
pub fn round_nearest(value: &BigRational, prec: u32) -> (BigRational, BigRational) {
    if value.is_zero() {
        return (BigRational::zero(), BigRational::zero());
    }
    if value.denom().is_one() && value.numer().bits() <= prec as u64 {
        return (value.clone(), BigRational::zero());
    }
    let shift = scale_for(value, prec);
    let rounded = mul_pow2(&mul_pow2(value, shift).round(), -shift);
    let err = (value - &rounded).abs();
    (rounded, err)
}

/// Rounds a nonnegative `value` upwards to a dyadic with `bits` significant bits.
pub fn round_up(value: &BigRational, bits: u32) -> BigRational {
    if value.is_zero() {
        return BigRational::zero();
    }
    let shift = scale_for(value, bits);
    mul_pow2(&mul_pow2(value, shift).ceil(), -shift)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn nearest_rounding_reports_exact_error() {
        let (rounded, err) = round_nearest(&q(1, 3), 16);
        assert!(err > BigRational::zero());
        assert_eq!((q(1, 3) - &rounded).abs(), err);
        assert!(err <= pow2(-16));
    }

    #[test]
    fn short_values_are_untouched() {
        let (rounded, err) = round_nearest(&q(3, 4), 8);
        assert_eq!(rounded, q(3, 4));
        assert!(err.is_zero());
    }

    #[test]
    fn upward_rounding_never_decreases() {
        let value = q(1_000_003, 7);
        let up = round_up(&value, 8);
        assert!(up >= value);
        assert!(up < value * q(101, 100));
    }
}
