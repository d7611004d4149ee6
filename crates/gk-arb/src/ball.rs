//! Interval numbers in midpoint-radius form.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dyadic::{magnitude, pow2, round_nearest, round_up, RADIUS_BITS};

/// A real number enclosed in `[mid - rad, mid + rad]`.
///
/// Every operation takes the working precision in bits. The midpoint of the
/// result is rounded to that precision and the rounding error is folded into
/// the radius, so the true value always stays inside the ball.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ball {
    mid: BigRational,
    rad: BigRational,
}

impl Ball {
    /// An exact ball with zero radius.
    pub fn exact(value: BigRational) -> Self {
        Self {
            mid: value,
            rad: BigRational::zero(),
        }
    }

    /// The exact zero ball.
    pub fn zero() -> Self {
        Self::exact(BigRational::zero())
    }

    /// The exact one ball.
    pub fn one() -> Self {
        Self::exact(BigRational::one())
    }

    /// An exact integer ball.
    pub fn from_integer(value: i64) -> Self {
        Self::exact(BigRational::from_integer(BigInt::from(value)))
    }

    /// Encloses `value` with a midpoint rounded to `prec` bits.
    pub fn from_rational(value: &BigRational, prec: u32) -> Self {
        Self::finish(value.clone(), BigRational::zero(), prec)
    }

    /// Builds a ball from an explicit midpoint and radius.
    pub fn with_radius(mid: BigRational, rad: BigRational) -> Self {
        Self {
            mid,
            rad: round_up(&rad.abs(), RADIUS_BITS),
        }
    }

    /// Smallest ball (at precision `prec`) containing `[lo, hi]`.
    pub fn from_bounds(lo: &BigRational, hi: &BigRational, prec: u32) -> Self {
        let two = BigRational::from_integer(BigInt::from(2));
        let mid = (lo + hi) / &two;
        let rad = (hi - lo).abs() / two;
        Self::finish(mid, rad, prec)
    }

    fn finish(exact_mid: BigRational, rad: BigRational, prec: u32) -> Self {
        let (mid, err) = round_nearest(&exact_mid, prec);
        Self {
            mid,
            rad: round_up(&(rad + err), RADIUS_BITS),
        }
    }

    /// Midpoint of the ball.
    pub fn mid(&self) -> &BigRational {
        &self.mid
    }

    /// Radius of the ball.
    pub fn rad(&self) -> &BigRational {
        &self.rad
    }

    /// Lower end of the enclosure.
    pub fn lower(&self) -> BigRational {
        &self.mid - &self.rad
    }

    /// Upper end of the enclosure.
    pub fn upper(&self) -> BigRational {
        &self.mid + &self.rad
    }

    /// True when the ball has zero radius.
    pub fn is_exact(&self) -> bool {
        self.rad.is_zero()
    }

    /// True for the exact zero ball.
    pub fn is_zero(&self) -> bool {
        self.mid.is_zero() && self.rad.is_zero()
    }

    /// True when zero lies inside the enclosure.
    pub fn contains_zero(&self) -> bool {
        self.mid.abs() <= self.rad
    }

    /// True when `value` lies inside the enclosure.
    pub fn contains(&self, value: &BigRational) -> bool {
        (&self.mid - value).abs() <= self.rad
    }

    /// True when the two enclosures intersect.
    pub fn overlaps(&self, other: &Ball) -> bool {
        (&self.mid - &other.mid).abs() <= &self.rad + &other.rad
    }

    /// True when the midpoint is nonnegative.
    pub fn has_nonnegative_mid(&self) -> bool {
        !self.mid.is_negative()
    }

    /// Orders two balls by their midpoints.
    pub fn cmp_mid(&self, other: &Ball) -> Ordering {
        self.mid.cmp(&other.mid)
    }

    /// Sum of two balls.
    pub fn add(&self, other: &Ball, prec: u32) -> Ball {
        Self::finish(&self.mid + &other.mid, &self.rad + &other.rad, prec)
    }

    /// Difference of two balls.
    pub fn sub(&self, other: &Ball, prec: u32) -> Ball {
        Self::finish(&self.mid - &other.mid, &self.rad + &other.rad, prec)
    }

    /// Exact negation.
    pub fn neg(&self) -> Ball {
        Ball {
            mid: -&self.mid,
            rad: self.rad.clone(),
        }
    }

    /// Product of two balls.
    pub fn mul(&self, other: &Ball, prec: u32) -> Ball {
        let rad = self.mid.abs() * &other.rad + other.mid.abs() * &self.rad + &self.rad * &other.rad;
        Self::finish(&self.mid * &other.mid, rad, prec)
    }

    /// Product with an exact rational.
    pub fn mul_rational(&self, factor: &BigRational, prec: u32) -> Ball {
        Self::finish(&self.mid * factor, &self.rad * factor.abs(), prec)
    }

    /// Quotient of two balls, or `None` when the divisor contains zero.
    pub fn checked_div(&self, other: &Ball, prec: u32) -> Option<Ball> {
        if other.contains_zero() {
            return None;
        }
        let m2 = other.mid.abs();
        let quotient = &self.mid / &other.mid;
        let rad = (&self.rad * &m2 + self.mid.abs() * &other.rad) / (&m2 * (&m2 - &other.rad));
        Some(Self::finish(quotient, rad, prec))
    }

    /// Quotient by an exact rational, or `None` for a zero divisor.
    pub fn div_rational(&self, divisor: &BigRational, prec: u32) -> Option<Ball> {
        if divisor.is_zero() {
            return None;
        }
        Some(Self::finish(
            &self.mid / divisor,
            &self.rad / divisor.abs(),
            prec,
        ))
    }

    /// Integer power by repeated squaring.
    pub fn pow_u32(&self, exp: u32, prec: u32) -> Ball {
        let mut result = Ball::one();
        let mut base = self.clone();
        let mut exp = exp;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base, prec);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base, prec);
            }
        }
        result
    }

    /// Square root, or `None` when the ball reaches below zero.
    pub fn sqrt(&self, prec: u32) -> Option<Ball> {
        let lo = self.lower();
        if lo.is_negative() {
            return None;
        }
        let shift = prec as usize + 4;
        let lower = sqrt_bound(&lo, shift, false);
        let upper = sqrt_bound(&self.upper(), shift, true);
        Some(Ball::from_bounds(&lower, &upper, prec))
    }

    /// Square root of the part of the ball at or above zero.
    ///
    /// Encloses `sqrt(v)` for every nonnegative `v` in the ball, so it is
    /// rigorous whenever the enclosed quantity is known to be nonnegative.
    pub fn sqrt_nonnegative(&self, prec: u32) -> Ball {
        let shift = prec as usize + 4;
        let lo = self.lower();
        let lower = if lo.is_positive() {
            sqrt_bound(&lo, shift, false)
        } else {
            BigRational::zero()
        };
        let hi = self.upper();
        let upper = if hi.is_positive() {
            sqrt_bound(&hi, shift, true)
        } else {
            BigRational::zero()
        };
        Ball::from_bounds(&lower, &upper, prec)
    }

    /// Rigorous enclosure of pi via Machin's formula.
    pub fn pi(prec: u32) -> Ball {
        let wp = prec + 16;
        let a = arctan_recip(5, wp).mul_rational(&BigRational::from_integer(16.into()), wp);
        let b = arctan_recip(239, wp).mul_rational(&BigRational::from_integer(4.into()), wp);
        a.sub(&b, prec)
    }

    /// True iff the radius is strictly below `2^-prec`.
    pub fn radius_below(&self, prec: u32) -> bool {
        self.rad < pow2(-(prec as i64))
    }

    /// Nearest `f64` to the midpoint.
    pub fn to_f64(&self) -> f64 {
        self.mid.to_f64().unwrap_or(f64::NAN)
    }

    /// Approximate `log2` of the radius, `-inf` for exact balls.
    pub fn radius_log2(&self) -> f64 {
        if self.rad.is_zero() {
            return f64::NEG_INFINITY;
        }
        magnitude(&self.rad) as f64
    }
}

fn sqrt_bound(value: &BigRational, shift: usize, upward: bool) -> BigRational {
    // sqrt(n/d) = sqrt(n*d)/d, scaled by 2^shift before taking the integer root.
    let scaled = (value.numer() * value.denom()) << (2 * shift);
    let mut root = scaled.sqrt();
    if upward && &root * &root != scaled {
        root += BigInt::one();
    }
    BigRational::new(root, value.denom().clone() << shift)
}

fn arctan_recip(x: u64, prec: u32) -> Ball {
    // Alternating series with decreasing terms: the first omitted term bounds the tail.
    let base = BigInt::from(x);
    let base_sq = &base * &base;
    let tolerance = pow2(-(prec as i64) - 2);
    let mut power = base;
    let mut sum = Ball::zero();
    let mut k: u64 = 0;
    loop {
        let term = BigRational::new(BigInt::one(), &power * BigInt::from(2 * k + 1));
        if term < tolerance {
            return sum.add(&Ball::with_radius(BigRational::zero(), term), prec);
        }
        let term = Ball::from_rational(&term, prec);
        sum = if k % 2 == 0 {
            sum.add(&term, prec)
        } else {
            sum.sub(&term, prec)
        };
        power = &power * &base_sq;
        k += 1;
    }
}

impl fmt::Display for Ball {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rad = self.rad.to_f64().unwrap_or(f64::INFINITY);
        write!(f, "[{} +/- {:.3e}]", self.to_f64(), rad)
    }
}

#[derive(Serialize, Deserialize)]
struct BallRepr {
    mid: String,
    rad: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    approx: Option<f64>,
}

impl Serialize for Ball {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let approx = self.to_f64();
        BallRepr {
            mid: self.mid.to_string(),
            rad: self.rad.to_string(),
            approx: approx.is_finite().then_some(approx),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ball {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = BallRepr::deserialize(deserializer)?;
        let mid = repr.mid.parse::<BigRational>().map_err(D::Error::custom)?;
        let rad = repr.rad.parse::<BigRational>().map_err(D::Error::custom)?;
        if rad.is_negative() {
            return Err(D::Error::custom("ball radius must be nonnegative"));
        }
        Ok(Ball { mid, rad })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn arithmetic_encloses_exact_results() {
        let third = Ball::from_rational(&q(1, 3), 64);
        assert!(third.contains(&q(1, 3)));
        let sum = third.add(&third, 64).add(&third, 64);
        assert!(sum.contains(&q(1, 1)));
        let product = third.mul(&Ball::from_integer(3), 64);
        assert!(product.contains(&q(1, 1)));
        let quotient = Ball::one().checked_div(&third, 64).expect("nonzero");
        assert!(quotient.contains(&q(3, 1)));
    }

    #[test]
    fn division_by_ball_containing_zero_is_refused() {
        let straddle = Ball::with_radius(q(1, 1000), q(1, 100));
        assert!(Ball::one().checked_div(&straddle, 64).is_none());
        assert!(Ball::one().div_rational(&BigRational::zero(), 64).is_none());
    }

    #[test]
    fn pi_is_enclosed_tightly() {
        let pi = Ball::pi(128);
        assert!(pi.radius_below(120));
        assert!((pi.to_f64() - std::f64::consts::PI).abs() < 1e-15);
        // 355/113 is a famous but inexact approximation.
        assert!(!pi.contains(&q(355, 113)));
    }

    #[test]
    fn sqrt_of_exact_square_contains_root() {
        let root = Ball::from_integer(9).sqrt(80).expect("nonnegative");
        assert!(root.contains(&q(3, 1)));
        assert!(root.radius_below(76));
        let two = Ball::from_integer(2).sqrt(80).expect("nonnegative");
        assert!((two.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-15);
        assert!(Ball::from_integer(-1).sqrt(80).is_none());
    }

    #[test]
    fn clamped_sqrt_covers_the_nonnegative_part() {
        // [-1/4, 4]
        let straddling = Ball::with_radius(q(15, 8), q(17, 8));
        let root = straddling.sqrt_nonnegative(64);
        assert!(root.contains(&q(0, 1)));
        assert!(root.contains(&q(2, 1)));
        let positive = Ball::from_integer(9).sqrt_nonnegative(80);
        assert!(positive.contains(&q(3, 1)));
        assert!(!positive.contains_zero());
    }

    #[test]
    fn power_matches_repeated_products() {
        let x = Ball::from_rational(&q(7, 5), 96);
        let cube = x.pow_u32(3, 96);
        assert!(cube.contains(&q(343, 125)));
        assert_eq!(x.pow_u32(0, 96), Ball::one());
    }

    #[test]
    fn serde_round_trip_keeps_exact_values() {
        let ball = Ball::with_radius(q(-5, 8), q(1, 1024));
        let json = serde_json::to_string(&ball).expect("serialize");
        assert!(json.contains("\"mid\":\"-5/8\""));
        let decoded: Ball = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, ball);
    }
}
