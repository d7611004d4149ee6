//! Real root counting and isolation via Sturm sequences.

use num_bigint::{BigInt, Sign};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use gk_core::errors::{ErrorInfo, GkError};

use crate::ball::Ball;
use crate::dyadic::pow2;
use crate::poly::RationalPoly;

/// Integer-coefficient copy of a polynomial used for exact sign evaluation.
#[derive(Debug, Clone)]
struct IntPoly {
    coeffs: Vec<BigInt>,
}

impl IntPoly {
    fn from_rational(poly: &RationalPoly) -> Self {
        Self {
            coeffs: poly.integer_coeffs(),
        }
    }

    /// Sign of the polynomial at `x = n/d` (evaluates `d^deg * p(x)` with `d > 0`).
    fn sign_at(&self, x: &BigRational) -> Sign {
        let Some((lead, rest)) = self.coeffs.split_last() else {
            return Sign::NoSign;
        };
        let (n, d) = (x.numer(), x.denom());
        let mut acc = lead.clone();
        let mut d_pow = BigInt::one();
        for c in rest.iter().rev() {
            d_pow *= d;
            acc = acc * n + c * &d_pow;
        }
        acc.sign()
    }

    fn sign_at_infinity(&self, positive: bool) -> Sign {
        match self.coeffs.last() {
            None => Sign::NoSign,
            Some(lead) => {
                let odd = self.coeffs.len() % 2 == 0;
                if positive || !odd {
                    lead.sign()
                } else {
                    -lead.sign()
                }
            }
        }
    }
}

fn count_changes(signs: impl Iterator<Item = Sign>) -> usize {
    let mut previous = Sign::NoSign;
    let mut changes = 0;
    for sign in signs.filter(|s| *s != Sign::NoSign) {
        if previous != Sign::NoSign && sign != previous {
            changes += 1;
        }
        previous = sign;
    }
    changes
}

/// Sturm sequence of a polynomial, counting its distinct real roots.
#[derive(Debug, Clone)]
pub struct SturmSequence {
    chain: Vec<IntPoly>,
}

impl SturmSequence {
    /// Builds `p, p', -rem(p, p'), ...` until the remainder vanishes.
    pub fn new(poly: &RationalPoly) -> Self {
        let mut chain = Vec::new();
        if poly.is_zero() {
            return Self { chain };
        }
        let mut previous = poly.clone();
        let mut current = poly.derivative();
        chain.push(IntPoly::from_rational(&previous));
        while !current.is_zero() {
            chain.push(IntPoly::from_rational(&current));
            let remainder = match previous.div_rem(&current) {
                Some((_, r)) => -&r,
                None => break,
            };
            previous = current;
            current = remainder;
        }
        Self { chain }
    }

    fn changes_at(&self, x: Option<&BigRational>, positive: bool) -> usize {
        match x {
            Some(x) => count_changes(self.chain.iter().map(|p| p.sign_at(x))),
            None => count_changes(self.chain.iter().map(|p| p.sign_at_infinity(positive))),
        }
    }

    /// Number of distinct real roots in `(lo, hi]`; `None` bounds are infinite.
    pub fn count_between(&self, lo: Option<&BigRational>, hi: Option<&BigRational>) -> usize {
        let left = self.changes_at(lo, false);
        let right = self.changes_at(hi, true);
        left.saturating_sub(right)
    }

    /// Number of distinct real roots.
    pub fn count_real(&self) -> usize {
        self.count_between(None, None)
    }
}

/// A power of two strictly larger than the modulus of every root (Cauchy bound).
pub fn root_bound(poly: &RationalPoly) -> BigRational {
    let Some(lead) = poly.leading() else {
        return BigRational::one();
    };
    let lead = lead.abs();
    let largest = poly
        .coeffs()
        .iter()
        .take(poly.coeffs().len().saturating_sub(1))
        .map(|c| c.abs() / &lead)
        .max()
        .unwrap_or_else(BigRational::zero);
    let bound = largest + BigRational::one();
    let mut exp = 0;
    while pow2(exp) <= bound {
        exp += 1;
    }
    pow2(exp)
}

fn refine(poly: &IntPoly, mut lo: BigRational, mut hi: BigRational, width: &BigRational) -> Ball {
    // Exactly one simple root lies in (lo, hi]; the sign at hi is the sign right of it.
    let hi_sign = poly.sign_at(&hi);
    if hi_sign == Sign::NoSign {
        return Ball::exact(hi);
    }
    let two = BigRational::from_integer(BigInt::from(2));
    while &hi - &lo > *width {
        let mid = (&lo + &hi) / &two;
        let sign = poly.sign_at(&mid);
        if sign == Sign::NoSign {
            return Ball::exact(mid);
        }
        if sign == hi_sign {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    let mid = (&lo + &hi) / &two;
    let rad = (&hi - &lo) / two;
    Ball::with_radius(mid, rad)
}

/// Isolates every distinct real root of `poly`, in increasing order.
///
/// Each returned ball has radius below `2^-(prec + 1)`; roots hit exactly by
/// bisection are returned as exact balls.
pub fn real_roots(poly: &RationalPoly, prec: u32) -> Result<Vec<Ball>, GkError> {
    if poly.is_zero() {
        return Err(GkError::Extension(ErrorInfo::new(
            "zero-polynomial",
            "cannot isolate the roots of the zero polynomial",
        )));
    }
    let squarefree = poly.squarefree();
    if squarefree.degree() == Some(0) {
        return Ok(Vec::new());
    }
    let sturm = SturmSequence::new(&squarefree);
    let signs = IntPoly::from_rational(&squarefree);
    let bound = root_bound(&squarefree);
    let width = pow2(-(prec as i64) - 2);
    let two = BigRational::from_integer(BigInt::from(2));

    let mut roots = Vec::new();
    let mut stack = vec![(-bound.clone(), bound)];
    while let Some((lo, hi)) = stack.pop() {
        match sturm.count_between(Some(&lo), Some(&hi)) {
            0 => {}
            1 => roots.push(refine(&signs, lo, hi, &width)),
            _ => {
                let mid = (&lo + &hi) / &two;
                stack.push((mid.clone(), hi));
                stack.push((lo, mid));
            }
        }
    }
    roots.sort_by(|a, b| a.cmp_mid(b));
    Ok(roots)
}

/// True when `value` is an exact root of `poly`.
pub fn is_root(poly: &RationalPoly, value: &BigRational) -> bool {
    !poly.is_zero() && poly.eval(value).is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn counts_roots_of_cubic() {
        // (x - 1)(x - 2)(x + 3)
        let p = RationalPoly::from_integers(&[6, -7, 0, 1]);
        let sturm = SturmSequence::new(&p);
        assert_eq!(sturm.count_real(), 3);
        assert_eq!(sturm.count_between(Some(&q(0, 1)), None), 2);
        assert_eq!(sturm.count_between(Some(&q(1, 1)), Some(&q(2, 1))), 1);
        assert_eq!(sturm.count_between(None, Some(&q(-3, 1))), 1);
    }

    #[test]
    fn complex_roots_are_not_counted() {
        let p = RationalPoly::from_integers(&[1, 0, 1]);
        assert_eq!(SturmSequence::new(&p).count_real(), 0);
        assert!(real_roots(&p, 64).unwrap().is_empty());
    }

    #[test]
    fn isolates_irrational_roots() {
        let p = RationalPoly::from_integers(&[-3, 0, 1]);
        let roots = real_roots(&p, 100).expect("roots");
        assert_eq!(roots.len(), 2);
        assert!(roots[0].to_f64() < 0.0);
        assert!((roots[1].to_f64() - 3f64.sqrt()).abs() < 1e-15);
        assert!(roots.iter().all(|r| r.radius_below(100)));
    }

    #[test]
    fn exact_roots_are_returned_exactly() {
        // x (x - 1/2)(x + 1/2)
        let p = RationalPoly::from_coeffs(vec![q(0, 1), q(-1, 4), q(0, 1), q(1, 1)]);
        let roots = real_roots(&p, 64).expect("roots");
        assert_eq!(roots.len(), 3);
        assert!(roots.iter().all(Ball::is_exact));
        assert_eq!(roots[1], Ball::zero());
        assert!(is_root(&p, roots[2].mid()));
    }

    #[test]
    fn repeated_roots_are_reported_once() {
        let p = RationalPoly::from_integers(&[1, -2, 1]);
        let roots = real_roots(&p, 64).expect("roots");
        assert_eq!(roots.len(), 1);
        assert!(roots[0].contains(&q(1, 1)));
    }

    #[test]
    fn zero_polynomial_is_rejected() {
        let err = real_roots(&RationalPoly::zero(), 64).unwrap_err();
        assert_eq!(err.code(), "zero-polynomial");
    }
}
