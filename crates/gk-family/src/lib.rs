#![deny(missing_docs)]
#![doc = "Classical weight families supplying orthogonal polynomials, exact moments and normalisation constants."]

use std::fmt;
use std::str::FromStr;

use gk_arb::{Ball, BigInt, BigRational, RationalPoly};
use gk_core::errors::{ErrorInfo, GkError};
use serde::{Deserialize, Serialize};

mod recurrence;

pub use recurrence::Recurrence;

/// Open interval carrying the weight; `None` ends are infinite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Support {
    /// Lower end, excluded.
    pub lower: Option<BigRational>,
    /// Upper end, excluded.
    pub upper: Option<BigRational>,
}

impl Support {
    fn real_line() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    fn between(lower: i64, upper: i64) -> Self {
        Self {
            lower: Some(BigRational::from_integer(BigInt::from(lower))),
            upper: Some(BigRational::from_integer(BigInt::from(upper))),
        }
    }

    fn above(lower: i64) -> Self {
        Self {
            lower: Some(BigRational::from_integer(BigInt::from(lower))),
            upper: None,
        }
    }

    /// True when `value` lies strictly inside the support.
    pub fn contains(&self, value: &BigRational) -> bool {
        self.lower.as_ref().map_or(true, |lo| value > lo)
            && self.upper.as_ref().map_or(true, |hi| value < hi)
    }
}

/// Capability set of a weight function, chosen once per run.
///
/// Moments are those of the *normalised* weight (total mass one); the true
/// mass is returned separately by [`WeightFamily::transcendental_factor`].
pub trait WeightFamily: Send + Sync {
    /// Stable kebab-case identifier.
    fn name(&self) -> &'static str;

    /// Degree-`n` orthogonal polynomial with exact rational coefficients.
    fn polynomial(&self, n: usize) -> RationalPoly;

    /// Exact `n`-th moment of the normalised weight.
    fn integrate(&self, n: usize) -> BigRational;

    /// Moments of orders `0..=n`.
    fn moments(&self, n: usize) -> Vec<BigRational> {
        (0..=n).map(|k| self.integrate(k)).collect()
    }

    /// Rigorous enclosure of the total mass of the unnormalised weight.
    fn transcendental_factor(&self, prec: u32) -> Ball;

    /// Open interval on which the weight lives.
    fn support(&self) -> Support;

    /// True for weights that are even functions.
    fn is_symmetric(&self) -> bool;
}

/// Applies the moment functional to a polynomial: `sum_i c_i m_i`.
///
/// `moments` must cover the polynomial's degree.
pub fn apply_moments(poly: &RationalPoly, moments: &[BigRational]) -> Option<BigRational> {
    if poly.coeffs().len() > moments.len() {
        return None;
    }
    Some(
        poly.coeffs()
            .iter()
            .zip(moments)
            .fold(BigRational::from_integer(BigInt::from(0)), |acc, (c, m)| {
                acc + c * m
            }),
    )
}

/// Classical weight functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// `exp(-x^2 / 2)` on the real line (probabilists' Hermite).
    HermitePro,
    /// `exp(-x^2)` on the real line (physicists' Hermite).
    HermitePhys,
    /// Constant weight on `(-1, 1)`.
    Legendre,
    /// `exp(-x)` on `(0, inf)`.
    Laguerre,
    /// `(1 - x^2)^(-1/2)` on `(-1, 1)`.
    ChebyshevT,
    /// `(1 - x^2)^(1/2)` on `(-1, 1)`.
    ChebyshevU,
}

impl Family {
    /// Every supported family.
    pub const ALL: [Family; 6] = [
        Family::HermitePro,
        Family::HermitePhys,
        Family::Legendre,
        Family::Laguerre,
        Family::ChebyshevT,
        Family::ChebyshevU,
    ];

    fn recurrence(&self) -> Recurrence {
        match self {
            Family::HermitePro => Recurrence::hermite_pro(),
            Family::HermitePhys => Recurrence::hermite_phys(),
            Family::Legendre => Recurrence::legendre(),
            Family::Laguerre => Recurrence::laguerre(),
            Family::ChebyshevT => Recurrence::chebyshev_t(),
            Family::ChebyshevU => Recurrence::chebyshev_u(),
        }
    }
}

#[allow(clippy::derivable_impls)]
impl Default for Family {
    fn default() -> Self {
        Family::HermitePro
    }
}

fn int(value: u64) -> BigRational {
    BigRational::from_integer(BigInt::from(value))
}

fn double_factorial_odd(k: u64) -> BigInt {
    // (2k - 1)!! with (-1)!! = 1
    (1..=k).fold(BigInt::from(1), |acc, i| acc * BigInt::from(2 * i - 1))
}

fn central_binomial_over_four_pow(k: u64) -> BigRational {
    // C(2k, k) / 4^k = (2k - 1)!! / (2k)!!
    let even = (1..=k).fold(BigInt::from(1), |acc, i| acc * BigInt::from(2 * i));
    BigRational::new(double_factorial_odd(k), even)
}

impl WeightFamily for Family {
    fn name(&self) -> &'static str {
        match self {
            Family::HermitePro => "hermite-pro",
            Family::HermitePhys => "hermite-phys",
            Family::Legendre => "legendre",
            Family::Laguerre => "laguerre",
            Family::ChebyshevT => "chebyshev-t",
            Family::ChebyshevU => "chebyshev-u",
        }
    }

    fn polynomial(&self, n: usize) -> RationalPoly {
        self.recurrence().polynomial(n)
    }

    fn integrate(&self, n: usize) -> BigRational {
        let n = n as u64;
        if *self != Family::Laguerre && n % 2 == 1 {
            return int(0);
        }
        let k = n / 2;
        match self {
            Family::HermitePro => BigRational::from_integer(double_factorial_odd(k)),
            Family::HermitePhys => BigRational::new(
                double_factorial_odd(k),
                BigInt::from(1) << (k as usize),
            ),
            Family::Legendre => BigRational::new(BigInt::from(1), BigInt::from(n + 1)),
            Family::Laguerre => {
                BigRational::from_integer((1..=n).fold(BigInt::from(1), |acc, i| acc * i))
            }
            Family::ChebyshevT => central_binomial_over_four_pow(k),
            Family::ChebyshevU => central_binomial_over_four_pow(k) / int(k + 1),
        }
    }

    fn moments(&self, n: usize) -> Vec<BigRational> {
        // Incremental ratios avoid recomputing factorials for every order.
        let mut moments = Vec::with_capacity(n + 1);
        let mut even = int(1);
        for order in 0..=n as u64 {
            if *self == Family::Laguerre {
                let value = match moments.last() {
                    Some(last) => last * int(order),
                    None => int(1),
                };
                moments.push(value);
                continue;
            }
            if order % 2 == 1 {
                moments.push(int(0));
                continue;
            }
            let k = order / 2;
            if k > 0 {
                let ratio = match self {
                    Family::HermitePro => int(2 * k - 1),
                    Family::HermitePhys => BigRational::new(BigInt::from(2 * k - 1), BigInt::from(2)),
                    Family::Legendre => {
                        BigRational::new(BigInt::from(2 * k - 1), BigInt::from(2 * k + 1))
                    }
                    Family::ChebyshevT => {
                        BigRational::new(BigInt::from(2 * k - 1), BigInt::from(2 * k))
                    }
                    Family::ChebyshevU => {
                        BigRational::new(BigInt::from(2 * k - 1), BigInt::from(2 * k + 2))
                    }
                    Family::Laguerre => int(1),
                };
                even = even * ratio;
            }
            moments.push(even.clone());
        }
        moments
    }

    fn transcendental_factor(&self, prec: u32) -> Ball {
        let wp = prec + 8;
        let exact = |value: u64| Ball::exact(int(value));
        // Every pi enclosure lies above zero, so the clamp in sqrt_nonnegative never applies.
        match self {
            Family::HermitePro => Ball::pi(wp).mul_rational(&int(2), wp).sqrt_nonnegative(prec),
            Family::HermitePhys => Ball::pi(wp).sqrt_nonnegative(prec),
            Family::Legendre => exact(2),
            Family::Laguerre => exact(1),
            Family::ChebyshevT => Ball::pi(prec),
            Family::ChebyshevU => {
                Ball::pi(wp).mul_rational(&BigRational::new(BigInt::from(1), BigInt::from(2)), prec)
            }
        }
    }

    fn support(&self) -> Support {
        match self {
            Family::HermitePro | Family::HermitePhys => Support::real_line(),
            Family::Laguerre => Support::above(0),
            Family::Legendre | Family::ChebyshevT | Family::ChebyshevU => Support::between(-1, 1),
        }
    }

    fn is_symmetric(&self) -> bool {
        *self != Family::Laguerre
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = GkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Family::ALL
            .into_iter()
            .find(|family| family.name() == value)
            .ok_or_else(|| {
                GkError::Config(
                    ErrorInfo::new("unknown-family", "unsupported weight family")
                        .with_context("family", value)
                        .with_hint("use one of hermite-pro, hermite-phys, legendre, laguerre, chebyshev-t, chebyshev-u"),
                )
            })
    }
}
