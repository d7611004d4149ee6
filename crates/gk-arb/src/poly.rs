//! Univariate polynomials with exact rational and ball coefficients.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::ball::Ball;

/// Polynomial with exact rational coefficients, stored lowest degree first.
///
/// The coefficient vector never carries trailing zeros, so the zero polynomial
/// is the empty vector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RationalPoly {
    coeffs: Vec<BigRational>,
}

impl RationalPoly {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial one.
    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    /// A constant polynomial.
    pub fn constant(value: BigRational) -> Self {
        Self::from_coeffs(vec![value])
    }

    /// The polynomial `x`.
    pub fn x() -> Self {
        Self::monomial(BigRational::one(), 1)
    }

    /// The polynomial `coeff * x^degree`.
    pub fn monomial(coeff: BigRational, degree: usize) -> Self {
        let mut coeffs = vec![BigRational::zero(); degree + 1];
        coeffs[degree] = coeff;
        Self::from_coeffs(coeffs)
    }

    /// Builds a polynomial from coefficients ordered lowest degree first.
    pub fn from_coeffs(coeffs: Vec<BigRational>) -> Self {
        let mut poly = Self { coeffs };
        poly.normalize();
        poly
    }

    /// Builds a polynomial from integer coefficients ordered lowest degree first.
    pub fn from_integers(coeffs: &[i64]) -> Self {
        Self::from_coeffs(
            coeffs
                .iter()
                .map(|&c| BigRational::from_integer(BigInt::from(c)))
                .collect(),
        )
    }

    fn normalize(&mut self) {
        while self.coeffs.last().map_or(false, Zero::is_zero) {
            self.coeffs.pop();
        }
    }

    /// True for the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree of the polynomial, `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Coefficient of `x^index` (zero past the degree).
    pub fn coeff(&self, index: usize) -> BigRational {
        self.coeffs
            .get(index)
            .cloned()
            .unwrap_or_else(BigRational::zero)
    }

    /// All coefficients, lowest degree first.
    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    /// Leading coefficient.
    pub fn leading(&self) -> Option<&BigRational> {
        self.coeffs.last()
    }

    /// Multiplies every coefficient by `factor`.
    pub fn scale(&self, factor: &BigRational) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|c| c * factor).collect())
    }

    /// Rescales to a monic polynomial; the zero polynomial is returned unchanged.
    pub fn monic(&self) -> Self {
        match self.leading() {
            Some(lead) => self.scale(&lead.recip()),
            None => Self::zero(),
        }
    }

    /// Multiplies by `x^shift`.
    pub fn shift(&self, shift: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![BigRational::zero(); shift];
        coeffs.extend(self.coeffs.iter().cloned());
        Self { coeffs }
    }

    /// Formal derivative.
    pub fn derivative(&self) -> Self {
        Self::from_coeffs(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c * BigRational::from_integer(BigInt::from(i)))
                .collect(),
        )
    }

    /// Evaluates the polynomial at an exact rational point.
    pub fn eval(&self, x: &BigRational) -> BigRational {
        self.coeffs
            .iter()
            .rev()
            .fold(BigRational::zero(), |acc, c| acc * x + c)
    }

    /// Euclidean division, `None` when dividing by the zero polynomial.
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        let divisor_degree = divisor.degree()?;
        let lead = divisor.leading()?.clone();
        let mut remainder = self.coeffs.clone();
        let quotient_len = self.coeffs.len().saturating_sub(divisor_degree);
        let mut quotient = vec![BigRational::zero(); quotient_len];
        for pos in (0..quotient_len).rev() {
            let top = &remainder[pos + divisor_degree] / &lead;
            if top.is_zero() {
                continue;
            }
            for (offset, d) in divisor.coeffs.iter().enumerate() {
                remainder[pos + offset] -= &top * d;
            }
            quotient[pos] = top;
        }
        remainder.truncate(divisor_degree);
        Some((Self::from_coeffs(quotient), Self::from_coeffs(remainder)))
    }

    /// Monic greatest common divisor (zero only when both inputs are zero).
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let remainder = match a.div_rem(&b) {
                Some((_, r)) => r,
                None => break,
            };
            a = b;
            b = remainder;
        }
        a.monic()
    }

    /// Product of the distinct irreducible factors: `p / gcd(p, p')`, made monic.
    pub fn squarefree(&self) -> Self {
        if self.degree().unwrap_or(0) == 0 {
            return self.monic();
        }
        let common = self.gcd(&self.derivative());
        match self.div_rem(&common) {
            Some((quotient, _)) => quotient.monic(),
            None => self.monic(),
        }
    }

    /// Coefficients scaled by a positive integer so that all are integral.
    pub fn integer_coeffs(&self) -> Vec<BigInt> {
        let lcm = self
            .coeffs
            .iter()
            .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
        self.coeffs
            .iter()
            .map(|c| c.numer() * (&lcm / c.denom()))
            .collect()
    }
}

impl Add for &RationalPoly {
    type Output = RationalPoly;

    fn add(self, rhs: &RationalPoly) -> RationalPoly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        RationalPoly::from_coeffs((0..len).map(|i| self.coeff(i) + rhs.coeff(i)).collect())
    }
}

impl Sub for &RationalPoly {
    type Output = RationalPoly;

    fn sub(self, rhs: &RationalPoly) -> RationalPoly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        RationalPoly::from_coeffs((0..len).map(|i| self.coeff(i) - rhs.coeff(i)).collect())
    }
}

impl Mul for &RationalPoly {
    type Output = RationalPoly;

    fn mul(self, rhs: &RationalPoly) -> RationalPoly {
        if self.is_zero() || rhs.is_zero() {
            return RationalPoly::zero();
        }
        let mut coeffs = vec![BigRational::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        RationalPoly::from_coeffs(coeffs)
    }
}

impl Neg for &RationalPoly {
    type Output = RationalPoly;

    fn neg(self) -> RationalPoly {
        RationalPoly {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }
}

impl fmt::Display for RationalPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (degree, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let magnitude = c.abs();
            match (first, c.is_negative()) {
                (true, true) => write!(f, "-")?,
                (true, false) => {}
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            first = false;
            let unit = magnitude.is_one();
            match degree {
                0 => write!(f, "{magnitude}")?,
                1 if unit => write!(f, "x")?,
                1 => write!(f, "{magnitude}*x")?,
                _ if unit => write!(f, "x^{degree}")?,
                _ => write!(f, "{magnitude}*x^{degree}")?,
            }
        }
        Ok(())
    }
}

/// Polynomial with ball coefficients, stored lowest degree first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallPoly {
    coeffs: Vec<Ball>,
}

impl BallPoly {
    /// The constant polynomial one.
    pub fn one() -> Self {
        Self {
            coeffs: vec![Ball::one()],
        }
    }

    /// Builds a polynomial from coefficients ordered lowest degree first.
    pub fn from_coeffs(coeffs: Vec<Ball>) -> Self {
        Self { coeffs }
    }

    /// Number of stored coefficients minus one.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Coefficient of `x^index`, if stored.
    pub fn coeff(&self, index: usize) -> Option<&Ball> {
        self.coeffs.get(index)
    }

    /// All coefficients, lowest degree first.
    pub fn coeffs(&self) -> &[Ball] {
        &self.coeffs
    }

    /// Product of two ball polynomials at working precision `prec`.
    pub fn mul(&self, other: &BallPoly, prec: u32) -> BallPoly {
        if self.coeffs.is_empty() || other.coeffs.is_empty() {
            return BallPoly { coeffs: Vec::new() };
        }
        let mut coeffs = vec![Ball::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                if b.is_zero() {
                    continue;
                }
                coeffs[i + j] = coeffs[i + j].add(&a.mul(b, prec), prec);
            }
        }
        BallPoly { coeffs }
    }
}
