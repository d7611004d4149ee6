//! Weight factor tables as divided differences in `y = x^2`.

use gk_arb::{Ball, BallPoly};
use gk_core::errors::{precision_error, range_error, GkError};
use gk_family::WeightFamily;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Upper-triangular `n x n` table `W[xi][theta]` plus the moment coefficients `a_0..a_n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightFactorTable {
    size: usize,
    entries: Vec<Ball>,
    coefficients: Vec<Ball>,
}

impl WeightFactorTable {
    /// Side length of the table (the number of generators).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry `W[xi][theta]`; exact zero below the diagonal.
    pub fn get(&self, xi: usize, theta: usize) -> Result<&Ball, GkError> {
        if xi >= self.size || theta >= self.size {
            return Err(
                range_error("weight-index-out-of-range", "weight factor index outside the table")
                    .with_context("xi", xi)
                    .with_context("theta", theta)
                    .with_context("size", self.size),
            );
        }
        Ok(&self.entries[xi * self.size + theta])
    }

    /// Moment coefficients `a_i = L(prod_{j<i} (x^2 - g_j^2))` for `i` in `0..=n`.
    pub fn coefficients(&self) -> &[Ball] {
        &self.coefficients
    }
}

fn snap_zero(ball: Ball) -> Ball {
    if ball.mid().is_zero() {
        Ball::zero()
    } else {
        ball
    }
}

/// Builds the weight factor table for `generators` at `working_prec` bits.
pub fn compute_weightfactors(
    family: &dyn WeightFamily,
    generators: &[Ball],
    working_prec: u32,
) -> Result<WeightFactorTable, GkError> {
    let n = generators.len();
    if n == 0 {
        return Err(range_error("empty-generators", "weight factors need at least one generator"));
    }
    let prec = working_prec;
    let moments = family.moments(2 * n);
    let squares: Vec<Ball> = generators.iter().map(|g| g.mul(g, prec)).collect();

    let mut coefficients = Vec::with_capacity(n + 1);
    coefficients.push(Ball::one());
    let mut running = BallPoly::one();
    for square in &squares {
        let factor = BallPoly::from_coeffs(vec![square.neg(), Ball::zero(), Ball::one()]);
        running = running.mul(&factor, prec);
        let value = running
            .coeffs()
            .iter()
            .zip(&moments)
            .filter(|(_, moment)| !moment.is_zero())
            .fold(Ball::zero(), |acc, (coeff, moment)| {
                acc.add(&coeff.mul_rational(moment, prec), prec)
            });
        coefficients.push(snap_zero(value));
    }

    let mut entries = vec![Ball::zero(); n * n];
    for xi in 0..n {
        let mut denominator = Ball::one();
        for theta in 0..n {
            if theta != xi {
                denominator = denominator.mul(&squares[xi].sub(&squares[theta], prec), prec);
            }
            if theta < xi {
                continue;
            }
            let entry = coefficients[theta].checked_div(&denominator, prec).ok_or_else(|| {
                precision_error("denominator-contains-zero", "weight factor denominator encloses zero")
                    .with_context("xi", xi)
                    .with_context("theta", theta)
                    .with_context("working_prec", prec)
                    .with_hint("raise the working precision or check for repeated generators")
            })?;
            entries[xi * n + theta] = entry;
        }
    }

    Ok(WeightFactorTable {
        size: n,
        entries,
        coefficients,
    })
}
