//! Monomial residuals of assembled rules.

use gk_arb::Ball;
use gk_comb::LatticePoints;
use gk_core::errors::{range_error, GkError};
use gk_family::WeightFamily;
use num_traits::One;

use crate::assembly::QuadratureRule;

/// Enclosure of `sum_i w_i x_i^alpha - prod_d m_{alpha_d}` for the normalised weight.
pub fn moment_residual(
    rule: &QuadratureRule,
    family: &dyn WeightFamily,
    exponents: &[usize],
    prec: u32,
) -> Result<Ball, GkError> {
    if exponents.len() != rule.dimension {
        return Err(
            range_error("exponent-dimension-mismatch", "one exponent per dimension is required")
                .with_context("exponents", exponents.len())
                .with_context("dimension", rule.dimension),
        );
    }
    let mut quadrature = Ball::zero();
    for (node, weight) in rule.nodes.iter().zip(&rule.weights) {
        let mut term = weight.clone();
        for (coordinate, &power) in node.iter().zip(exponents) {
            term = term.mul(&coordinate.pow_u32(power as u32, prec), prec);
        }
        quadrature = quadrature.add(&term, prec);
    }
    let exact = exponents
        .iter()
        .fold(gk_arb::BigRational::one(), |acc, &power| acc * family.integrate(power));
    Ok(quadrature.sub(&Ball::exact(exact), prec))
}

/// Largest even total degree `t <= max_degree` such that every monomial with
/// even exponents and total degree at most `t` has a residual enclosing zero.
///
/// `None` when even the constant monomial fails.
pub fn degree_of_exactness(
    rule: &QuadratureRule,
    family: &dyn WeightFamily,
    max_degree: usize,
    prec: u32,
) -> Result<Option<usize>, GkError> {
    let mut exact_to = None;
    for half in 0..=max_degree / 2 {
        for exponents in LatticePoints::new(rule.dimension, half) {
            let doubled: Vec<usize> = exponents.iter().map(|e| 2 * e).collect();
            if !moment_residual(rule, family, &doubled, prec)?.contains_zero() {
                return Ok(exact_to);
            }
        }
        exact_to = Some(2 * half);
    }
    Ok(exact_to)
}
