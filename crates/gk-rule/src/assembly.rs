//! Fully symmetric node sets and sparse-grid weights over admissible partitions.

use gk_arb::{pow2, Ball};
use gk_comb::{LatticePoints, Partitions, Permutations};
use gk_core::errors::{range_error, GkError};
use serde::{Deserialize, Serialize};

use crate::weights::WeightFactorTable;

/// Admissibility defects `Z[p]` for part values `p` below 27.
pub const ADMISSIBILITY_DEFECTS: [usize; 27] = [
    0, 0, 1, 0, 0, 3, 2, 1, 0, 0, 5, 4, 3, 2, 1, 0, 0, 0, 8, 7, 6, 5, 4, 3, 2, 1, 0,
];

/// A point of the rule, one ball per dimension.
pub type Node = Vec<Ball>;

/// Nodes with index-aligned weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadratureRule {
    /// Number of coordinates per node.
    pub dimension: usize,
    /// Truncation level `K`.
    pub level: usize,
    /// Quadrature nodes.
    pub nodes: Vec<Node>,
    /// Weight of each node.
    pub weights: Vec<Ball>,
}

impl QuadratureRule {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the rule has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Enclosure of the sum of all weights.
    pub fn weight_sum(&self, prec: u32) -> Ball {
        self.weights
            .iter()
            .fold(Ball::zero(), |acc, weight| acc.add(weight, prec))
    }
}

/// Looks up `Z[part]`.
pub fn admissibility_defect(part: usize) -> Result<usize, GkError> {
    ADMISSIBILITY_DEFECTS.get(part).copied().ok_or_else(|| {
        range_error("unsupported-part-size", "part value beyond the admissibility table")
            .with_context("part", part)
            .with_context("max_part", ADMISSIBILITY_DEFECTS.len() - 1)
    })
}

fn is_admissible(partition: &[usize], level: usize) -> Result<bool, GkError> {
    let mut total = 0;
    for &part in partition {
        total += part + admissibility_defect(part)?;
    }
    Ok(total <= level)
}

/// Every sign and coordinate permutation of the partition's generators.
///
/// Parts equal to zero map to `generators[0]` and are never negated, so a
/// partition with `m` nonzero parts yields `2^m` images per ordering.
pub fn compute_nodes(partition: &[usize], generators: &[Ball]) -> Result<Vec<Node>, GkError> {
    if let Some(&part) = partition.iter().find(|&&part| part >= generators.len()) {
        return Err(
            range_error("partition-index-out-of-range", "part indexes past the generator list")
                .with_context("part", part)
                .with_context("generators", generators.len()),
        );
    }
    let nonzero = partition.iter().filter(|&&part| part != 0).count();
    let sign_patterns: u64 = 1 << nonzero;
    let mut nodes = Vec::new();
    for ordering in Permutations::new(partition) {
        for pattern in 0..sign_patterns {
            let mut bit = 0;
            let node = ordering
                .iter()
                .map(|&part| {
                    let value = &generators[part];
                    if part == 0 {
                        return value.clone();
                    }
                    let flip = (pattern >> bit) & 1 == 1;
                    bit += 1;
                    if flip {
                        value.neg()
                    } else {
                        value.clone()
                    }
                })
                .collect();
            nodes.push(node);
        }
    }
    Ok(nodes)
}

/// Scalar weight shared by every node of `partition` in the level-`level` rule.
pub fn compute_weights(
    partition: &[usize],
    level: usize,
    table: &WeightFactorTable,
    working_prec: u32,
) -> Result<Ball, GkError> {
    let total: usize = partition.iter().sum();
    let Some(slack) = level.checked_sub(total) else {
        return Err(
            range_error("partition-exceeds-level", "partition sum is above the level")
                .with_context("sum", total)
                .with_context("level", level),
        );
    };
    let dimension = partition.len();
    let mut weight = Ball::zero();
    for shift in 0..=slack {
        for offsets in LatticePoints::new(dimension, shift) {
            let mut term = Ball::one();
            for (&part, &offset) in partition.iter().zip(&offsets) {
                term = term.mul(table.get(part, part + offset)?, working_prec);
            }
            weight = weight.add(&term, working_prec);
        }
    }
    let nonzero = partition.iter().filter(|&&part| part != 0).count();
    Ok(weight.mul_rational(&pow2(-(nonzero as i64)), working_prec))
}

/// Assembles the `dimension`-dimensional rule of level `level`.
pub fn genz_keister_construction(
    level: usize,
    dimension: usize,
    generators: &[Ball],
    table: &WeightFactorTable,
    working_prec: u32,
) -> Result<QuadratureRule, GkError> {
    if dimension == 0 {
        return Err(range_error("zero-dimension", "rules need at least one dimension"));
    }
    if level >= generators.len() || level >= table.size() {
        return Err(
            range_error("insufficient-generators", "level needs more generators than available")
                .with_context("level", level)
                .with_context("generators", generators.len())
                .with_hint("request more extension levels or lower the level"),
        );
    }
    // Zero parts stand for the origin coordinate and are never negated.
    if !generators[0].is_zero() {
        return Err(
            range_error("first-generator-not-origin", "the first generator must be exactly zero")
                .with_context("first", generators[0].to_f64())
                .with_hint("start the levels with an odd degree of a symmetric family"),
        );
    }

    let mut nodes = Vec::new();
    let mut weights = Vec::new();
    for total in 0..=level {
        for partition in Partitions::new(dimension, total) {
            if !is_admissible(&partition, level)? {
                continue;
            }
            let weight = compute_weights(&partition, level, table, working_prec)?;
            let images = compute_nodes(&partition, generators)?;
            weights.extend(std::iter::repeat(weight).take(images.len()));
            nodes.extend(images);
        }
    }

    Ok(QuadratureRule {
        dimension,
        level,
        nodes,
        weights,
    })
}
