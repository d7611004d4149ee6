//! Radius checks against a target precision.

use gk_arb::Ball;
use serde::{Deserialize, Serialize};

use crate::assembly::{Node, QuadratureRule};

/// True iff the radius of `ball` is strictly below `2^-target_prec`.
pub fn check_accuracy(ball: &Ball, target_prec: u32) -> bool {
    ball.radius_below(target_prec)
}

/// True iff every coordinate and every weight passes [`check_accuracy`].
///
/// Mismatched lengths never pass.
pub fn check_rule_accuracy(nodes: &[Node], weights: &[Ball], target_prec: u32) -> bool {
    nodes.len() == weights.len()
        && nodes
            .iter()
            .flatten()
            .chain(weights)
            .all(|ball| check_accuracy(ball, target_prec))
}

/// Summary of the accuracy check over a whole rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Precision the rule was checked against, in bits.
    pub target_prec: u32,
    /// Number of balls inspected (coordinates plus weights).
    pub checked: usize,
    /// Number of balls whose radius is too wide.
    pub failing: usize,
    /// `log2` of the widest radius; absent when every ball is exact.
    pub max_radius_log2: Option<f64>,
    /// True when nothing failed.
    pub accurate: bool,
}

impl AccuracyReport {
    /// Inspects every coordinate and weight of `rule`.
    pub fn assess(rule: &QuadratureRule, target_prec: u32) -> Self {
        let mut checked = 0;
        let mut failing = 0;
        let mut widest: Option<f64> = None;
        for ball in rule.nodes.iter().flatten().chain(&rule.weights) {
            checked += 1;
            if !check_accuracy(ball, target_prec) {
                failing += 1;
            }
            if !ball.is_exact() {
                let log2 = ball.radius_log2();
                widest = Some(widest.map_or(log2, |current| current.max(log2)));
            }
        }
        Self {
            target_prec,
            checked,
            failing,
            max_radius_log2: widest,
            accurate: failing == 0 && rule.nodes.len() == rule.weights.len(),
        }
    }
}
