//! Serializable summaries with stable content hashes.

use gk_core::errors::GkError;
use gk_core::provenance::{RunProvenance, SchemaVersion};
use gk_core::{round_f64, stable_hash_string};
use gk_family::{Family, WeightFamily};
use serde::{Deserialize, Serialize};

use crate::driver::{AttemptRecord, RuleOutcome};
use crate::extension::{GeneratorList, LevelRecord};
use crate::verify::AccuracyReport;

/// Generator values and per-level diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorReport {
    /// Weight family name.
    pub family: String,
    /// Requested extension degrees.
    pub levels: Vec<usize>,
    /// Levels whose roots were appended.
    pub levels_completed: usize,
    /// True when no level terminated the extension early.
    pub complete: bool,
    /// Working precision of the enclosures, in bits.
    pub working_prec: u32,
    /// Generator midpoints rounded for display.
    pub generators: Vec<f64>,
    /// Per-level records.
    pub records: Vec<LevelRecord>,
    /// Hash of the report with this field empty.
    pub hash: String,
}

impl GeneratorReport {
    /// Summarises `list` for `family`.
    pub fn new(family: Family, list: &GeneratorList) -> Result<Self, GkError> {
        let mut report = Self {
            family: family.to_string(),
            levels: list.levels.clone(),
            levels_completed: list.levels_completed(),
            complete: list.is_complete(),
            working_prec: list.working_prec,
            generators: list.generators.iter().map(|g| round_f64(g.to_f64())).collect(),
            records: list.records.clone(),
            hash: String::new(),
        };
        report.hash = stable_hash_string(&report)?;
        Ok(report)
    }
}

/// Summary of a verified rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleReport {
    /// Schema version of this payload.
    pub schema: SchemaVersion,
    /// Run provenance.
    pub provenance: RunProvenance,
    /// Number of dimensions.
    pub dimension: usize,
    /// Truncation level.
    pub level: usize,
    /// Number of nodes.
    pub node_count: usize,
    /// Node midpoints rounded for display.
    pub nodes: Vec<Vec<f64>>,
    /// Weight midpoints rounded for display.
    pub weights: Vec<f64>,
    /// Midpoint of the weight sum.
    pub weight_sum: f64,
    /// Total mass of the unnormalised weight; scale weights by it to integrate
    /// against the weight function itself.
    pub mass: f64,
    /// Accuracy verdict of the accepted attempt.
    pub accuracy: AccuracyReport,
    /// False when the generator extension stopped early.
    pub generators_complete: bool,
    /// Every precision attempt.
    pub attempts: Vec<AttemptRecord>,
    /// Hash of the report with this field empty.
    pub hash: String,
}

impl RuleReport {
    /// Summarises a driver outcome.
    pub fn from_outcome(outcome: &RuleOutcome) -> Result<Self, GkError> {
        let rule = &outcome.rule;
        let mut report = Self {
            schema: SchemaVersion::default(),
            provenance: outcome.provenance.clone(),
            dimension: rule.dimension,
            level: rule.level,
            node_count: rule.len(),
            nodes: rule
                .nodes
                .iter()
                .map(|node| node.iter().map(|c| round_f64(c.to_f64())).collect())
                .collect(),
            weights: rule.weights.iter().map(|w| round_f64(w.to_f64())).collect(),
            weight_sum: round_f64(rule.weight_sum(outcome.provenance.working_prec).to_f64()),
            mass: round_f64(
                outcome
                    .config
                    .family
                    .transcendental_factor(outcome.provenance.working_prec)
                    .to_f64(),
            ),
            accuracy: outcome.accuracy.clone(),
            generators_complete: outcome.generators.is_complete(),
            attempts: outcome.attempts.clone(),
            hash: String::new(),
        };
        report.hash = stable_hash_string(&report)?;
        Ok(report)
    }
}
