//! Precision-escalating construction loop.

use gk_core::errors::{precision_error, GkError};
use gk_core::provenance::RunProvenance;
use serde::{Deserialize, Serialize};

use crate::assembly::{genz_keister_construction, QuadratureRule};
use crate::config::RuleConfig;
use crate::extension::{compute_generators_with, GeneratorList};
use crate::verify::AccuracyReport;
use crate::weights::compute_weightfactors;

/// Outcome of one attempt at a fixed working precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Working precision of the attempt, in bits.
    pub working_prec: u32,
    /// True when the rule met the target precision.
    pub accurate: bool,
    /// Widest radius seen, as `log2`; absent when the attempt did not assemble a rule.
    pub max_radius_log2: Option<f64>,
    /// Code of the precision error that aborted the attempt, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A verified rule together with everything that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Configuration the rule was built from.
    pub config: RuleConfig,
    /// Generators of the accepted attempt.
    pub generators: GeneratorList,
    /// The accepted rule.
    pub rule: QuadratureRule,
    /// Accuracy of the accepted rule.
    pub accuracy: AccuracyReport,
    /// Every attempt, in order.
    pub attempts: Vec<AttemptRecord>,
    /// Hashes and precisions of the run.
    pub provenance: RunProvenance,
}

enum Attempt {
    Accepted(Box<(GeneratorList, QuadratureRule, AccuracyReport)>),
    Rejected(AttemptRecord),
}

fn rejected_by(err: GkError, working_prec: u32) -> Result<Attempt, GkError> {
    if !err.is_precision() {
        return Err(err);
    }
    Ok(Attempt::Rejected(AttemptRecord {
        working_prec,
        accurate: false,
        max_radius_log2: None,
        error: Some(err.code().to_string()),
    }))
}

fn attempt(config: &RuleConfig, working_prec: u32) -> Result<Attempt, GkError> {
    let generators = match compute_generators_with(
        &config.family,
        &config.levels,
        working_prec,
        config.extension_criteria(),
    ) {
        Ok(generators) => generators,
        Err(err) => return rejected_by(err, working_prec),
    };
    let table = match compute_weightfactors(&config.family, generators.generators(), working_prec) {
        Ok(table) => table,
        Err(err) => return rejected_by(err, working_prec),
    };
    let rule = genz_keister_construction(
        config.level,
        config.dimension,
        generators.generators(),
        &table,
        working_prec,
    )?;
    let accuracy = AccuracyReport::assess(&rule, config.target_prec);
    if accuracy.accurate {
        Ok(Attempt::Accepted(Box::new((generators, rule, accuracy))))
    } else {
        Ok(Attempt::Rejected(AttemptRecord {
            working_prec,
            accurate: false,
            max_radius_log2: accuracy.max_radius_log2,
            error: None,
        }))
    }
}

/// Builds a rule that meets `config.target_prec`, raising the working
/// precision by `precision_step` after every failed attempt.
///
/// Each attempt restarts from the generators; nothing is reused across
/// precisions. Early extension termination is kept in the outcome's
/// generator list.
pub fn build_rule(config: &RuleConfig) -> Result<RuleOutcome, GkError> {
    config.validate()?;
    let config_hash = config.config_hash()?;
    let mut attempts = Vec::new();
    let mut working_prec = config.working_prec;
    loop {
        match attempt(config, working_prec)? {
            Attempt::Accepted(accepted) => {
                let (generators, rule, accuracy) = *accepted;
                attempts.push(AttemptRecord {
                    working_prec,
                    accurate: true,
                    max_radius_log2: accuracy.max_radius_log2,
                    error: None,
                });
                let provenance = RunProvenance {
                    config_hash,
                    family: config.family.to_string(),
                    levels: config.levels.clone(),
                    working_prec,
                    target_prec: config.target_prec,
                    ..RunProvenance::default()
                }
                .with_tool("gk-rule", env!("CARGO_PKG_VERSION"));
                return Ok(RuleOutcome {
                    config: config.clone(),
                    generators,
                    rule,
                    accuracy,
                    attempts,
                    provenance,
                });
            }
            Attempt::Rejected(record) => attempts.push(record),
        }
        let next = working_prec.saturating_add(config.precision_step);
        if next > config.max_working_prec {
            return Err(precision_error(
                "precision-budget-exhausted",
                "no attempt within max_working_prec met the target precision",
            )
            .with_context("attempts", attempts.len())
            .with_context("last_working_prec", working_prec)
            .with_context("target_prec", config.target_prec)
            .with_hint("raise max_working_prec or lower target_prec"));
        }
        working_prec = next;
    }
}
