#![deny(missing_docs)]
#![doc = "Genz-Keister sparse-grid rules: nested generator extension, weight factors, assembly and verification."]

/// Node and weight assembly over admissible partitions.
pub mod assembly;
/// Parallel construction of independent rules.
pub mod batch;
/// Rule configuration files.
pub mod config;
/// Precision-escalating construction loop.
pub mod driver;
/// Monomial residuals of assembled rules.
pub mod exactness;
/// Nested polynomial extension and generator extraction.
pub mod extension;
/// Serializable summaries of generators and rules.
pub mod report;
/// Radius checks against a target precision.
pub mod verify;
/// Weight factor tables.
pub mod weights;

pub use assembly::{
    admissibility_defect, compute_nodes, compute_weights, genz_keister_construction, Node,
    QuadratureRule, ADMISSIBILITY_DEFECTS,
};
pub use batch::build_batch;
pub use config::{BatchConfig, RuleConfig};
pub use driver::{build_rule, AttemptRecord, RuleOutcome};
pub use exactness::{degree_of_exactness, moment_residual};
pub use extension::{
    compute_generators, compute_generators_with, find_extension, has_positive_weights,
    interpolatory_weights, max_min_sort, ExtensionCriteria, GeneratorList, LevelRecord,
    PolynomialChain,
};
pub use report::{GeneratorReport, RuleReport};
pub use verify::{check_accuracy, check_rule_accuracy, AccuracyReport};
pub use weights::{compute_weightfactors, WeightFactorTable};
