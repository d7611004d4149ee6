//! YAML/JSON configuration for rule construction.

use std::path::Path;

use gk_core::errors::{ErrorInfo, GkError};
use gk_core::{load_document, stable_hash_string};
use gk_family::{Family, WeightFamily};
use serde::{Deserialize, Serialize};

use crate::extension::ExtensionCriteria;

fn config_error(code: &str, message: &str) -> GkError {
    GkError::Config(ErrorInfo::new(code, message))
}

fn default_levels() -> Vec<usize> {
    vec![1, 2, 6, 10, 16]
}

fn default_dimension() -> usize {
    2
}

fn default_level() -> usize {
    4
}

fn default_working_prec() -> u32 {
    128
}

fn default_target_prec() -> u32 {
    53
}

fn default_precision_step() -> u32 {
    64
}

fn default_max_working_prec() -> u32 {
    1024
}

fn default_threads() -> usize {
    1
}

/// Parameters of one rule construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Weight family, fixed for the whole run.
    #[serde(default)]
    pub family: Family,
    /// Extension degrees `p_0, p_1, ...`.
    #[serde(default = "default_levels")]
    pub levels: Vec<usize>,
    /// Number of dimensions `D`.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// Truncation level `K`.
    #[serde(default = "default_level")]
    pub level: usize,
    /// Initial working precision in bits.
    #[serde(default = "default_working_prec")]
    pub working_prec: u32,
    /// Precision every node and weight must reach.
    #[serde(default = "default_target_prec")]
    pub target_prec: u32,
    /// Bits added to the working precision after a failed attempt.
    #[serde(default = "default_precision_step")]
    pub precision_step: u32,
    /// Largest working precision the driver may try.
    #[serde(default = "default_max_working_prec")]
    pub max_working_prec: u32,
    /// Also reject extension levels whose one-dimensional rule has a
    /// weight that is not strictly positive.
    #[serde(default)]
    pub require_positive_weights: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            family: Family::default(),
            levels: default_levels(),
            dimension: default_dimension(),
            level: default_level(),
            working_prec: default_working_prec(),
            target_prec: default_target_prec(),
            precision_step: default_precision_step(),
            max_working_prec: default_max_working_prec(),
            require_positive_weights: false,
        }
    }
}

impl RuleConfig {
    /// Loads and validates a configuration file (`.json` or YAML).
    pub fn load(path: &Path) -> Result<Self, GkError> {
        let config: RuleConfig = load_document(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Extension acceptance criteria selected by this configuration.
    pub fn extension_criteria(&self) -> ExtensionCriteria {
        ExtensionCriteria {
            require_positive_weights: self.require_positive_weights,
        }
    }

    /// Rejects values no construction can satisfy.
    pub fn validate(&self) -> Result<(), GkError> {
        if !self.family.is_symmetric() {
            return Err(GkError::Config(
                ErrorInfo::new("asymmetric-family", "fully symmetric rules need an even weight")
                    .with_context("family", self.family)
                    .with_hint("choose hermite-pro, hermite-phys, legendre, chebyshev-t or chebyshev-u"),
            ));
        }
        if self.dimension == 0 {
            return Err(config_error("zero-dimension", "dimension must be positive"));
        }
        if self.levels.is_empty() {
            return Err(config_error("empty-levels", "at least one extension level is required"));
        }
        if self.levels.contains(&0) {
            return Err(config_error("zero-level", "extension levels must be positive"));
        }
        if self.working_prec == 0 || self.target_prec == 0 {
            return Err(config_error("zero-precision", "precisions must be positive"));
        }
        if self.precision_step == 0 {
            return Err(config_error("zero-precision-step", "precision step must be positive"));
        }
        if self.target_prec > self.max_working_prec || self.working_prec > self.max_working_prec {
            return Err(GkError::Config(
                ErrorInfo::new(
                    "precision-above-budget",
                    "working and target precision must not exceed max_working_prec",
                )
                .with_context("working_prec", self.working_prec)
                .with_context("target_prec", self.target_prec)
                .with_context("max_working_prec", self.max_working_prec),
            ));
        }
        Ok(())
    }

    /// Stable hash of the canonical JSON form.
    pub fn config_hash(&self) -> Result<String, GkError> {
        stable_hash_string(self)
    }
}

/// Several independent constructions run together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Rules to build, in output order.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    /// Worker threads.
    #[serde(default = "default_threads")]
    pub threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            threads: default_threads(),
        }
    }
}

impl BatchConfig {
    /// Loads and validates a batch file.
    pub fn load(path: &Path) -> Result<Self, GkError> {
        let config: BatchConfig = load_document(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every rule; an empty batch is an error.
    pub fn validate(&self) -> Result<(), GkError> {
        if self.rules.is_empty() {
            return Err(config_error("empty-batch", "batch lists no rules"));
        }
        for (index, rule) in self.rules.iter().enumerate() {
            rule.validate().map_err(|err| match err {
                GkError::Config(info) => GkError::Config(info.with_context("rule", index)),
                other => other,
            })?;
        }
        Ok(())
    }
}
