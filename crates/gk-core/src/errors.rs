//! Structured error types shared across the Genz-Keister crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`GkError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, sizes, precisions, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the quadrature pipeline.
///
/// An unsolvable extension level is not an error: it shortens the generator
/// list and is reported through the list itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GkError {
    /// Malformed extension levels or polynomial input.
    #[error("extension error: {0}")]
    Extension(ErrorInfo),
    /// Interval enclosures too wide for the requested operation or target.
    #[error("precision error: {0}")]
    Precision(ErrorInfo),
    /// Index or part value outside a supported range.
    #[error("range error: {0}")]
    Range(ErrorInfo),
    /// Invalid configuration values.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization, schema and I/O errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl GkError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GkError::Extension(info)
            | GkError::Precision(info)
            | GkError::Range(info)
            | GkError::Config(info)
            | GkError::Serde(info) => info,
        }
    }

    /// Returns the stable machine readable code of the error.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// True when re-running the pipeline at a higher working precision may help.
    pub fn is_precision(&self) -> bool {
        matches!(self, GkError::Precision(_))
    }

    fn info_mut(&mut self) -> &mut ErrorInfo {
        match self {
            GkError::Extension(info)
            | GkError::Precision(info)
            | GkError::Range(info)
            | GkError::Config(info)
            | GkError::Serde(info) => info,
        }
    }

    /// Adds a context entry to the payload, keeping the variant.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.info_mut().context.insert(key.into(), value.to_string());
        self
    }

    /// Sets the payload hint, keeping the variant.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.info_mut().hint = Some(hint.into());
        self
    }
}

/// Shorthand for a [`GkError::Range`] with the given code and message.
pub fn range_error(code: &str, message: impl Into<String>) -> GkError {
    GkError::Range(ErrorInfo::new(code, message))
}

/// Shorthand for a [`GkError::Precision`] with the given code and message.
pub fn precision_error(code: &str, message: impl Into<String>) -> GkError {
    GkError::Precision(ErrorInfo::new(code, message))
}
