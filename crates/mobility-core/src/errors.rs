//! Structured error types shared across the mobility crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic carried by every [`MobilityError`].
///
/// `code` is a short stable tag such as `unknown-mechanism` or
/// `quadrature-budget` that tests and the CLI match on. `context` pins the
/// failure to a point of the scan: mechanism label, composition, index or the
/// offending parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable error tag.
    pub code: String,
    /// What went wrong.
    pub message: String,
    /// Where in the scan it went wrong.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Accepted values or the config key to change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Diagnostic without context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records where the failure happened.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Suggests the accepted values.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the mobility engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum MobilityError {
    /// Invalid structural input: binary count, unknown mechanism, model or FOM name,
    /// inconsistent bandgap flags, malformed operating conditions.
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// Numerical integration failed to converge or produced a non-finite value.
    #[error("integration error: {0}")]
    Integration(ErrorInfo),
    /// Material database lookups and parameter tables.
    #[error("database error: {0}")]
    Database(ErrorInfo),
    /// Serialization, deserialization and artefact I/O.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

// Renders as `message [code] at key=value, key=value; hint: ...`.
impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " at {key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
        }
        if let Some(hint) = &self.hint {
            write!(f, "; hint: {hint}")?;
        }
        Ok(())
    }
}

impl MobilityError {
    /// Shorthand for a [`MobilityError::Configuration`] error.
    pub fn configuration(code: &str, message: impl Into<String>) -> Self {
        MobilityError::Configuration(ErrorInfo::new(code, message.into()))
    }

    /// Shorthand for a [`MobilityError::Database`] error.
    pub fn database(code: &str, message: impl Into<String>) -> Self {
        MobilityError::Database(ErrorInfo::new(code, message.into()))
    }

    /// Shorthand for a [`MobilityError::Serde`] error built from any displayable cause.
    pub fn serde(code: &str, err: impl ToString) -> Self {
        MobilityError::Serde(ErrorInfo::new(code, err.to_string()))
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            MobilityError::Configuration(info)
            | MobilityError::Integration(info)
            | MobilityError::Database(info)
            | MobilityError::Serde(info) => info,
        }
    }

    /// Configuration and integration errors share a class; neither is retried.
    pub fn is_configuration_class(&self) -> bool {
        matches!(
            self,
            MobilityError::Configuration(_) | MobilityError::Integration(_)
        )
    }

    /// Attaches an additional context entry, preserving the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            MobilityError::Configuration(info) => {
                MobilityError::Configuration(info.with_context(key, value))
            }
            MobilityError::Integration(info) => {
                MobilityError::Integration(info.with_context(key, value))
            }
            MobilityError::Database(info) => MobilityError::Database(info.with_context(key, value)),
            MobilityError::Serde(info) => MobilityError::Serde(info.with_context(key, value)),
        }
    }
}
