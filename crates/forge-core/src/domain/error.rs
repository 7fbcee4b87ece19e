// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::entities::variables::Var;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the build log and the CLI both keep copies)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Descriptor Errors
    // ========================================================================
    #[error("malformed project descriptor: {reason}")]
    MalformedDescriptor { reason: String },

    #[error("project descriptor has no \"{field}\"")]
    MissingField { field: &'static str },

    // ========================================================================
    // Variable Store Errors
    // ========================================================================
    #[error("build variable '{var}' is not set")]
    VariableNotSet { var: Var },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedDescriptor { reason } => vec![
                "The .wproj file must be a YAML mapping of keys to values".into(),
                format!("Details: {}", reason),
            ],
            Self::MissingField { field } => vec![
                format!("Add a `{}` key to the .wproj file", field),
                "Example: projectName: MyGame".into(),
            ],
            Self::VariableNotSet { var } => vec![
                format!("The '{}' path was not provided", var),
                "Pass it on the command line or set it in the configuration file".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedDescriptor { .. } | Self::MissingField { .. } => {
                ErrorCategory::Validation
            }
            Self::VariableNotSet { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
