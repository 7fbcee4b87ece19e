//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not in the
//! descriptor or variable rules. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ProcessStep;
use crate::error::ErrorCategory;

/// Why a project path could not be resolved to exactly one descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// The path does not exist, or is neither a file nor a directory.
    #[error("invalid path {}: {reason}", .path.display())]
    InvalidPath { path: PathBuf, reason: String },

    /// The directory holds no `.wproj` file.
    #[error("Tungsten project file (.wproj) not found in {}", .dir.display())]
    NotFound { dir: PathBuf },

    /// The directory holds more than one `.wproj` file.
    #[error(
        "there should be no more than one Tungsten project file (.wproj) in {}, {} were found: {}",
        .dir.display(),
        .candidates.len(),
        .candidates.join(", ")
    )]
    Ambiguous {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    /// The filesystem refused to answer (permissions, I/O failure).
    #[error("filesystem error at {}: {reason}", .path.display())]
    FilesystemFault { path: PathBuf, reason: String },
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Descriptor lookup failed.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// A file could not be read.
    #[error("failed to read {}: {reason}", .path.display())]
    FileRead { path: PathBuf, reason: String },

    /// A file could not be written.
    #[error("failed to write {}: {reason}", .path.display())]
    FileWrite { path: PathBuf, reason: String },

    /// Any other filesystem operation failed.
    #[error("filesystem error at {}: {reason}", .path.display())]
    Filesystem { path: PathBuf, reason: String },

    /// An external process ran but exited unsuccessfully.
    #[error("{step} step `{}` exited with {}", .program.display(), describe_code(.code))]
    ProcessFailed {
        step: ProcessStep,
        program: PathBuf,
        code: Option<i32>,
    },

    /// An external process could not be started at all.
    #[error("{step} step `{}` could not be started: {reason}", .program.display())]
    ProcessSpawn {
        step: ProcessStep,
        program: PathBuf,
        reason: String,
    },

    /// Shared adapter state was poisoned.
    #[error("filesystem state lock poisoned")]
    StoreLockError,
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".into(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Locate(LocateError::NotFound { dir }) => vec![
                format!("No .wproj file in {}", dir.display()),
                "Pass the project directory or the .wproj file itself".into(),
            ],
            Self::Locate(LocateError::Ambiguous { candidates, .. }) => vec![
                "Keep a single .wproj file in the project directory".into(),
                format!("Or pass one of them directly: {}", candidates.join(", ")),
            ],
            Self::Locate(LocateError::InvalidPath { path, .. }) => vec![
                format!("Check that {} exists", path.display()),
            ],
            Self::FileRead { path, .. } | Self::FileWrite { path, .. } | Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have the required permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProcessSpawn { program, .. } => vec![
                format!("Ensure `{}` is installed and in your PATH", program.display()),
                "Or point build_tool.program at it in the configuration file".into(),
            ],
            Self::ProcessFailed { .. } => vec![
                "Check the build tool output above for details".into(),
                "Re-run with -vv to see captured output".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Locate(LocateError::NotFound { .. }) => ErrorCategory::NotFound,
            Self::Locate(LocateError::InvalidPath { .. } | LocateError::Ambiguous { .. }) => {
                ErrorCategory::Validation
            }
            Self::Locate(LocateError::FilesystemFault { .. }) => ErrorCategory::Internal,
            Self::FileRead { .. } | Self::FileWrite { .. } | Self::Filesystem { .. } => {
                ErrorCategory::Internal
            }
            Self::ProcessFailed { .. } | Self::ProcessSpawn { .. } => ErrorCategory::External,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }

    /// True for faults raised by the filesystem rather than by logic.
    pub fn is_filesystem(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. }
                | Self::FileWrite { .. }
                | Self::Filesystem { .. }
                | Self::Locate(LocateError::FilesystemFault { .. })
        )
    }
}
