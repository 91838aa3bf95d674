//! Application layer errors.
//!
//! These errors represent failures in orchestration, not in the domain
//! rules. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving a scratchpad's lifecycle.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The configured template directory does not exist.
    #[error("Template directory not found: {}", path.display())]
    TemplateMissing { path: PathBuf },

    /// An operation that needs a scratchpad was pointed elsewhere.
    #[error("Not a scratchpad: {}", path.display())]
    NotInScratchpad { path: PathBuf },

    /// None of the registered build tools is on `PATH`.
    #[error("No build tool found (tried: {})", tried.join(", "))]
    NoBuildToolFound { tried: Vec<String> },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// A shell command could not be started.
    #[error("Failed to run `{command}`: {reason}")]
    CommandFailed { command: String, reason: String },

    /// The host surface rejected an operation.
    #[error("Surface error: {reason}")]
    Surface { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateMissing { path } => vec![
                format!("Create a C++ project template at {}", path.display()),
                "Or point `template_dir` in your config at an existing one".into(),
            ],
            Self::NotInScratchpad { path } => vec![
                format!("{} is not a scratchpad directory", path.display()),
                "Run this inside a directory created by `cppscratch new`".into(),
                "List live scratchpads with: cppscratch list".into(),
            ],
            Self::NoBuildToolFound { tried } => vec![
                format!("Install one of: {}", tried.join(", ")),
                "Or register another tool under [[build_tools]] in your config".into(),
                "Check which tools are visible with: cppscratch tools".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::CommandFailed { .. } => vec![
                "Ensure `sh` is available on this system".into(),
            ],
            Self::Surface { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateMissing { .. } => ErrorCategory::NotFound,
            Self::NotInScratchpad { .. } => ErrorCategory::Validation,
            Self::NoBuildToolFound { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::CommandFailed { .. } | Self::Surface { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
