// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so callers can keep them in reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Template content
    // ========================================================================
    #[error("marker '{marker}' not found in {}", file.display())]
    MarkerMissing { file: PathBuf, marker: char },

    // ========================================================================
    // Settings / registry
    // ========================================================================
    #[error("invalid build tool: {reason}")]
    InvalidBuildTool { reason: String },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MarkerMissing { file, marker } => vec![
                format!(
                    "Add a single '{}' to {} where the cursor should start",
                    marker,
                    file.display()
                ),
                "Or change the marker with the `marker` config key".into(),
            ],
            Self::InvalidBuildTool { reason } => vec![
                format!("Details: {}", reason),
                "Every [[build_tools]] entry needs a name and both commands".into(),
            ],
            Self::InvalidSettings(msg) => vec![
                "Check your configuration file".into(),
                format!("Details: {}", msg),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MarkerMissing { .. } => ErrorCategory::Validation,
            Self::InvalidBuildTool { .. } | Self::InvalidSettings(_) => {
                ErrorCategory::Configuration
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
