//! Application layer for cppscratch.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScratchpadManager)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but keeps no rules of
//! its own about template content or registries. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{CompileReport, ScratchpadManager, select_build_tool, shell_quote};

// Re-export port traits (for adapter implementation)
pub use ports::{ExecutableResolver, Filesystem, ShellRunner, Workbench};

pub use error::ApplicationError;
