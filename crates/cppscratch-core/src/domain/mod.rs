// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for cppscratch.
//!
//! This module contains pure logic with no I/O. Filesystem access, process
//! execution, and the host surfaces are reached through ports (traits)
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or terminal calls
//! - **Few external crates**: std + thiserror, serde for the registry, uuid for handles
//!
// Public API - what the world sees
pub mod build_tool;
pub mod error;
pub mod hooks;
pub mod marker;
pub mod scratchpad;

// Re-exports for convenience
pub use build_tool::{BINARY_NAME, BUILD_DIR, BuildToolDescriptor, BuildToolRegistry};
pub use error::{DomainError, ErrorCategory};
pub use hooks::{HookId, HookList};
pub use marker::{CursorPosition, DEFAULT_MARKER, MarkedSource, take_marker};
pub use scratchpad::{
    DEFAULT_ENTRY_FILE, DisplayHandle, OutputHandle, OutputMode, SCRATCH_PREFIX,
    ScratchpadInstance, ScratchpadSettings,
};
