//! Application services - orchestrate use cases.
//!
//! The single service drives the scratchpad lifecycle through the driven
//! ports.

pub mod scratchpad_service;

pub use scratchpad_service::{CompileReport, ScratchpadManager, select_build_tool, shell_quote};
