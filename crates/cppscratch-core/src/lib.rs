//! cppscratch Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for cppscratch,
//! a tool that seeds throwaway C++ projects from a template, builds them
//! with Meson or CMake, and runs the result.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          cppscratch-cli (CLI)           │
//! │  (Drives the manager, owns Workbench)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (ScratchpadManager)            │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, ShellRunner, Resolver,     │
//! │  Workbench)                             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   cppscratch-adapters (Infrastructure)  │
//! │ (LocalFilesystem, PosixShell, PathResolver) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (BuildToolRegistry, marker, HookList,   │
//! │  ScratchpadInstance)                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cppscratch_core::prelude::*;
//!
//! let settings = ScratchpadSettings::new("/tmp/cppscratch", "/home/me/.local/share/cppscratch/template");
//! let manager = ScratchpadManager::new(settings, &resolver, filesystem, shell, workbench)?;
//!
//! let mut pad = manager.create_scratchpad()?;
//! let report = manager.compile(&mut pad, true)?;
//! manager.destroy_scratchpad(pad)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

#[cfg(test)]
mod testing;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CompileReport, ScratchpadManager, select_build_tool,
        ports::{ExecutableResolver, Filesystem, ShellRunner, Workbench},
    };
    pub use crate::domain::{
        BuildToolDescriptor, BuildToolRegistry, CursorPosition, DisplayHandle, HookId, HookList,
        OutputHandle, OutputMode, ScratchpadInstance, ScratchpadSettings,
    };
    pub use crate::error::{ScratchError, ScratchResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
