//! Infrastructure adapters for cppscratch.
//!
//! Implements the driven ports declared in `cppscratch_core::application::ports`:
//!
//! - [`LocalFilesystem`]: `std::fs` + `walkdir` + `tempfile`
//! - [`PosixShell`]: `sh -c` with stdout and stderr merged
//! - [`PathResolver`]: `which` lookups on `PATH`

pub mod filesystem;
pub mod process;

pub use filesystem::LocalFilesystem;
pub use process::{PathResolver, PosixShell};
