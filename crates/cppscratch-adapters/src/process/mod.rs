//! Process adapters: running shell command lines and locating executables.

mod shell;
mod which;

pub use shell::PosixShell;
pub use which::PathResolver;
