//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: Directory copies, reads, writes, symlinks
//!   - `ShellRunner`: Build command execution
//!   - `ExecutableResolver`: `PATH` lookup for build tool selection
//!   - `Workbench`: Display and output surfaces of the host
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ExecutableResolver, Filesystem, ShellRunner, Workbench};

#[cfg(test)]
pub use output::MockExecutableResolver;
