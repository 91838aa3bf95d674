//! Executable lookup on `PATH`.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::trace;

use cppscratch_core::application::ports::ExecutableResolver;

/// Resolves executable names against `PATH`.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    /// Search path override. `None` uses the process `PATH`.
    paths: Option<OsString>,
}

impl PathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search only the given `PATH`-style list.
    pub fn with_paths(paths: impl Into<OsString>) -> Self {
        Self {
            paths: Some(paths.into()),
        }
    }
}

impl ExecutableResolver for PathResolver {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let found = match &self.paths {
            Some(paths) => {
                let cwd = std::env::current_dir().ok()?;
                which::which_in(name, Some(paths), cwd).ok()
            }
            None => which::which(name).ok(),
        };
        trace!(name, found = ?found, "resolve executable");
        found
    }
}
