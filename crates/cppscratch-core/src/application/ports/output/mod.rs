//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cppscratch-adapters` crate provides the filesystem, shell, and
//! resolver implementations; the CLI provides the [`Workbench`].

use std::path::{Path, PathBuf};

use crate::domain::{CursorPosition, DisplayHandle, OutputHandle, OutputMode};
use crate::error::ScratchResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cppscratch_adapters::filesystem::LocalFilesystem` (production)
pub trait Filesystem: Send + Sync {
    /// Check if path exists. Dangling symlinks count as absent.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ScratchResult<()>;

    /// Allocate a fresh, uniquely named directory `root/<prefix>XXXXXX`.
    ///
    /// `root` is created if missing. The directory is not removed on drop.
    fn create_scratch_dir(&self, root: &Path, prefix: &str) -> ScratchResult<PathBuf>;

    /// Recursively copy the contents of `from` into the existing `to`.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> ScratchResult<()>;

    /// Raw contents; templates are not required to be UTF-8.
    fn read_file(&self, path: &Path) -> ScratchResult<Vec<u8>>;

    fn write_file(&self, path: &Path, content: &[u8]) -> ScratchResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ScratchResult<()>;

    /// Create `link` pointing at `target`, replacing an existing link.
    fn symlink(&self, target: &Path, link: &Path) -> ScratchResult<()>;

    /// Immediate children of `dir`.
    fn list_dir(&self, dir: &Path) -> ScratchResult<Vec<PathBuf>>;
}

/// Port for running shell command lines.
///
/// The command line is passed to the host shell verbatim, so `cd`, `&&`
/// and quoting follow POSIX `sh` rules.
pub trait ShellRunner: Send + Sync {
    /// Run `command_line` to completion, handing combined stdout/stderr to
    /// `on_output` as it arrives.
    ///
    /// Returns `Ok(true)` on a zero exit status. `Err` only when the shell
    /// itself could not be started.
    fn run(&self, command_line: &str, on_output: &mut dyn FnMut(&[u8])) -> ScratchResult<bool>;
}

/// Port for locating executables on the search path.
#[cfg_attr(test, mockall::automock)]
pub trait ExecutableResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<PathBuf>;
}

/// Port for the host's interactive surfaces.
///
/// A display surface shows the scratchpad's entry file; an output surface
/// shows build output and, after a successful build, the running binary.
pub trait Workbench: Send + Sync {
    /// Show `file` with the cursor at `cursor`.
    fn open_display(&self, file: &Path, cursor: CursorPosition) -> ScratchResult<DisplayHandle>;

    /// Turn on scratchpad-specific behaviour for the display surface.
    fn enter_scratchpad_mode(&self, display: DisplayHandle) -> ScratchResult<()>;

    /// Persist unsaved edits.
    fn save_display(&self, display: DisplayHandle) -> ScratchResult<()>;

    /// Flag the display as having no unsaved changes, so closing it does
    /// not prompt.
    fn mark_unmodified(&self, display: DisplayHandle) -> ScratchResult<()>;

    fn open_output(&self, title: &str) -> ScratchResult<OutputHandle>;

    /// Close an output surface. Closing an unknown handle is a no-op.
    fn close_output(&self, output: OutputHandle) -> ScratchResult<()>;

    fn is_output_live(&self, output: OutputHandle) -> bool;

    fn append_output(&self, output: OutputHandle, chunk: &[u8]) -> ScratchResult<()>;

    fn set_output_mode(&self, output: OutputHandle, mode: OutputMode) -> ScratchResult<()>;

    /// Type a command line into an output surface in terminal mode.
    fn send_input(&self, output: OutputHandle, command_line: &str) -> ScratchResult<()>;
}
