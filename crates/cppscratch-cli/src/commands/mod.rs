//! Subcommand handlers and the wiring they share.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use cppscratch_adapters::{LocalFilesystem, PathResolver, PosixShell};
use cppscratch_core::{
    application::{ApplicationError, ScratchpadManager, ShellRunner, shell_quote},
    error::ScratchError,
};

use crate::{
    cli::OutputFormat,
    config::{AppConfig, HooksConfig},
    error::{CliError, CliResult},
    output::OutputManager,
    workbench::TerminalWorkbench,
};

pub mod completions;
pub mod compile;
pub mod config;
pub mod destroy;
pub mod init;
pub mod list;
pub mod new;
pub mod regen;
pub mod session;
pub mod tools;

/// Wire the manager to the real adapters.
///
/// The returned workbench shares state with the one the manager owns.
pub fn build_manager(
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<(ScratchpadManager, TerminalWorkbench)> {
    let settings = config.to_settings()?;
    // JSON output owns stdout.
    let stream = !output.is_quiet() && output.format() != OutputFormat::Json;
    let workbench = TerminalWorkbench::new(stream);
    let manager = ScratchpadManager::new(
        settings,
        &PathResolver::new(),
        Box::new(LocalFilesystem::new()),
        Box::new(PosixShell::new()),
        Box::new(workbench.clone()),
    )?;
    Ok((manager, workbench))
}

/// Register the configured hook commands for the scratchpad at `dir`.
pub fn register_hooks(manager: &mut ScratchpadManager, hooks: &HooksConfig, dir: &Path) {
    for command in &hooks.pre_compile {
        manager
            .pre_compile_hooks_mut()
            .register(shell_hook("pre_compile", dir, command));
    }
    for command in &hooks.pre_destroy {
        manager
            .pre_destroy_hooks_mut()
            .register(shell_hook("pre_destroy", dir, command));
    }
}

/// A hook that runs `command` in `dir`. Failures are logged, never raised.
fn shell_hook(kind: &'static str, dir: &Path, command: &str) -> impl Fn() + Send + Sync + 'static {
    let shell = PosixShell::new();
    let line = format!("cd {} && {}", shell_quote(dir), command);
    let command = command.to_string();

    move || {
        let result = shell.run(&line, &mut |chunk: &[u8]| {
            debug!(target: "cppscratch::hooks", "{}", String::from_utf8_lossy(chunk).trim_end());
        });
        match result {
            Ok(true) => debug!(hook = kind, %command, "Hook finished"),
            Ok(false) => warn!(hook = kind, %command, "Hook exited with failure"),
            Err(e) => warn!(hook = kind, %command, error = %e, "Hook could not run"),
        }
    }
}

/// Canonical form of the PATH argument, defaulting to the current directory.
pub fn target_path(path: Option<PathBuf>) -> CliResult<PathBuf> {
    let path = match path {
        Some(p) => p,
        None => std::env::current_dir()?,
    };
    std::fs::canonicalize(&path).map_err(|_| {
        CliError::Core(ScratchError::from(ApplicationError::NotInScratchpad { path }))
    })
}
