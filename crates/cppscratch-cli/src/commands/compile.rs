//! `cppscratch compile`: build a scratchpad and run it.

use console::Term;
use tracing::instrument;

use cppscratch_core::{application::ScratchpadManager, domain::ScratchpadInstance};

use crate::{
    cli::CompileArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    workbench::TerminalWorkbench,
};

#[instrument(skip_all)]
pub fn execute(args: CompileArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let path = super::target_path(args.target.path)?;
    let (mut manager, workbench) = super::build_manager(&config, &output)?;
    let mut pad = manager.attach(&path)?;
    super::register_hooks(&mut manager, &config.hooks, pad.path());

    compile_and_report(&manager, &workbench, &mut pad, !args.no_run, &output)
}

/// Compile `pad`, then summarise what happened.
///
/// A failing build becomes [`CliError::BuildFailed`]. Build output that
/// was not streamed is replayed on stderr first.
pub fn compile_and_report(
    manager: &ScratchpadManager,
    workbench: &TerminalWorkbench,
    pad: &mut ScratchpadInstance,
    run: bool,
    output: &OutputManager,
) -> CliResult<()> {
    output.header(&format!("Compiling {}", pad.name()))?;
    let report = manager.compile(pad, run)?;

    if !report.success {
        if !workbench.is_streaming() {
            Term::stderr().write_str(&workbench.transcript(report.output))?;
        }
        return Err(CliError::BuildFailed { tool: report.tool });
    }

    if !report.ran {
        output.success(&format!("Built with {}", report.tool))?;
        return Ok(());
    }

    match workbench.last_exit() {
        Some(0) => output.success("scratchpad exited with status 0")?,
        Some(code) => output.warning(&format!("scratchpad exited with status {code}"))?,
        None => output.warning("scratchpad was terminated by a signal")?,
    }
    Ok(())
}
