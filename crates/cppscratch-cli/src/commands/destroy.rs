//! `cppscratch destroy`: delete a scratchpad.

use tracing::instrument;

use crate::{cli::PathArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all)]
pub fn execute(args: PathArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let path = super::target_path(args.path)?;
    let (mut manager, _workbench) = super::build_manager(&config, &output)?;
    let pad = manager.attach(&path)?;
    super::register_hooks(&mut manager, &config.hooks, pad.path());

    let name = pad.name().to_string();
    manager.destroy_scratchpad(pad)?;

    output.success(&format!("Destroyed {name}"))?;
    Ok(())
}
