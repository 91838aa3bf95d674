//! `cppscratch regen`: recreate `builddir`.

use crate::{
    cli::PathArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: PathArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let path = super::target_path(args.path)?;
    let (manager, _workbench) = super::build_manager(&config, &output)?;
    let pad = manager.attach(&path)?;

    let Some(tool) = manager.active_tool().map(|t| t.name.clone()) else {
        output.warning("No build tool found on PATH; nothing to regenerate")?;
        return Ok(());
    };

    let spinner = output.spinner(&format!("Generating build files with {tool}..."));
    let generated = manager.regenerate_build_files(&pad);
    spinner.finish_and_clear();

    if !generated? {
        return Err(CliError::BuildFailed { tool });
    }
    output.success(&format!("Build files regenerated with {tool}"))?;
    Ok(())
}
