//! `cppscratch new`: create a scratchpad from the template.
//!
//! Prints the scratchpad path on stdout even with `--quiet`, so
//! `cd "$(cppscratch new -q)"` works.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    cli::{NewArgs, OutputFormat},
    config::AppConfig,
    editor,
    error::CliResult,
    output::OutputManager,
};

/// What `new --output-format json` prints.
#[derive(Debug, Serialize)]
struct Created {
    path: PathBuf,
    entry_file: PathBuf,
    line: usize,
    column: usize,
    build_tool: Option<String>,
}

#[instrument(skip_all, fields(edit = args.edit))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (mut manager, workbench) = super::build_manager(&config, &output)?;

    let spinner = output.spinner("Creating scratchpad...");
    let created = manager.create_scratchpad();
    spinner.finish_and_clear();
    let mut pad = created?;

    let cursor = pad.cursor();
    info!(path = %pad.path().display(), %cursor, "Scratchpad created");

    if output.format() == OutputFormat::Json {
        output.json(&Created {
            path: pad.path().to_path_buf(),
            entry_file: pad.entry_file().to_path_buf(),
            line: cursor.line,
            column: cursor.column,
            build_tool: manager.active_tool().map(|t| t.name.clone()),
        })?;
    } else {
        output.success(&format!("Created {}", pad.name()))?;
        output.info(&format!(
            "Cursor at {}:{}",
            pad.entry_file().display(),
            cursor
        ))?;
        if manager.active_tool().is_none() {
            output.warning("No build tool found on PATH; install meson or cmake to compile")?;
        }
        output.data(&pad.path().display().to_string())?;
    }

    if !args.edit {
        return Ok(());
    }

    editor::launch(pad.entry_file(), cursor)?;
    if args.run {
        super::register_hooks(&mut manager, &config.hooks, pad.path());
        super::compile::compile_and_report(&manager, &workbench, &mut pad, true, &output)?;
    }
    Ok(())
}
