//! `cppscratch tools`: the build tool registry as seen from this machine.

use std::path::PathBuf;

use serde::Serialize;

use cppscratch_adapters::PathResolver;
use cppscratch_core::application::{ExecutableResolver, select_build_tool};

use crate::{
    cli::OutputFormat, config::AppConfig, error::CliResult, output::OutputManager,
};

#[derive(Debug, Serialize)]
struct ToolStatus {
    name: String,
    path: Option<PathBuf>,
    active: bool,
    builddir_gen_command: String,
    compile_command: String,
}

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let settings = config.to_settings()?;
    let resolver = PathResolver::new();
    let active = select_build_tool(&settings.build_tools, &resolver).map(|t| t.name.clone());

    let tools: Vec<ToolStatus> = settings
        .build_tools
        .iter()
        .map(|tool| ToolStatus {
            name: tool.name.clone(),
            path: resolver.resolve(&tool.name),
            active: active.as_deref() == Some(tool.name.as_str()),
            builddir_gen_command: tool.builddir_gen_command.clone(),
            compile_command: tool.compile_command.clone(),
        })
        .collect();

    if output.format() == OutputFormat::Json {
        output.json(&tools)?;
        return Ok(());
    }

    output.header("Build tools (priority order):")?;
    for tool in &tools {
        let location = tool
            .path
            .as_ref()
            .map_or_else(|| "not found".to_string(), |p| p.display().to_string());
        let marker = if tool.active { " (active)" } else { "" };
        output.print(&format!("  {:<8} {}{}", tool.name, location, marker))?;
    }
    if active.is_none() {
        output.warning("No build tool found on PATH")?;
    }
    Ok(())
}
