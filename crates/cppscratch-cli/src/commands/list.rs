//! `cppscratch list`: live scratchpads under the scratch root.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use cppscratch_core::domain::BuildToolRegistry;

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Row {
    name: String,
    path: PathBuf,
    modified: Option<DateTime<Local>>,
    /// Tool whose build files are in `builddir`, if any.
    build_tool: Option<String>,
}

impl Row {
    fn new(path: PathBuf, tools: &BuildToolRegistry) -> Self {
        Self {
            build_tool: tools
                .detect_generator(&path, Path::exists)
                .map(|t| t.name.clone()),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            modified: modified(&path),
            path,
        }
    }
}

fn modified(path: &Path) -> Option<DateTime<Local>> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Local>::from)
}

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (manager, _workbench) = super::build_manager(&config, &output)?;
    let rows: Vec<Row> = manager
        .list_scratchpads()?
        .into_iter()
        .map(|path| Row::new(path, &manager.settings().build_tools))
        .collect();

    match args.format {
        ListFormat::Table => {
            if rows.is_empty() {
                output.info(&format!(
                    "No scratchpads under {}",
                    manager.settings().scratch_root.display()
                ))?;
                return Ok(());
            }
            output.header("Scratchpads:")?;
            for row in &rows {
                let when = row
                    .modified
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".into());
                let tool = row.build_tool.as_deref().unwrap_or("-");
                output.print(&format!(
                    "  {:<22} {}  {:<6} {}",
                    row.name,
                    when,
                    tool,
                    row.path.display()
                ))?;
            }
        }
        ListFormat::List => {
            for row in &rows {
                output.data(&row.path.display().to_string())?;
            }
        }
        ListFormat::Json => output.json(&rows)?,
    }

    Ok(())
}
