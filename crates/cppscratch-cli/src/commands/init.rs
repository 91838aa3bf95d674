//! `cppscratch init`: write a default configuration file and, optionally,
//! a starter template.

use std::path::{Path, PathBuf};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

const MESON_BUILD: &str = "\
project('scratchpad', 'cpp', default_options : ['cpp_std=c++20', 'warning_level=3'])
executable('scratchpad', 'main.cpp')
";

const CMAKE_LISTS: &str = "\
cmake_minimum_required(VERSION 3.16)
project(scratchpad CXX)
set(CMAKE_CXX_STANDARD 20)
set(CMAKE_CXX_STANDARD_REQUIRED ON)
add_executable(scratchpad main.cpp)
";

pub fn execute(
    args: InitArgs,
    config_file: Option<PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let config_path = config_file.unwrap_or_else(AppConfig::config_path);

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display(),
        ))?;
    } else {
        let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| {
            CliError::ConfigError {
                message: format!("Failed to serialise default config: {e}"),
                source: Some(Box::new(e)),
            }
        })?;
        write_file(&config_path, &toml)?;
        output.success(&format!("Configuration created at {}", config_path.display()))?;
    }

    if args.with_template {
        write_template(&config, args.force, &output)?;
    }
    Ok(())
}

fn write_template(config: &AppConfig, force: bool, output: &OutputManager) -> CliResult<()> {
    let dir = &config.scratchpad.template_dir;
    let main = starter_main(&config.scratchpad.marker);
    let files = [
        (config.scratchpad.entry_file.as_path(), main.as_str()),
        (Path::new("meson.build"), MESON_BUILD),
        (Path::new("CMakeLists.txt"), CMAKE_LISTS),
    ];

    for (name, contents) in files {
        let path = dir.join(name);
        if path.exists() && !force {
            output.warning(&format!("Keeping existing {}", path.display()))?;
            continue;
        }
        write_file(&path, contents)?;
    }
    output.success(&format!("Template ready at {}", dir.display()))?;
    Ok(())
}

/// Entry file with `marker` where the cursor should land.
fn starter_main(marker: &str) -> String {
    format!("#include <iostream>\n\nint main() {{\n    {marker}\n    return 0;\n}}\n")
}

fn write_file(path: &Path, contents: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CliError::IoError {
            message: format!("Failed to create directory '{}'", parent.display()),
            source: e,
        })?;
    }
    std::fs::write(path, contents).map_err(|e| CliError::IoError {
        message: format!("Failed to write '{}'", path.display()),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cppscratch_core::domain::take_marker;

    #[test]
    fn starter_main_has_exactly_one_marker() {
        let text = starter_main("$");
        assert_eq!(text.matches('$').count(), 1);

        let marked = take_marker(text.as_bytes(), '$', Path::new("main.cpp")).unwrap();
        assert_eq!(marked.cursor.line, 4);
        assert_eq!(marked.cursor.column, 5);
    }

    #[test]
    fn build_files_name_the_scratchpad_binary() {
        assert!(MESON_BUILD.contains("executable('scratchpad'"));
        assert!(CMAKE_LISTS.contains("add_executable(scratchpad"));
    }
}
