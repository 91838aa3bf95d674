//! Flags accepted by every subcommand.
//!
//! Flattened into [`super::Cli`]; the path overrides here sit above the
//! config file and environment in the resolution order.

use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO (`-v`), twice for DEBUG (`-vv`), three times for
    /// TRACE (`-vvv`). Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Only warnings and errors
    -v      - Info level (tool selection, lifecycle)
    -vv     - Debug level (commands, build file generation output)
    -vvv    - Trace level (every file copied)"
    )]
    pub verbose: u8,

    /// Suppress all non-error output, including streamed build output.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes. Honours `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Directory scratchpads are created under.
    #[arg(
        long = "root",
        global = true,
        value_name = "DIR",
        help = "Override the scratch root directory"
    )]
    pub root: Option<PathBuf>,

    /// Template copied into every new scratchpad.
    #[arg(
        short = 't',
        long = "template",
        global = true,
        value_name = "DIR",
        help = "Override the template directory"
    )]
    pub template: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI renders its own messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    Human,
    Plain,
    /// Machine-readable results on stdout.
    Json,
}

#[cfg(test)]
impl GlobalArgs {
    /// Quiet, colourless args for unit tests.
    pub fn for_tests() -> Self {
        Self {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            root: None,
            template: None,
            output_format: OutputFormat::Plain,
        }
    }
}
