//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cppscratch",
    bin_name = "cppscratch",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Disposable C++ scratchpads",
    long_about = "cppscratch copies a template into a throwaway directory, \
                  generates build files with Meson or CMake, compiles it and \
                  runs the result.",
    after_help = "EXAMPLES:\n\
        \x20 cppscratch new --edit\n\
        \x20 cppscratch compile /tmp/cppscratch/scratchpad-a1b2c3\n\
        \x20 cppscratch destroy /tmp/cppscratch/scratchpad-a1b2c3\n\
        \x20 cppscratch session",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new scratchpad from the template.
    #[command(
        visible_alias = "n",
        about = "Create a scratchpad",
        after_help = "EXAMPLES:\n\
            \x20 cppscratch new\n\
            \x20 cppscratch new --edit\n\
            \x20 cppscratch new --template ~/templates/cpp20"
    )]
    New(NewArgs),

    /// Compile a scratchpad and run the binary.
    #[command(
        visible_alias = "c",
        about = "Compile (and run) a scratchpad",
        after_help = "EXAMPLES:\n\
            \x20 cppscratch compile            # scratchpad containing the current directory\n\
            \x20 cppscratch compile --no-run   # diagnostics only\n\
            \x20 cppscratch compile /tmp/cppscratch/scratchpad-a1b2c3"
    )]
    Compile(CompileArgs),

    /// Recreate the build directory.
    #[command(about = "Regenerate build files")]
    Regen(PathArgs),

    /// Delete a scratchpad and everything in it.
    #[command(visible_alias = "rm", about = "Destroy a scratchpad")]
    Destroy(PathArgs),

    /// Create a scratchpad and drive it interactively until you quit.
    #[command(about = "Interactive edit/compile/run loop")]
    Session(SessionArgs),

    /// List live scratchpads.
    #[command(
        visible_alias = "ls",
        about = "List scratchpads",
        after_help = "EXAMPLES:\n\
            \x20 cppscratch list\n\
            \x20 cppscratch list --format json"
    )]
    List(ListArgs),

    /// Show configured build tools and which one is active.
    #[command(about = "Show build tools")]
    Tools,

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 cppscratch init\n\
            \x20 cppscratch init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cppscratch completions bash > ~/.local/share/bash-completion/completions/cppscratch\n\
            \x20 cppscratch completions zsh  > ~/.zfunc/_cppscratch\n\
            \x20 cppscratch completions fish > ~/.config/fish/completions/cppscratch.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cppscratch config get scratchpad.marker\n\
            \x20 cppscratch config list\n\
            \x20 cppscratch config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Open the entry file in `$VISUAL` / `$EDITOR` at the cursor.
    #[arg(short = 'e', long = "edit", help = "Open the entry file in your editor")]
    pub edit: bool,

    /// Compile (and run) once the editor exits.
    #[arg(long = "run", requires = "edit", help = "Compile and run after editing")]
    pub run: bool,
}

// ── compile ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompileArgs {
    #[command(flatten)]
    pub target: PathArgs,

    /// Stop after compiling; leave the output as diagnostics.
    #[arg(long = "no-run", help = "Compile without running")]
    pub no_run: bool,
}

/// A scratchpad path; any path inside the scratchpad works.
#[derive(Debug, Args)]
pub struct PathArgs {
    #[arg(
        value_name = "PATH",
        help = "Scratchpad directory (default: current directory)"
    )]
    pub path: Option<PathBuf>,
}

// ── session ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Keep the scratchpad on disk when the session ends.
    #[arg(long = "keep", help = "Do not destroy the scratchpad on quit")]
    pub keep: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One path per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,

    /// Also create the template directory with a starter `main.cpp`.
    #[arg(long = "with-template", help = "Create a starter template")]
    pub with_template: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `scratchpad.root`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path to the configuration file.
    Path,
}
