//! # cppscratch CLI
//!
//! Disposable C++ scratchpads: copy a template, build it with Meson or
//! CMake, run it, throw it away.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Load configuration (defaults + file + env), then apply CLI overrides.
//! 3. Initialise the tracing subscriber (and the optional log file).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |
//! |  5   | Build failed            |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod editor;
mod error;
mod logging;
mod output;
mod workbench;

fn main() -> ExitCode {
    // Missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and must exit 0.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Load configuration ─────────────────────────────────────────────
    // `init` is what creates the file.
    let creating = matches!(cli.command, Commands::Init(_));
    let loaded = AppConfig::load(cli.global.config.as_ref(), creating);
    let log_file = loaded.as_ref().ok().and_then(|c| c.logging.file.clone());

    // ── 3. Initialise tracing ─────────────────────────────────────────────
    let _log_guard = match init_logging(&cli.global, log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let mut config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(e, &cli.global),
    };
    config.apply_overrides(&cli.global);

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    let global = cli.global;
    match run(cli.command, &global, config, output) {
        Ok(()) => {
            debug!("cppscratch completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, &global),
    }
}

#[instrument(skip_all)]
fn run(
    command: Commands,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match command {
        Commands::New(args) => commands::new::execute(args, config, output),
        Commands::Compile(args) => commands::compile::execute(args, config, output),
        Commands::Regen(args) => commands::regen::execute(args, config, output),
        Commands::Destroy(args) => commands::destroy::execute(args, config, output),
        Commands::Session(args) => commands::session::execute(args, config, output),
        Commands::List(args) => commands::list::execute(args, config, output),
        Commands::Tools => commands::tools::execute(config, output),
        Commands::Init(args) => {
            commands::init::execute(args, global.config.clone(), config, output)
        }
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => {
            commands::config::execute(cmd, global.config.clone(), config, output)
        }
    }
}

/// The single place where structured errors become human-readable output
/// and OS exit codes.
fn handle_error(err: CliError, global: &GlobalArgs) -> ExitCode {
    err.log();

    let verbose = global.verbose > 0;
    let msg = if !global.no_color && std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}
