//! `cppscratch session`: one scratchpad, driven from a menu until you quit.
//!
//! Quitting closes the display surface, which destroys the scratchpad
//! unless `--keep` was given.

use crate::{cli::SessionArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[cfg(feature = "interactive")]
pub fn execute(args: SessionArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    use dialoguer::{Select, theme::ColorfulTheme};
    use tracing::info;

    use crate::{editor, error::CliError};

    const ACTIONS: [&str; 5] = [
        "Edit",
        "Compile & run",
        "Compile only",
        "Regenerate build files",
        "Quit",
    ];

    let (mut manager, workbench) = super::build_manager(&config, &output)?;
    let mut pad = manager.create_scratchpad()?;
    super::register_hooks(&mut manager, &config.hooks, pad.path());

    output.success(&format!("Session started in {}", pad.path().display()))?;
    let theme = ColorfulTheme::default();

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt(pad.name())
            .items(&ACTIONS)
            .default(1)
            .interact_opt()
            .map_err(|e| CliError::ExternalCommandFailed {
                command: "menu".into(),
                source: Some(Box::new(e)),
            })?;

        let result = match choice {
            Some(0) => editor::launch(pad.entry_file(), pad.cursor()),
            Some(1) => super::compile::compile_and_report(&manager, &workbench, &mut pad, true, &output),
            Some(2) => super::compile::compile_and_report(&manager, &workbench, &mut pad, false, &output),
            Some(3) => manager
                .regenerate_build_files(&pad)
                .map(|_| ())
                .map_err(CliError::from),
            _ => break,
        };

        // A failed step leaves the scratchpad usable; report and keep going.
        if let Err(e) = result {
            e.log();
            output.error(&e.to_string())?;
        }
    }

    if args.keep {
        info!(path = %pad.path().display(), "Session ended, scratchpad kept");
        output.info(&format!("Kept {}", pad.path().display()))?;
        return Ok(());
    }

    let name = pad.name().to_string();
    manager.destroy_scratchpad(pad)?;
    output.success(&format!("Destroyed {name}"))?;
    Ok(())
}

#[cfg(not(feature = "interactive"))]
pub fn execute(_args: SessionArgs, _config: AppConfig, _output: OutputManager) -> CliResult<()> {
    Err(crate::error::CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
