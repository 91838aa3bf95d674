//! Launching the user's editor on the display surface's file.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use cppscratch_core::domain::CursorPosition;

use crate::error::{CliError, CliResult};

const FALLBACK_EDITOR: &str = "vi";

/// Open `file` in `$VISUAL`, `$EDITOR`, or `vi`, and wait for it to exit.
pub fn launch(file: &Path, cursor: CursorPosition) -> CliResult<()> {
    let editor = std::env::var("VISUAL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| std::env::var("EDITOR").ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string());

    let mut command = editor_command(&editor, file, cursor);
    debug!(?command, "Launching editor");

    let status = command.status().map_err(|e| CliError::ExternalCommandFailed {
        command: editor.clone(),
        source: Some(Box::new(e)),
    })?;
    if !status.success() {
        return Err(CliError::ExternalCommandFailed {
            command: format!("{editor} ({status})"),
            source: None,
        });
    }
    Ok(())
}

/// `editor` may carry its own flags, e.g. `code --wait`.
fn editor_command(editor: &str, file: &Path, cursor: CursorPosition) -> Command {
    let mut parts = editor.split_whitespace();
    let mut command = Command::new(parts.next().unwrap_or(FALLBACK_EDITOR));
    command.args(parts);
    // `+N` is understood by vi, vim, nano, emacs, and kakoune.
    if cursor.line > 0 {
        command.arg(format!("+{}", cursor.line));
    }
    command.arg(file);
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn args(command: &Command) -> Vec<&OsStr> {
        command.get_args().collect()
    }

    #[test]
    fn jumps_to_cursor_line() {
        let cursor = CursorPosition {
            offset: 40,
            line: 4,
            column: 5,
        };
        let cmd = editor_command("vim", Path::new("/p/main.cpp"), cursor);
        assert_eq!(cmd.get_program(), "vim");
        assert_eq!(args(&cmd), ["+4", "/p/main.cpp"]);
    }

    #[test]
    fn keeps_editor_flags() {
        let cmd = editor_command("code --wait", Path::new("main.cpp"), CursorPosition::default());
        assert_eq!(cmd.get_program(), "code");
        assert_eq!(args(&cmd), ["--wait", "main.cpp"]);
    }
}
