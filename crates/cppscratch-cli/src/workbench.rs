//! Terminal-backed [`Workbench`].
//!
//! The display surface is the entry file on disk, edited with whatever
//! editor the user launches. The output surface is this process's stdout:
//! build output is streamed to it, and terminal mode runs the binary with
//! the user's terminal attached.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use console::Term;
use tracing::{debug, info, warn};

use cppscratch_core::{
    application::{ApplicationError, ports::Workbench},
    domain::{CursorPosition, DisplayHandle, OutputHandle, OutputMode},
    error::ScratchResult,
};

#[derive(Debug)]
struct Display {
    file: PathBuf,
    scratchpad_mode: bool,
}

#[derive(Debug)]
struct Output {
    mode: OutputMode,
    transcript: Vec<u8>,
    live: bool,
}

#[derive(Debug, Default)]
struct State {
    displays: HashMap<DisplayHandle, Display>,
    outputs: HashMap<OutputHandle, Output>,
    last_exit: Option<i32>,
}

/// Workbench that talks to the user's terminal.
///
/// Clones share state, so the CLI keeps one to read transcripts and exit
/// codes after handing another to the manager.
#[derive(Debug, Clone)]
pub struct TerminalWorkbench {
    state: Arc<Mutex<State>>,
    /// Echo build output as it arrives.
    stream: bool,
    shell: OsString,
}

impl TerminalWorkbench {
    pub fn new(stream: bool) -> Self {
        Self {
            state: Arc::default(),
            stream,
            shell: OsString::from("sh"),
        }
    }

    /// Everything appended to `output` so far.
    pub fn transcript(&self, output: OutputHandle) -> String {
        self.lock()
            .outputs
            .get(&output)
            .map(|o| String::from_utf8_lossy(&o.transcript).into_owned())
            .unwrap_or_default()
    }

    pub fn mode(&self, output: OutputHandle) -> Option<OutputMode> {
        self.lock().outputs.get(&output).map(|o| o.mode)
    }

    /// Exit code of the last program run in terminal mode.
    ///
    /// `None` if nothing ran or it was killed by a signal.
    pub fn last_exit(&self) -> Option<i32> {
        self.lock().last_exit
    }

    /// Whether build output is echoed as it arrives.
    pub fn is_streaming(&self) -> bool {
        self.stream
    }

    /// Number of displays still open.
    pub fn open_displays(&self) -> usize {
        self.lock().displays.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn echo(&self, text: &str) {
        if !self.stream {
            return;
        }
        if let Err(e) = Term::stdout().write_str(text) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

fn unknown_output(output: OutputHandle) -> ApplicationError {
    ApplicationError::Surface {
        reason: format!("unknown output surface {output}"),
    }
}

impl Workbench for TerminalWorkbench {
    fn open_display(&self, file: &Path, cursor: CursorPosition) -> ScratchResult<DisplayHandle> {
        let handle = DisplayHandle::new();
        debug!(file = %file.display(), %cursor, "Display opened");
        self.lock().displays.insert(
            handle,
            Display {
                file: file.to_path_buf(),
                scratchpad_mode: false,
            },
        );
        Ok(handle)
    }

    fn enter_scratchpad_mode(&self, display: DisplayHandle) -> ScratchResult<()> {
        if let Some(d) = self.lock().displays.get_mut(&display) {
            d.scratchpad_mode = true;
            debug!(file = %d.file.display(), "Scratchpad mode on");
        }
        Ok(())
    }

    /// Edits live on disk as soon as the editor writes them.
    fn save_display(&self, display: DisplayHandle) -> ScratchResult<()> {
        let handle = display;
        debug!(display = ?handle, "Display already persisted");
        Ok(())
    }

    fn mark_unmodified(&self, display: DisplayHandle) -> ScratchResult<()> {
        if let Some(d) = self.lock().displays.remove(&display) {
            debug!(file = %d.file.display(), scratchpad_mode = d.scratchpad_mode, "Display released");
        }
        Ok(())
    }

    fn open_output(&self, title: &str) -> ScratchResult<OutputHandle> {
        let handle = OutputHandle::new();
        self.lock().outputs.insert(
            handle,
            Output {
                mode: OutputMode::Diagnostics,
                transcript: Vec::new(),
                live: true,
            },
        );
        debug!(%handle, title, "Output opened");
        Ok(handle)
    }

    fn close_output(&self, output: OutputHandle) -> ScratchResult<()> {
        if let Some(o) = self.lock().outputs.get_mut(&output) {
            o.live = false;
        }
        debug!(%output, "Output closed");
        Ok(())
    }

    fn is_output_live(&self, output: OutputHandle) -> bool {
        self.lock().outputs.get(&output).is_some_and(|o| o.live)
    }

    fn append_output(&self, output: OutputHandle, chunk: &[u8]) -> ScratchResult<()> {
        self.lock()
            .outputs
            .get_mut(&output)
            .ok_or_else(|| unknown_output(output))?
            .transcript
            .extend_from_slice(chunk);
        self.echo(&String::from_utf8_lossy(chunk));
        Ok(())
    }

    fn set_output_mode(&self, output: OutputHandle, mode: OutputMode) -> ScratchResult<()> {
        self.lock()
            .outputs
            .get_mut(&output)
            .ok_or_else(|| unknown_output(output))?
            .mode = mode;
        debug!(%output, %mode, "Output mode");
        Ok(())
    }

    /// Run `command_line` with the terminal attached and wait for it.
    fn send_input(&self, output: OutputHandle, command_line: &str) -> ScratchResult<()> {
        if self.mode(output) != Some(OutputMode::Terminal) {
            return Err(ApplicationError::Surface {
                reason: format!("{output} is not in terminal mode"),
            }
            .into());
        }

        info!(command = %command_line, "Running scratchpad");
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command_line)
            .status()
            .map_err(|e| ApplicationError::Surface {
                reason: format!("could not start {command_line:?}: {e}"),
            })?;

        debug!(%status, "Scratchpad exited");
        self.lock().last_exit = status.code();
        Ok(())
    }
}
