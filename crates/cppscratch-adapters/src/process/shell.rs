//! `sh -c` runner that streams combined output back to the caller.

use std::ffi::OsString;
use std::io::Read;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use cppscratch_core::{
    application::{ApplicationError, ports::ShellRunner},
    error::ScratchResult,
};

const CHUNK_SIZE: usize = 4096;

/// Runs command lines through a POSIX shell.
///
/// Stderr is folded into stdout by the shell itself so the caller sees
/// both streams interleaved in the order they were written.
#[derive(Debug, Clone)]
pub struct PosixShell {
    program: OsString,
}

impl PosixShell {
    pub fn new() -> Self {
        Self::with_program("sh")
    }

    /// Use a different shell binary, e.g. `/bin/dash`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PosixShell {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellRunner for PosixShell {
    #[instrument(skip_all, fields(command = %command_line))]
    fn run(&self, command_line: &str, on_output: &mut dyn FnMut(&[u8])) -> ScratchResult<bool> {
        let failed = |reason: String| ApplicationError::CommandFailed {
            command: command_line.to_string(),
            reason,
        };

        let mut child = Command::new(&self.program)
            .arg("-c")
            .arg(format!("exec 2>&1\n{command_line}"))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("could not start {:?}: {e}", self.program)))?;

        if let Some(mut stdout) = child.stdout.take() {
            let mut buf = [0u8; CHUNK_SIZE];
            loop {
                match stdout.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => on_output(&buf[..n]),
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        debug!(error = %e, "output stream closed early");
                        break;
                    }
                }
            }
        }

        let status = child
            .wait()
            .map_err(|e| failed(format!("could not wait for shell: {e}")))?;
        debug!(status = %status, "command finished");
        Ok(status.success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cppscratch_core::error::ScratchError;

    fn capture(shell: &PosixShell, line: &str) -> (ScratchResult<bool>, String) {
        let mut out = Vec::new();
        let result = shell.run(line, &mut |chunk: &[u8]| out.extend_from_slice(chunk));
        (result, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn reports_success_and_streams_stdout() {
        let (result, out) = capture(&PosixShell::new(), "echo hello");
        assert!(result.unwrap());
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn stderr_is_merged_into_output() {
        let (result, out) = capture(&PosixShell::new(), "echo oops >&2; echo done");
        assert!(result.unwrap());
        assert!(out.contains("oops"));
        assert!(out.contains("done"));
    }

    #[test]
    fn nonzero_exit_is_ok_false() {
        let (result, out) = capture(&PosixShell::new(), "echo failing; exit 3");
        assert!(!result.unwrap());
        assert_eq!(out, "failing\n");
    }

    #[test]
    fn cd_and_chain_work() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();
        let line = format!(
            "cd {} && ls",
            cppscratch_core::application::shell_quote(dir.path())
        );

        let (result, out) = capture(&PosixShell::new(), &line);

        assert!(result.unwrap());
        assert!(out.contains("marker.txt"));
    }

    #[test]
    fn missing_shell_is_command_failed() {
        let shell = PosixShell::with_program("/nonexistent/shell-binary");
        let (result, _) = capture(&shell, "true");
        assert!(matches!(
            result,
            Err(ScratchError::Application(ApplicationError::CommandFailed { .. }))
        ));
    }
}
