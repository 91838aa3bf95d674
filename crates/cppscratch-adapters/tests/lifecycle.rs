//! The scratchpad lifecycle against the real filesystem and shell.

#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use cppscratch_adapters::{LocalFilesystem, PathResolver, PosixShell};
use cppscratch_core::prelude::*;
use tempfile::TempDir;

/// Workbench that keeps build output and the last run command.
#[derive(Default)]
struct Captured {
    text: Mutex<String>,
    ran: Mutex<Vec<String>>,
}

impl Workbench for &'static Captured {
    fn open_display(
        &self,
        _file: &Path,
        _cursor: CursorPosition,
    ) -> ScratchResult<DisplayHandle> {
        Ok(DisplayHandle::new())
    }
    fn enter_scratchpad_mode(&self, _display: DisplayHandle) -> ScratchResult<()> {
        Ok(())
    }
    fn save_display(&self, _display: DisplayHandle) -> ScratchResult<()> {
        Ok(())
    }
    fn mark_unmodified(&self, _display: DisplayHandle) -> ScratchResult<()> {
        Ok(())
    }
    fn open_output(&self, _title: &str) -> ScratchResult<OutputHandle> {
        Ok(OutputHandle::new())
    }
    fn close_output(&self, _output: OutputHandle) -> ScratchResult<()> {
        Ok(())
    }
    fn is_output_live(&self, _output: OutputHandle) -> bool {
        true
    }
    fn append_output(&self, _output: OutputHandle, chunk: &[u8]) -> ScratchResult<()> {
        self.text
            .lock()
            .unwrap()
            .push_str(&String::from_utf8_lossy(chunk));
        Ok(())
    }
    fn set_output_mode(&self, _output: OutputHandle, _mode: OutputMode) -> ScratchResult<()> {
        Ok(())
    }
    fn send_input(&self, _output: OutputHandle, command_line: &str) -> ScratchResult<()> {
        self.ran.lock().unwrap().push(command_line.to_string());
        Ok(())
    }
}

fn sh_tool() -> BuildToolDescriptor {
    BuildToolDescriptor::new(
        "sh",
        "mkdir builddir && touch builddir/sh.sig && echo generated",
        "echo compiling && touch builddir/scratchpad",
        "sh.sig",
    )
}

fn setup(tool: BuildToolDescriptor) -> (TempDir, ScratchpadManager, &'static Captured) {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("template");
    fs::create_dir_all(template.join("src")).unwrap();
    fs::write(template.join("main.cpp"), "int main() { $ }\n").unwrap();
    fs::write(template.join("src/util.hpp"), "#pragma once\n").unwrap();

    let root = dir.path().join("pads");
    let settings = ScratchpadSettings::new(&root, &template)
        .with_build_tools(BuildToolRegistry::new(vec![tool]));

    let workbench: &'static Captured = Box::leak(Box::default());
    let manager = ScratchpadManager::new(
        settings,
        &PathResolver::new(),
        Box::new(LocalFilesystem::new()),
        Box::new(PosixShell::new()),
        Box::new(workbench),
    )
    .unwrap();
    (dir, manager, workbench)
}

#[test]
fn create_compile_destroy() {
    let (dir, manager, workbench) = setup(sh_tool());

    let mut pad = manager.create_scratchpad().unwrap();
    assert!(pad.path().starts_with(dir.path().join("pads")));
    assert_eq!(
        fs::read_to_string(pad.entry_file()).unwrap(),
        "int main() {  }\n"
    );
    assert!(pad.path().join("src/util.hpp").exists());
    assert!(pad.path().join("builddir/sh.sig").exists());
    assert!(
        fs::symlink_metadata(pad.path().join("compile_commands.json"))
            .unwrap()
            .file_type()
            .is_symlink()
    );

    let report = manager.compile(&mut pad, true).unwrap();
    assert!(report.success);
    assert!(report.ran);
    assert!(workbench.text.lock().unwrap().contains("compiling"));
    assert!(
        workbench.ran.lock().unwrap()[0].ends_with("builddir' && ./scratchpad")
    );

    assert_eq!(manager.list_scratchpads().unwrap(), vec![pad.path().to_path_buf()]);

    let path = pad.path().to_path_buf();
    manager.destroy_scratchpad(pad).unwrap();
    assert!(!path.exists());
}

#[test]
fn failing_compile_is_reported_not_raised() {
    let mut tool = sh_tool();
    tool.compile_command = "echo 'main.cpp:1: error' >&2; exit 1".into();
    let (_dir, manager, workbench) = setup(tool);

    let mut pad = manager.create_scratchpad().unwrap();
    let report = manager.compile(&mut pad, true).unwrap();

    assert!(!report.success);
    assert!(!report.ran);
    assert!(workbench.text.lock().unwrap().contains("main.cpp:1: error"));
    assert!(workbench.ran.lock().unwrap().is_empty());
}

#[test]
fn attach_finds_scratchpad_from_build_dir() {
    let (_dir, manager, _workbench) = setup(sh_tool());
    let pad = manager.create_scratchpad().unwrap();

    let attached = manager.attach(&pad.path().join("builddir")).unwrap();

    assert_eq!(attached.path(), pad.path());
    assert_eq!(attached.entry_file(), pad.entry_file());
}

#[test]
fn missing_tool_leaves_pad_without_build_dir() {
    let tool = BuildToolDescriptor::new("cppscratch-no-such-tool", "true", "true", "x");
    let (_dir, manager, _workbench) = setup(tool);

    let mut pad = manager.create_scratchpad().unwrap();
    assert!(manager.active_tool().is_none());
    assert!(!pad.path().join("builddir").exists());

    let err = manager.compile(&mut pad, false).unwrap_err();
    assert!(err.to_string().contains("No build tool found"));
}

#[test]
fn non_utf8_entry_file_keeps_its_bytes() {
    let (dir, manager, _workbench) = setup(sh_tool());
    fs::write(
        dir.path().join("template/main.cpp"),
        b"// caf\xe9\nint main() { $ }\n",
    )
    .unwrap();

    let pad = manager.create_scratchpad().unwrap();

    assert_eq!(
        fs::read(pad.entry_file()).unwrap(),
        b"// caf\xe9\nint main() {  }\n"
    );
    assert_eq!(pad.cursor().line, 2);
    assert_eq!(pad.cursor().column, 14);
}
