//! In-crate fakes for the driven ports, used by the service tests.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::{
    ApplicationError,
    ports::{Filesystem, ShellRunner, Workbench},
};
use crate::domain::{CursorPosition, DisplayHandle, OutputHandle, OutputMode};
use crate::error::ScratchResult;

// ── Filesystem ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct FsInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    links: BTreeMap<PathBuf, PathBuf>,
    writes: usize,
    next_scratch: u32,
}

/// In-memory filesystem. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    inner: Arc<Mutex<FsInner>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (and its parents) without counting it as a write.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let mut inner = self.inner.lock().unwrap();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            inner.dirs.insert(ancestor.to_path_buf());
        }
        inner.files.insert(path.to_path_buf(), content.as_ref().to_vec());
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.lock().unwrap();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            inner.dirs.insert(ancestor.to_path_buf());
        }
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.bytes(path)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    pub fn bytes(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.inner.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    pub fn link_target(&self, link: impl AsRef<Path>) -> Option<PathBuf> {
        self.inner.lock().unwrap().links.get(link.as_ref()).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.inner.lock().unwrap().writes
    }

    fn exists_locked(inner: &FsInner, path: &Path) -> bool {
        if inner.files.contains_key(path) || inner.dirs.contains(path) {
            return true;
        }
        match inner.links.get(path) {
            Some(target) => {
                let resolved = path.parent().map_or(target.clone(), |p| p.join(target));
                inner.files.contains_key(&resolved) || inner.dirs.contains(&resolved)
            }
            None => false,
        }
    }
}

fn missing(path: &Path) -> crate::error::ScratchError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file or directory".into(),
    }
    .into()
}

impl Filesystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        Self::exists_locked(&self.inner.lock().unwrap(), path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.lock().unwrap().dirs.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> ScratchResult<()> {
        self.add_dir(path);
        self.inner.lock().unwrap().writes += 1;
        Ok(())
    }

    fn create_scratch_dir(&self, root: &Path, prefix: &str) -> ScratchResult<PathBuf> {
        let dir = {
            let mut inner = self.inner.lock().unwrap();
            inner.next_scratch += 1;
            inner.writes += 1;
            root.join(format!("{prefix}{:06}", inner.next_scratch))
        };
        self.add_dir(&dir);
        Ok(dir)
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> ScratchResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.dirs.contains(from) {
            return Err(missing(from));
        }
        let dirs: Vec<PathBuf> = inner
            .dirs
            .iter()
            .filter_map(|d| d.strip_prefix(from).ok())
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(|rel| to.join(rel))
            .collect();
        let files: Vec<(PathBuf, Vec<u8>)> = inner
            .files
            .iter()
            .filter_map(|(p, c)| p.strip_prefix(from).ok().map(|rel| (to.join(rel), c.clone())))
            .collect();
        inner.dirs.extend(dirs);
        inner.files.extend(files);
        inner.writes += 1;
        Ok(())
    }

    fn read_file(&self, path: &Path) -> ScratchResult<Vec<u8>> {
        self.bytes(path).ok_or_else(|| missing(path))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> ScratchResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.files.insert(path.to_path_buf(), content.to_vec());
        inner.writes += 1;
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> ScratchResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.dirs.contains(path) {
            return Err(missing(path));
        }
        inner.dirs.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.links.retain(|p, _| !p.starts_with(path));
        inner.writes += 1;
        Ok(())
    }

    fn symlink(&self, target: &Path, link: &Path) -> ScratchResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.links.insert(link.to_path_buf(), target.to_path_buf());
        inner.writes += 1;
        Ok(())
    }

    fn list_dir(&self, dir: &Path) -> ScratchResult<Vec<PathBuf>> {
        let inner = self.inner.lock().unwrap();
        if !inner.dirs.contains(dir) {
            return Err(missing(dir));
        }
        let children = inner
            .dirs
            .iter()
            .chain(inner.files.keys())
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect();
        Ok(children)
    }
}

// ── Shell ─────────────────────────────────────────────────────────────────────

type Effect = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct ShellInner {
    commands: Vec<String>,
    failing: Vec<String>,
    effects: Vec<(String, Effect)>,
}

/// Shell that records command lines instead of running them.
///
/// Every command succeeds and prints one line unless it contains a
/// substring registered with [`FakeShell::failing_on`].
#[derive(Clone, Default)]
pub struct FakeShell {
    inner: Arc<Mutex<ShellInner>>,
}

impl FakeShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(self, needle: &str) -> Self {
        self.inner.lock().unwrap().failing.push(needle.to_string());
        self
    }

    /// Run `effect` whenever a command containing `needle` executes.
    pub fn with_effect<F>(self, needle: &str, effect: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner
            .lock()
            .unwrap()
            .effects
            .push((needle.to_string(), Box::new(effect)));
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.inner.lock().unwrap().commands.clone()
    }
}

impl ShellRunner for FakeShell {
    fn run(&self, command_line: &str, on_output: &mut dyn FnMut(&[u8])) -> ScratchResult<bool> {
        let ok = {
            let mut inner = self.inner.lock().unwrap();
            inner.commands.push(command_line.to_string());
            for (needle, effect) in &inner.effects {
                if command_line.contains(needle.as_str()) {
                    effect();
                }
            }
            !inner.failing.iter().any(|n| command_line.contains(n.as_str()))
        };

        on_output(format!("$ {command_line}\n").as_bytes());
        Ok(ok)
    }
}

// ── Workbench ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct WorkbenchInner {
    events: Vec<String>,
    live: HashSet<OutputHandle>,
    opened: usize,
    modes: HashMap<OutputHandle, Vec<OutputMode>>,
    text: HashMap<OutputHandle, Vec<u8>>,
    inputs: Vec<(OutputHandle, String)>,
}

/// Workbench that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingWorkbench {
    inner: Arc<Mutex<WorkbenchInner>>,
}

impl RecordingWorkbench {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a free-form event, e.g. from a hook.
    pub fn record(&self, event: impl Into<String>) {
        self.inner.lock().unwrap().events.push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.inner.lock().unwrap().events.clone()
    }

    pub fn live_outputs(&self) -> usize {
        self.inner.lock().unwrap().live.len()
    }

    pub fn opened_outputs(&self) -> usize {
        self.inner.lock().unwrap().opened
    }

    pub fn modes(&self, output: OutputHandle) -> Vec<OutputMode> {
        self.inner
            .lock()
            .unwrap()
            .modes
            .get(&output)
            .cloned()
            .unwrap_or_default()
    }

    pub fn text(&self, output: OutputHandle) -> String {
        let inner = self.inner.lock().unwrap();
        String::from_utf8_lossy(inner.text.get(&output).map_or(&[][..], |v| v)).into_owned()
    }

    pub fn inputs(&self) -> Vec<(OutputHandle, String)> {
        self.inner.lock().unwrap().inputs.clone()
    }
}

impl Workbench for RecordingWorkbench {
    fn open_display(&self, file: &Path, cursor: CursorPosition) -> ScratchResult<DisplayHandle> {
        self.record(format!("open_display {} {cursor}", file.display()));
        Ok(DisplayHandle::new())
    }

    fn enter_scratchpad_mode(&self, _display: DisplayHandle) -> ScratchResult<()> {
        self.record("scratchpad_mode");
        Ok(())
    }

    fn save_display(&self, _display: DisplayHandle) -> ScratchResult<()> {
        self.record("save");
        Ok(())
    }

    fn mark_unmodified(&self, _display: DisplayHandle) -> ScratchResult<()> {
        self.record("mark_unmodified");
        Ok(())
    }

    fn open_output(&self, _title: &str) -> ScratchResult<OutputHandle> {
        let handle = OutputHandle::new();
        let mut inner = self.inner.lock().unwrap();
        inner.live.insert(handle);
        inner.opened += 1;
        inner.events.push("open_output".into());
        Ok(handle)
    }

    fn close_output(&self, output: OutputHandle) -> ScratchResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.live.remove(&output);
        inner.events.push("close_output".into());
        Ok(())
    }

    fn is_output_live(&self, output: OutputHandle) -> bool {
        self.inner.lock().unwrap().live.contains(&output)
    }

    fn append_output(&self, output: OutputHandle, chunk: &[u8]) -> ScratchResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.text.entry(output).or_default().extend_from_slice(chunk);
        Ok(())
    }

    fn set_output_mode(&self, output: OutputHandle, mode: OutputMode) -> ScratchResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.modes.entry(output).or_default().push(mode);
        inner.events.push(format!("mode {mode}"));
        Ok(())
    }

    fn send_input(&self, output: OutputHandle, command_line: &str) -> ScratchResult<()> {
        self.inner
            .lock()
            .unwrap()
            .inputs
            .push((output, command_line.to_string()));
        Ok(())
    }
}
