//! Scratchpad instances, surface handles, and manager settings.

use std::fmt;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::{BuildToolRegistry, CursorPosition, DomainError, marker::DEFAULT_MARKER};

/// Directory-name prefix of every scratchpad under the scratch root.
pub const SCRATCH_PREFIX: &str = "scratchpad-";

/// Entry file opened when a scratchpad is created.
pub const DEFAULT_ENTRY_FILE: &str = "main.cpp";

/// Opaque reference to the surface showing a scratchpad's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayHandle(Uuid);

impl DisplayHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DisplayHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque reference to the surface showing build and run output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputHandle(Uuid);

impl OutputHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OutputHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OutputHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "output-{}", self.0.simple())
    }
}

/// Mode of an output surface. Entered fresh on every compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Read-only view of build diagnostics.
    Diagnostics,
    /// Interactive terminal running the produced binary.
    Terminal,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diagnostics => write!(f, "diagnostics"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}

/// A live, template-seeded project directory.
///
/// Invariant: at most one output handle is held at a time. Only the
/// manager replaces it.
#[derive(Debug, PartialEq, Eq)]
pub struct ScratchpadInstance {
    path: PathBuf,
    entry_file: PathBuf,
    display: DisplayHandle,
    cursor: CursorPosition,
    pub(crate) output: Option<OutputHandle>,
}

impl ScratchpadInstance {
    pub(crate) fn new(
        path: PathBuf,
        entry_file: PathBuf,
        display: DisplayHandle,
        cursor: CursorPosition,
    ) -> Self {
        Self {
            path,
            entry_file,
            display,
            cursor,
            output: None,
        }
    }

    /// Absolute directory holding the private template copy.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of the entry source file.
    pub fn entry_file(&self) -> &Path {
        &self.entry_file
    }

    pub fn display(&self) -> DisplayHandle {
        self.display
    }

    /// Initial cursor position (where the marker was).
    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn output(&self) -> Option<OutputHandle> {
        self.output
    }

    pub fn build_dir(&self) -> PathBuf {
        self.path.join(super::BUILD_DIR)
    }

    /// Directory name, e.g. `scratchpad-a1b2c3`.
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Immutable manager configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchpadSettings {
    /// Directory under which scratchpads are allocated.
    pub scratch_root: PathBuf,
    /// Template copied into every new scratchpad.
    pub template_dir: PathBuf,
    /// Entry file, relative to the template root.
    pub entry_file: PathBuf,
    pub marker: char,
    pub build_tools: BuildToolRegistry,
}

impl ScratchpadSettings {
    pub fn new(scratch_root: impl Into<PathBuf>, template_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_root: scratch_root.into(),
            template_dir: template_dir.into(),
            entry_file: PathBuf::from(DEFAULT_ENTRY_FILE),
            marker: DEFAULT_MARKER,
            build_tools: BuildToolRegistry::default(),
        }
    }

    pub fn with_entry_file(mut self, entry_file: impl Into<PathBuf>) -> Self {
        self.entry_file = entry_file.into();
        self
    }

    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_build_tools(mut self, build_tools: BuildToolRegistry) -> Self {
        self.build_tools = build_tools;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entry_file.as_os_str().is_empty() {
            return Err(DomainError::InvalidSettings("entry file cannot be empty".into()));
        }
        if self.entry_file.is_absolute() {
            return Err(DomainError::InvalidSettings(format!(
                "entry file must be relative to the template: {}",
                self.entry_file.display()
            )));
        }
        if self.marker.is_whitespace() {
            return Err(DomainError::InvalidSettings(
                "marker cannot be whitespace".into(),
            ));
        }
        self.build_tools.validate()
    }

    /// Whether `path` names a scratchpad directory under the scratch root.
    ///
    /// Purely lexical; existence is checked by the caller.
    pub fn owns(&self, path: &Path) -> bool {
        path.parent() == Some(self.scratch_root.as_path())
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(SCRATCH_PREFIX) && n.len() > SCRATCH_PREFIX.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BuildToolDescriptor;

    fn settings() -> ScratchpadSettings {
        ScratchpadSettings::new("/tmp/scratch", "/home/me/template")
    }

    #[test]
    fn defaults_use_main_cpp_and_dollar() {
        let s = settings();
        assert_eq!(s.entry_file, PathBuf::from("main.cpp"));
        assert_eq!(s.marker, '$');
        assert!(s.validate().is_ok());
    }

    #[test]
    fn absolute_entry_file_is_rejected() {
        let s = settings().with_entry_file("/etc/passwd");
        assert!(matches!(s.validate(), Err(DomainError::InvalidSettings(_))));
    }

    #[test]
    fn whitespace_marker_is_rejected() {
        assert!(settings().with_marker(' ').validate().is_err());
    }

    #[test]
    fn invalid_registry_fails_validation() {
        let s = settings().with_build_tools(BuildToolRegistry::new(vec![
            BuildToolDescriptor::new("", "g", "c", "s"),
        ]));
        assert!(matches!(
            s.validate(),
            Err(DomainError::InvalidBuildTool { .. })
        ));
    }

    #[test]
    fn owns_only_prefixed_children_of_root() {
        let s = settings();
        assert!(s.owns(Path::new("/tmp/scratch/scratchpad-x1")));
        assert!(!s.owns(Path::new("/tmp/scratch/scratchpad-")));
        assert!(!s.owns(Path::new("/tmp/scratch/other")));
        assert!(!s.owns(Path::new("/tmp/scratch/scratchpad-x1/builddir")));
        assert!(!s.owns(Path::new("/tmp/elsewhere/scratchpad-x1")));
    }

    #[test]
    fn handles_are_unique() {
        assert_ne!(OutputHandle::new(), OutputHandle::new());
        assert_ne!(DisplayHandle::new(), DisplayHandle::new());
    }

    #[test]
    fn instance_accessors() {
        let inst = ScratchpadInstance::new(
            "/tmp/scratch/scratchpad-abc".into(),
            "/tmp/scratch/scratchpad-abc/main.cpp".into(),
            DisplayHandle::new(),
            CursorPosition::default(),
        );
        assert_eq!(inst.name(), "scratchpad-abc");
        assert_eq!(inst.build_dir(), PathBuf::from("/tmp/scratch/scratchpad-abc/builddir"));
        assert!(inst.output().is_none());
    }
}
