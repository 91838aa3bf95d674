//! Build tool descriptors and the prioritised registry.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Name of the build directory every tool generates into.
pub const BUILD_DIR: &str = "builddir";

/// Name of the binary the template's build files must produce.
pub const BINARY_NAME: &str = "scratchpad";

/// How to invoke one external build system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildToolDescriptor {
    /// Executable looked up on `PATH` to decide whether the tool is usable.
    pub name: String,
    /// Shell command that (re)creates `builddir`.
    pub builddir_gen_command: String,
    /// Shell command that compiles inside an existing `builddir`.
    pub compile_command: String,
    /// File only this tool leaves in `builddir`.
    pub signature_file: String,
}

impl BuildToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        builddir_gen_command: impl Into<String>,
        compile_command: impl Into<String>,
        signature_file: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            builddir_gen_command: builddir_gen_command.into(),
            compile_command: compile_command.into(),
            signature_file: signature_file.into(),
        }
    }

    /// Meson generating a Ninja build.
    pub fn meson() -> Self {
        Self::new(
            "meson",
            format!("meson setup {BUILD_DIR}"),
            format!("ninja -C {BUILD_DIR}"),
            "build.ninja",
        )
    }

    /// CMake generating Makefiles, with a compilation database.
    pub fn cmake() -> Self {
        Self::new(
            "cmake",
            format!("cmake -S . -B {BUILD_DIR} -DCMAKE_EXPORT_COMPILE_COMMANDS=ON"),
            format!("make -C {BUILD_DIR}"),
            "Makefile",
        )
    }

    /// Whether `builddir` (relative to `root`) was generated by this tool.
    pub fn signature_path(&self, root: &Path) -> std::path::PathBuf {
        root.join(BUILD_DIR).join(&self.signature_file)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let blank = |s: &str| s.trim().is_empty();
        if blank(&self.name) {
            return Err(DomainError::InvalidBuildTool {
                reason: "name cannot be empty".into(),
            });
        }
        if self.name.contains(char::is_whitespace) {
            return Err(DomainError::InvalidBuildTool {
                reason: format!("name '{}' must be a single executable name", self.name),
            });
        }
        if blank(&self.builddir_gen_command) || blank(&self.compile_command) {
            return Err(DomainError::InvalidBuildTool {
                reason: format!("'{}' is missing a command", self.name),
            });
        }
        if blank(&self.signature_file) {
            return Err(DomainError::InvalidBuildTool {
                reason: format!("'{}' has no signature file", self.name),
            });
        }
        Ok(())
    }
}

impl fmt::Display for BuildToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Build tools in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildToolRegistry(Vec<BuildToolDescriptor>);

impl BuildToolRegistry {
    pub fn new(tools: Vec<BuildToolDescriptor>) -> Self {
        Self(tools)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildToolDescriptor> {
        self.0.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|t| t.name.as_str()).collect()
    }

    /// Registered tool whose signature file is present in `root/builddir`.
    pub fn detect_generator<F>(&self, root: &Path, exists: F) -> Option<&BuildToolDescriptor>
    where
        F: Fn(&Path) -> bool,
    {
        self.0.iter().find(|t| exists(&t.signature_path(root)))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::InvalidBuildTool {
                reason: "registry is empty".into(),
            });
        }
        for tool in &self.0 {
            tool.validate()?;
        }
        for (i, tool) in self.0.iter().enumerate() {
            if self.0[..i].iter().any(|t| t.name == tool.name) {
                return Err(DomainError::InvalidBuildTool {
                    reason: format!("'{}' is registered twice", tool.name),
                });
            }
        }
        Ok(())
    }
}

impl Default for BuildToolRegistry {
    fn default() -> Self {
        Self(vec![
            BuildToolDescriptor::meson(),
            BuildToolDescriptor::cmake(),
        ])
    }
}

impl<'a> IntoIterator for &'a BuildToolRegistry {
    type Item = &'a BuildToolDescriptor;
    type IntoIter = std::slice::Iter<'a, BuildToolDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_registry_prefers_meson() {
        let registry = BuildToolRegistry::default();
        assert_eq!(registry.names(), vec!["meson", "cmake"]);
    }

    #[test]
    fn default_registry_is_valid() {
        assert!(BuildToolRegistry::default().validate().is_ok());
    }

    #[test]
    fn empty_registry_is_invalid() {
        assert!(BuildToolRegistry::new(vec![]).validate().is_err());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let registry =
            BuildToolRegistry::new(vec![BuildToolDescriptor::meson(), BuildToolDescriptor::meson()]);
        let err = registry.validate().unwrap_err();
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn tool_name_with_spaces_is_rejected() {
        let tool = BuildToolDescriptor::new("my tool", "gen", "build", "sig");
        assert!(tool.validate().is_err());
    }

    #[test]
    fn blank_command_is_rejected() {
        let tool = BuildToolDescriptor::new("tool", "  ", "build", "sig");
        assert!(matches!(
            tool.validate(),
            Err(DomainError::InvalidBuildTool { .. })
        ));
    }

    #[test]
    fn signature_path_lives_in_builddir() {
        let path = BuildToolDescriptor::meson().signature_path(Path::new("/tmp/pad"));
        assert_eq!(path, PathBuf::from("/tmp/pad/builddir/build.ninja"));
    }

    #[test]
    fn detect_generator_matches_signature() {
        let registry = BuildToolRegistry::default();
        let found = registry.detect_generator(Path::new("/p"), |p| p.ends_with("Makefile"));
        assert_eq!(found.map(|t| t.name.as_str()), Some("cmake"));

        let none = registry.detect_generator(Path::new("/p"), |_| false);
        assert!(none.is_none());
    }
}
