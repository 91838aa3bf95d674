//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use cppscratch_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ScratchError, ScratchResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> ScratchResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn create_scratch_dir(&self, root: &Path, prefix: &str) -> ScratchResult<PathBuf> {
        self.create_dir_all(root)?;
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(root)
            .map_err(|e| map_io_error(root, e, "allocate scratch directory"))?;
        Ok(dir.keep())
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> ScratchResult<()> {
        for entry in WalkDir::new(from).min_depth(1).follow_links(false) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(from).to_path_buf();
                ScratchError::from(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to walk template: {e}"),
                })
            })?;

            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| ScratchError::Internal {
                    message: format!("walked outside {}: {e}", from.display()),
                })?;
            let dest = to.join(relative);
            let file_type = entry.file_type();

            trace!(from = %entry.path().display(), to = %dest.display(), "copy");
            if file_type.is_dir() {
                self.create_dir_all(&dest)?;
            } else if file_type.is_symlink() {
                copy_symlink(entry.path(), &dest)?;
            } else {
                fs::copy(entry.path(), &dest).map_err(|e| map_io_error(&dest, e, "copy file"))?;
            }
        }
        Ok(())
    }

    fn read_file(&self, path: &Path) -> ScratchResult<Vec<u8>> {
        fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> ScratchResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn remove_dir_all(&self, path: &Path) -> ScratchResult<()> {
        fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn symlink(&self, target: &Path, link: &Path) -> ScratchResult<()> {
        if fs::symlink_metadata(link).is_ok() {
            fs::remove_file(link).map_err(|e| map_io_error(link, e, "replace link"))?;
        }
        make_symlink(target, link).map_err(|e| map_io_error(link, e, "create symlink"))
    }

    fn list_dir(&self, dir: &Path) -> ScratchResult<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| map_io_error(dir, e, "list directory"))?;
        entries
            .map(|entry| {
                entry
                    .map(|e| e.path())
                    .map_err(|e| map_io_error(dir, e, "list directory"))
            })
            .collect()
    }
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn make_symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symlinks are only created on unix",
    ))
}

/// Recreate the link itself rather than copying what it points at.
fn copy_symlink(src: &Path, dest: &Path) -> ScratchResult<()> {
    let target = fs::read_link(src).map_err(|e| map_io_error(src, e, "read link"))?;
    match make_symlink(&target, dest) {
        Ok(()) => Ok(()),
        // Fall back to a plain copy where links are unavailable.
        Err(e) if e.kind() == io::ErrorKind::Unsupported => fs::copy(src, dest)
            .map(|_| ())
            .map_err(|e| map_io_error(dest, e, "copy file")),
        Err(e) => Err(map_io_error(dest, e, "copy link")),
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ScratchError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fs() -> LocalFilesystem {
        LocalFilesystem::new()
    }

    #[test]
    fn scratch_dirs_are_unique_and_prefixed() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("pads");

        let a = fs().create_scratch_dir(&nested, "scratchpad-").unwrap();
        let b = fs().create_scratch_dir(&nested, "scratchpad-").unwrap();

        assert_ne!(a, b);
        assert!(a.is_dir() && b.is_dir());
        assert_eq!(a.parent(), Some(nested.as_path()));
        assert!(
            a.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("scratchpad-")
        );
    }

    #[test]
    fn copy_dir_all_copies_nested_tree() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("src/detail")).unwrap();
        fs::write(src.path().join("main.cpp"), "int main() { $ }\n").unwrap();
        fs::write(src.path().join("src/detail/util.hpp"), "#pragma once\n").unwrap();
        fs::create_dir(src.path().join("empty")).unwrap();

        fs().copy_dir_all(src.path(), dst.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dst.path().join("main.cpp")).unwrap(),
            "int main() { $ }\n"
        );
        assert_eq!(
            fs::read_to_string(dst.path().join("src/detail/util.hpp")).unwrap(),
            "#pragma once\n"
        );
        assert!(dst.path().join("empty").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn copy_dir_all_keeps_symlinks_as_links() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("real.txt"), "x").unwrap();
        std::os::unix::fs::symlink("real.txt", src.path().join("alias.txt")).unwrap();

        fs().copy_dir_all(src.path(), dst.path()).unwrap();

        let copied = dst.path().join("alias.txt");
        assert!(fs::symlink_metadata(&copied).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&copied).unwrap(), PathBuf::from("real.txt"));
    }

    #[test]
    fn copy_from_missing_dir_is_an_error() {
        let dst = TempDir::new().unwrap();
        let err = fs()
            .copy_dir_all(&dst.path().join("missing"), dst.path())
            .unwrap_err();
        assert!(matches!(
            err,
            ScratchError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_created_and_reported_absent() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("compile_commands.json");

        fs()
            .symlink(Path::new("builddir/compile_commands.json"), &link)
            .unwrap();

        assert!(fs::symlink_metadata(&link).is_ok());
        assert!(!fs().exists(&link));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_replaces_existing_link() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b"), "b").unwrap();
        let link = dir.path().join("l");

        fs().symlink(Path::new("a"), &link).unwrap();
        fs().symlink(Path::new("b"), &link).unwrap();

        assert_eq!(fs::read_to_string(&link).unwrap(), "b");
    }

    #[test]
    fn remove_dir_all_removes_everything() {
        let root = TempDir::new().unwrap();
        let pad = fs().create_scratch_dir(root.path(), "scratchpad-").unwrap();
        fs::create_dir_all(pad.join("builddir")).unwrap();
        fs::write(pad.join("builddir/build.ninja"), "").unwrap();

        fs().remove_dir_all(&pad).unwrap();

        assert!(!pad.exists());
    }

    #[test]
    fn list_dir_returns_children() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("a")).unwrap();
        fs::write(root.path().join("b"), "").unwrap();

        let mut children = fs().list_dir(root.path()).unwrap();
        children.sort();

        assert_eq!(children, vec![root.path().join("a"), root.path().join("b")]);
    }
}
