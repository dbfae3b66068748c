use crate::areas::repository::GIT_DIR_NAME;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// What a directory entry is, without following symbolic links
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    File,
    Directory,
    /// Symbolic links, sockets, fifos and the like
    Other,
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path is ignored when any of its components is the metadata directory
    pub fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            matches!(component, Component::Normal(name) if name == GIT_DIR_NAME)
        })
    }

    /// List the entries of a directory relative to the workspace root
    ///
    /// Returned paths are relative to the workspace root; ignored entries are
    /// left out. Order is whatever the file system yields.
    pub fn list_dir(&self, dir_path: &Path) -> Result<Vec<(PathBuf, EntryKind)>> {
        let mut entries = Vec::new();

        for entry in std::fs::read_dir(self.path.join(dir_path))? {
            let entry = entry?;
            let relative_path = dir_path.join(entry.file_name());

            if Self::is_ignored(&relative_path) {
                continue;
            }

            let file_type = entry.file_type()?;
            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::Other
            };

            entries.push((relative_path, kind));
        }

        Ok(entries)
    }

    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        let content = std::fs::read(self.path.join(file_path))?;

        Ok(Bytes::from(content))
    }

    /// Write a file, creating its parent directories as needed
    ///
    /// A directory, symbolic link or special file left where the file should
    /// go is removed first, so the data always lands in a regular file.
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> Result<()> {
        if Self::is_ignored(file_path) {
            return Err(Error::InvalidPath(file_path.to_path_buf()));
        }

        if let Some(parent) = file_path.parent() {
            self.create_parent_dirs(parent)?;
        }

        let path = self.path.join(file_path);

        match std::fs::symlink_metadata(&path) {
            Ok(metadata) if metadata.is_dir() => std::fs::remove_dir_all(&path)?,
            Ok(metadata) if !metadata.is_file() => {
                debug!(path = %path.display(), "replacing special file");
                std::fs::remove_file(&path)?;
            }
            _ => {}
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        file.write_all(data)?;

        Ok(())
    }

    /// Create the directories leading to a file, one component at a time
    ///
    /// Symbolic links and other non-directories in the way are replaced by
    /// real directories, so nothing is ever written outside the workspace.
    fn create_parent_dirs(&self, dir_path: &Path) -> Result<()> {
        let mut current = self.path.to_path_buf();

        for component in dir_path.components() {
            let Component::Normal(name) = component else {
                return Err(Error::InvalidPath(dir_path.to_path_buf()));
            };
            current.push(name);

            match std::fs::symlink_metadata(&current) {
                Ok(metadata) if metadata.is_dir() => {}
                Ok(_) => {
                    debug!(path = %current.display(), "replacing non-directory with directory");
                    std::fs::remove_file(&current)?;
                    std::fs::create_dir(&current)?;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    std::fs::create_dir(&current)?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }

    /// Remove every regular file outside the metadata directory
    ///
    /// Directories stay in place, even when they end up empty. Symbolic links
    /// and other special files are left untouched.
    pub fn empty(&self) -> Result<()> {
        let root = self.path.as_ref();
        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .map(|relative| !Self::is_ignored(relative))
                .unwrap_or(false)
        });

        for entry in walker {
            let entry = entry?;

            if entry.file_type().is_file() {
                debug!(path = %entry.path().display(), "removing file");
                std::fs::remove_file(entry.path())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(".ugit", true)]
    #[case(".ugit/objects/abc", true)]
    #[case("a/.ugit/HEAD", true)]
    #[case("a/b.txt", false)]
    #[case(".ugitignore", false)]
    fn test_is_ignored(#[case] path: &str, #[case] ignored: bool) {
        assert_eq!(Workspace::is_ignored(Path::new(path)), ignored);
    }

    #[test]
    fn test_empty_removes_files_but_keeps_directories_and_metadata() {
        let dir = TempDir::new().unwrap();
        dir.child("1.txt").write_str("one").unwrap();
        dir.child("a/b/3.txt").write_str("three").unwrap();
        dir.child(".ugit/HEAD").write_str("ref: refs/heads/master").unwrap();

        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());
        workspace.empty().unwrap();

        assert!(!dir.child("1.txt").path().exists());
        assert!(!dir.child("a/b/3.txt").path().exists());
        assert!(dir.child("a/b").path().is_dir());
        assert!(dir.child(".ugit/HEAD").path().is_file());
    }

    #[test]
    fn test_list_dir_skips_metadata_directory() {
        let dir = TempDir::new().unwrap();
        dir.child("1.txt").write_str("one").unwrap();
        dir.child("a/2.txt").write_str("two").unwrap();
        dir.child(".ugit/objects").create_dir_all().unwrap();

        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());
        let mut entries = workspace.list_dir(Path::new("")).unwrap();
        entries.sort();

        assert_eq!(
            entries,
            vec![
                (PathBuf::from("1.txt"), EntryKind::File),
                (PathBuf::from("a"), EntryKind::Directory),
            ]
        );
    }

    #[test]
    fn test_write_file_replaces_leftover_directory() {
        let dir = TempDir::new().unwrap();
        dir.child("a/b").create_dir_all().unwrap();

        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());
        workspace.write_file(Path::new("a"), b"now a file").unwrap();

        assert_eq!(std::fs::read_to_string(dir.child("a").path()).unwrap(), "now a file");
        assert!(matches!(
            workspace.write_file(Path::new(".ugit/HEAD"), b"x"),
            Err(Error::InvalidPath(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_file_never_follows_symbolic_links() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        outside.child("target.txt").write_str("untouched").unwrap();
        std::os::unix::fs::symlink(outside.child("target.txt").path(), dir.child("a.txt").path())
            .unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.child("sub").path()).unwrap();

        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());
        workspace.write_file(Path::new("a.txt"), b"inside").unwrap();
        workspace.write_file(Path::new("sub/b.txt"), b"nested").unwrap();

        assert_eq!(
            std::fs::read_to_string(outside.child("target.txt").path()).unwrap(),
            "untouched"
        );
        assert!(!outside.child("b.txt").path().exists());
        assert!(std::fs::symlink_metadata(dir.child("a.txt").path()).unwrap().is_file());
        assert!(std::fs::symlink_metadata(dir.child("sub").path()).unwrap().is_dir());
        assert_eq!(
            std::fs::read_to_string(dir.child("sub/b.txt").path()).unwrap(),
            "nested"
        );
    }
}
