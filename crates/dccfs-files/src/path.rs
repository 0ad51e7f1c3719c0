//! Absolute path values.

use std::fmt;
use std::fs;
use std::path::{is_separator, Path, PathBuf};

use dccfs_common::paths;
use dccfs_common::{Error, FileFilter, Result};

/// An absolute, lexically normalized filesystem path.
///
/// Construction never touches the filesystem beyond reading the current
/// working directory for relative input, so an `EntityPath` may point at
/// something that does not exist yet. The stored path only changes through
/// [`EntityPath::set_base_name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityPath {
    path: PathBuf,
}

impl EntityPath {
    /// Anchor `path` at the current working directory and normalize it.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            path: paths::absolute(path.as_ref())?,
        })
    }

    /// Like [`EntityPath::new`], but rejects input ending in a separator,
    /// which normalization would otherwise strip.
    pub(crate) fn new_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.to_string_lossy().ends_with(is_separator) {
            return Err(Error::invalid_path(
                path,
                "a file path cannot end with a separator",
            ));
        }
        Self::new(path)
    }

    /// The absolute path.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Join a relative segment onto this path.
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        Self {
            path: paths::normalize(&self.path.join(segment)),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn is_file(&self) -> bool {
        self.path.is_file()
    }

    pub fn is_directory(&self) -> bool {
        self.path.is_dir()
    }

    /// Whether the path lists as a directory or a file child.
    pub fn path_type(&self) -> FileFilter {
        if self.is_directory() {
            FileFilter::Directory
        } else {
            FileFilter::File
        }
    }

    /// Lower-cased extension token, `None` for existing directories.
    pub fn extension(&self) -> Option<String> {
        if self.is_directory() {
            return None;
        }
        paths::extension(&self.path.to_string_lossy())
    }

    /// The final path segment.
    ///
    /// With `with_extension == false` everything from the first extension dot
    /// is stripped, unless the path is an existing directory. The path does
    /// not need to exist.
    pub fn base_name(&self, with_extension: bool) -> String {
        let name = match self.path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            // Only the root has no final segment.
            None => return self.path.to_string_lossy().into_owned(),
        };

        if with_extension || self.is_directory() {
            name
        } else {
            paths::strip_extensions(&name).to_string()
        }
    }

    /// The parent path; the root is its own parent.
    pub fn parent(&self) -> Self {
        match self.path.parent() {
            Some(parent) => Self {
                path: parent.to_path_buf(),
            },
            None => self.clone(),
        }
    }

    /// Rename the entity on disk, keeping it in the same directory.
    ///
    /// Renaming to the current name is a no-op. Fails with
    /// [`Error::DestinationConflict`] when another entity already occupies
    /// the target name.
    pub fn set_base_name(&mut self, new_name: &str) -> Result<()> {
        if new_name.is_empty()
            || new_name.contains(is_separator)
            || new_name == "."
            || new_name == ".."
        {
            return Err(Error::invalid_path(
                new_name,
                "a base name must be a single path segment",
            ));
        }

        if new_name == self.base_name(true) {
            return Ok(());
        }

        if !self.exists() {
            return Err(Error::invalid_path(
                &self.path,
                "not an existing file or directory",
            ));
        }

        let target = self.parent().join(new_name);
        if target.exists() && !same_entity(&self.path, &target.path) {
            return Err(Error::destination_conflict(
                &target.path,
                "another entity already exists with this name",
            ));
        }

        fs::rename(&self.path, &target.path)?;
        tracing::debug!("renamed {:?} -> {:?}", self.path, target.path);

        self.path = target.path;
        Ok(())
    }
}

/// Both paths resolve to the same entity on disk (symlinked directories,
/// case-only renames on case-insensitive filesystems).
pub(crate) fn same_entity(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl fmt::Display for EntityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl AsRef<Path> for EntityPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl PartialEq<Path> for EntityPath {
    fn eq(&self, other: &Path) -> bool {
        self.path == other
    }
}

impl PartialEq<&str> for EntityPath {
    fn eq(&self, other: &&str) -> bool {
        self.path == Path::new(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_relative_input_is_absolute() {
        let path = EntityPath::new("some/config.json").unwrap();
        assert!(path.as_path().is_absolute());
        assert!(path.as_path().ends_with("some/config.json"));
    }

    #[test]
    fn test_normalized_equality() {
        let a = EntityPath::new("/proj/./rigs/../rigs/a.json").unwrap();
        let b = EntityPath::new("/proj/rigs/a.json").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "/proj/rigs/a.json");
        assert_eq!(a.to_string(), "/proj/rigs/a.json");
    }

    #[test]
    fn test_file_path_rejects_trailing_separator() {
        assert_matches!(
            EntityPath::new_file("shots/out.json/"),
            Err(Error::InvalidPath { .. })
        );
        assert!(EntityPath::new_file("shots/out.json").is_ok());
    }

    #[test]
    fn test_base_name_without_existence() {
        let path = EntityPath::new("/nowhere/rig.v001.ma").unwrap();
        assert_eq!(path.base_name(true), "rig.v001.ma");
        assert_eq!(path.base_name(false), "rig");
    }

    #[test]
    fn test_base_name_directory_keeps_dots() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("publish.v2");
        fs::create_dir(&sub).unwrap();

        let path = EntityPath::new(&sub).unwrap();
        assert_eq!(path.base_name(false), "publish.v2");
        assert_eq!(path.extension(), None);
        assert_eq!(path.path_type(), FileFilter::Directory);
    }

    #[test]
    fn test_root_parent() {
        let root = EntityPath::new("/").unwrap();
        assert_eq!(root.parent(), root);
        assert_eq!(root.base_name(true), "/");
    }

    #[test]
    fn test_set_base_name_renames() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("old.txt"), "x").unwrap();

        let mut path = EntityPath::new(dir.path().join("old.txt")).unwrap();
        path.set_base_name("new.txt").unwrap();

        assert_eq!(path.base_name(true), "new.txt");
        assert!(dir.path().join("new.txt").is_file());
        assert!(!dir.path().join("old.txt").exists());
    }

    #[test]
    fn test_set_base_name_same_name_is_noop() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("same.txt"), "x").unwrap();

        let mut path = EntityPath::new(dir.path().join("same.txt")).unwrap();
        path.set_base_name("same.txt").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_set_base_name_conflict() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let mut path = EntityPath::new(dir.path().join("a.txt")).unwrap();
        let err = path.set_base_name("b.txt").unwrap_err();
        assert_matches!(err, Error::DestinationConflict { .. });

        // Nothing moved
        assert_eq!(path.base_name(true), "a.txt");
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "b");
    }

    #[test]
    fn test_set_base_name_rejects_segments() {
        let mut path = EntityPath::new("/tmp/whatever.txt").unwrap();
        assert_matches!(
            path.set_base_name("sub/dir.txt"),
            Err(Error::InvalidPath { .. })
        );
        assert_matches!(path.set_base_name(""), Err(Error::InvalidPath { .. }));
    }

    #[test]
    fn test_set_base_name_missing_source() {
        let dir = tempdir().unwrap();
        let mut path = EntityPath::new(dir.path().join("ghost.txt")).unwrap();
        assert_matches!(
            path.set_base_name("other.txt"),
            Err(Error::InvalidPath { .. })
        );
    }
}
