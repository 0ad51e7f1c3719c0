//! Directory entities and listings.

use std::fs;
use std::path::Path;

use dccfs_common::{Error, FileFilter, Result};

use crate::entity::Entity;
use crate::factory::EntityFactory;
use crate::path::EntityPath;

/// Selection applied by [`Directory::content`].
///
/// The extension list only ever applies to files; directories are selected
/// by `filters` alone.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    /// Child kinds to return. Empty means all.
    pub filters: Vec<FileFilter>,
    /// Extension tokens to match, compared case-insensitively. Empty means
    /// no extension filtering.
    pub extensions: Vec<String>,
    /// `true` keeps files whose extension is listed, `false` drops them.
    pub extensions_included: bool,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            extensions: Vec::new(),
            extensions_included: true,
        }
    }
}

impl ContentFilter {
    /// Every child.
    pub fn all() -> Self {
        Self::default()
    }

    /// Files only.
    pub fn files() -> Self {
        Self {
            filters: vec![FileFilter::File],
            ..Self::default()
        }
    }

    /// Directories only.
    pub fn directories() -> Self {
        Self {
            filters: vec![FileFilter::Directory],
            ..Self::default()
        }
    }

    /// Keep only files with one of `extensions`.
    pub fn including<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self.extensions_included = true;
        self
    }

    /// Drop files with one of `extensions`.
    pub fn excluding<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self.extensions_included = false;
        self
    }

    fn wants(&self, filter: FileFilter) -> bool {
        self.filters.is_empty() || self.filters.contains(&filter)
    }

    fn accepts_extension(&self, extension: Option<&str>) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        let listed = extension.is_some_and(|ext| {
            self.extensions
                .iter()
                .any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(ext))
        });

        listed == self.extensions_included
    }
}

/// A directory on the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directory {
    path: EntityPath,
}

impl Directory {
    /// Wrap `path`; it does not need to exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_path(EntityPath::new(path)?))
    }

    pub(crate) fn from_path(path: EntityPath) -> Self {
        Self { path }
    }

    /// Create the directory and any missing parents. Existing directories are
    /// left as they are.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let directory = Self::new(path)?;
        if !directory.path.is_directory() {
            fs::create_dir_all(&directory.path)?;
            tracing::debug!("created directory {}", directory.path);
        }
        Ok(directory)
    }

    pub fn path(&self) -> &EntityPath {
        &self.path
    }

    /// The final segment, dots included.
    pub fn base_name(&self) -> String {
        self.path.base_name(true)
    }

    /// The parent directory; the root is its own parent.
    pub fn directory(&self) -> Directory {
        Self::from_path(self.path.parent())
    }

    pub fn exists(&self) -> bool {
        self.path.is_directory()
    }

    /// Rename the directory in place. See [`EntityPath::set_base_name`].
    pub fn set_base_name(&mut self, new_name: &str) -> Result<()> {
        self.path.set_base_name(new_name)
    }

    /// List immediate children as resolved entities.
    ///
    /// Directories come first, then files; each group is sorted by path.
    /// Children that are neither (broken links, sockets) are skipped.
    pub fn content(&self, factory: &EntityFactory, filter: &ContentFilter) -> Result<Vec<Entity>> {
        if !self.exists() {
            return Err(Error::invalid_path(
                &self.path,
                "not an existing directory",
            ));
        }

        let mut directories = Vec::new();
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.path)? {
            let child = self.path.join(entry?.file_name());

            if child.is_directory() {
                if filter.wants(FileFilter::Directory) {
                    directories.push(child);
                }
            } else if child.is_file()
                && filter.wants(FileFilter::File)
                && filter.accepts_extension(child.extension().as_deref())
            {
                files.push(child);
            }
        }

        directories.sort();
        files.sort();

        directories
            .into_iter()
            .chain(files)
            .map(|child| factory.resolve(child))
            .collect()
    }
}

impl AsRef<Path> for Directory {
    fn as_ref(&self) -> &Path {
        self.path.as_path()
    }
}
