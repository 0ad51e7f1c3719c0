//! The generic file entity.

use std::fs;
use std::path::PathBuf;

use dccfs_common::{Error, Result};

use crate::content::Content;
use crate::directory::Directory;
use crate::entity::Entity;
use crate::factory::EntityFactory;
use crate::kinds::{decode_text, EntityKind, FileType, Readable, Writable};
use crate::path::{self, EntityPath};
use crate::tools::Editor;

/// Where and how [`File::copy`] writes its copy.
///
/// Unset fields default to the source's directory and name.
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    /// Directory receiving the copy; must exist.
    pub destination_directory: Option<PathBuf>,
    /// Name of the copy without extension; the source extension is appended.
    pub destination_name: Option<String>,
    /// Carry access and modification times over to the copy.
    pub preserve_metadata: bool,
}

impl CopyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.destination_directory = Some(directory.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.destination_name = Some(name.into());
        self
    }

    pub fn preserve_metadata(mut self, preserve: bool) -> Self {
        self.preserve_metadata = preserve;
        self
    }
}

/// A file of any extension.
///
/// Typed kinds wrap a `File`; everything that does not depend on the file's
/// format lives here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File {
    path: EntityPath,
}

impl File {
    pub(crate) fn from_path(path: EntityPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &EntityPath {
        &self.path
    }

    pub fn base_name(&self, with_extension: bool) -> String {
        self.path.base_name(with_extension)
    }

    pub fn extension(&self) -> Option<String> {
        self.path.extension()
    }

    /// The directory containing this file.
    pub fn directory(&self) -> Directory {
        Directory::from_path(self.path.parent())
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn read_text(&self) -> Result<String> {
        decode_text(&fs::read(&self.path)?)
    }

    pub fn write_text(&self, content: &str) -> Result<()> {
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Rename the file in place. See [`EntityPath::set_base_name`].
    pub fn set_base_name(&mut self, new_name: &str) -> Result<()> {
        self.path.set_base_name(new_name)
    }

    /// Open the file with an external editor.
    pub fn open(&self, editor: &dyn Editor) -> Result<()> {
        editor.open(self.path.as_path())
    }

    /// Copy the file and resolve the copy through `factory`.
    ///
    /// Fails with [`Error::InvalidPath`] when the destination directory does
    /// not exist, [`Error::SelfCopy`] when the copy would land on the source,
    /// and [`Error::DestinationConflict`] when the destination is read-only
    /// or a directory. An existing destination file is removed before the
    /// bytes are copied.
    pub fn copy(&self, factory: &EntityFactory, options: &CopyOptions) -> Result<Entity> {
        let destination_directory = match &options.destination_directory {
            Some(directory) => EntityPath::new(directory)?,
            None => self.path.parent(),
        };

        let destination_name = match &options.destination_name {
            Some(name) => match self.path.as_path().extension() {
                Some(ext) => format!("{}.{}", name, ext.to_string_lossy()),
                None => name.clone(),
            },
            None => self.base_name(true),
        };

        if !destination_directory.is_directory() {
            return Err(Error::invalid_path(
                &destination_directory,
                "destination is not an existing directory",
            ));
        }

        let destination = destination_directory.join(&destination_name);

        // Symlinked directories can reach the source under another name.
        let onto_source = destination == self.path
            || (destination.is_file()
                && path::same_entity(self.path.as_path(), destination.as_path()));
        if onto_source {
            return Err(Error::SelfCopy {
                path: self.path.as_path().to_path_buf(),
            });
        }

        if destination.is_directory() {
            return Err(Error::destination_conflict(
                &destination,
                "a directory exists at the destination",
            ));
        }

        if destination.is_file() {
            if fs::metadata(&destination)?.permissions().readonly() {
                return Err(Error::destination_conflict(
                    &destination,
                    "can't copy onto a read-only file",
                ));
            }
            // Replacing in place fails on some platforms when the target is open.
            fs::remove_file(&destination)?;
        }

        fs::copy(&self.path, &destination)?;
        if options.preserve_metadata {
            copy_times(&self.path, &destination)?;
        }

        tracing::debug!("copied {} -> {}", self.path, destination);
        factory.resolve(destination)
    }
}

fn copy_times(source: &EntityPath, destination: &EntityPath) -> Result<()> {
    let metadata = fs::metadata(source)?;
    let times = fs::FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);

    // A read-only source yields a read-only copy; fall back to a read handle.
    let handle = fs::OpenOptions::new()
        .write(true)
        .open(destination)
        .or_else(|_| fs::File::open(destination))?;
    handle.set_times(times)?;
    Ok(())
}

impl FileType for File {
    const KIND: EntityKind = EntityKind::File;

    fn from_file(file: File) -> Self {
        file
    }

    fn file(&self) -> &File {
        self
    }

    fn file_mut(&mut self) -> &mut File {
        self
    }

    fn into_file(self) -> File {
        self
    }

    fn encode(content: Option<Content>) -> Result<Vec<u8>> {
        Ok(content.map(Content::into_text).unwrap_or_default().into_bytes())
    }

    fn decode(bytes: &[u8]) -> Result<Content> {
        decode_text(bytes).map(Content::Text)
    }
}

impl Readable for File {
    type Output = String;

    fn read(&self) -> Result<String> {
        self.read_text()
    }
}

impl Writable for File {
    type Input = str;

    fn write(&self, content: &str) -> Result<()> {
        self.write_text(content)
    }
}

impl AsRef<File> for File {
    fn as_ref(&self) -> &File {
        self
    }
}
