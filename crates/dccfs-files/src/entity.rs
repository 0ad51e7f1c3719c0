//! Resolved entities.

use dccfs_common::{Error, Result};

use crate::content::Content;
use crate::directory::Directory;
use crate::file::File;
use crate::kinds::{EntityKind, FileType, JsonFile, PklFile, PyFile, TxtFile, UiFile};
use crate::path::EntityPath;

/// A file, directory, or bare path bound to a concrete filesystem path.
///
/// Produced by [`crate::EntityFactory`]; the variant is chosen from the
/// registry entry for the path's extension.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Path(EntityPath),
    Directory(Directory),
    File(File),
    Text(TxtFile),
    Json(JsonFile),
    Pickle(PklFile),
    Python(PyFile),
    Ui(UiFile),
}

/// Run `$body` with `$f` bound to the file kind held by a file variant.
macro_rules! with_file_kind {
    ($entity:expr, $f:ident => $body:expr, $other:ident => $fallback:expr) => {
        match $entity {
            Entity::File($f) => $body,
            Entity::Text($f) => $body,
            Entity::Json($f) => $body,
            Entity::Pickle($f) => $body,
            Entity::Python($f) => $body,
            Entity::Ui($f) => $body,
            $other => $fallback,
        }
    };
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Path(_) => EntityKind::Path,
            Self::Directory(_) => EntityKind::Directory,
            Self::File(_) => EntityKind::File,
            Self::Text(_) => EntityKind::Text,
            Self::Json(_) => EntityKind::Json,
            Self::Pickle(_) => EntityKind::Pickle,
            Self::Python(_) => EntityKind::Python,
            Self::Ui(_) => EntityKind::Ui,
        }
    }

    pub fn path(&self) -> &EntityPath {
        match self {
            Self::Path(path) => path,
            Self::Directory(directory) => directory.path(),
            Self::File(file) => file.path(),
            Self::Text(file) => file.path(),
            Self::Json(file) => file.path(),
            Self::Pickle(file) => file.path(),
            Self::Python(file) => file.path(),
            Self::Ui(file) => file.path(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        self.kind().is_file_kind()
    }

    pub fn base_name(&self, with_extension: bool) -> String {
        match self {
            Self::Directory(directory) => directory.base_name(),
            other => other.path().base_name(with_extension),
        }
    }

    pub fn extension(&self) -> Option<String> {
        self.path().extension()
    }

    /// The underlying file for every file kind.
    pub fn as_file(&self) -> Option<&File> {
        with_file_kind!(self, f => Some(f.file()), _other => None)
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Self::Directory(directory) => Some(directory),
            _ => None,
        }
    }

    pub fn as_ui(&self) -> Option<&UiFile> {
        match self {
            Self::Ui(file) => Some(file),
            _ => None,
        }
    }

    /// Read the entity's content using its kind's format.
    pub fn read(&self) -> Result<Content> {
        with_file_kind!(self, f => f.read_content(), other => Err(not_a_file(other)))
    }

    /// Replace the entity's content using its kind's format.
    pub fn write(&self, content: Content) -> Result<()> {
        with_file_kind!(
            self,
            f => f.write_content(Some(content)),
            other => Err(not_a_file(other))
        )
    }

    /// Rename in place. See [`EntityPath::set_base_name`].
    pub fn set_base_name(&mut self, new_name: &str) -> Result<()> {
        match self {
            Self::Path(path) => path.set_base_name(new_name),
            Self::Directory(directory) => directory.set_base_name(new_name),
            Self::File(file) => file.set_base_name(new_name),
            Self::Text(file) => file.file_mut().set_base_name(new_name),
            Self::Json(file) => file.file_mut().set_base_name(new_name),
            Self::Pickle(file) => file.file_mut().set_base_name(new_name),
            Self::Python(file) => file.file_mut().set_base_name(new_name),
            Self::Ui(file) => file.file_mut().set_base_name(new_name),
        }
    }
}

fn not_a_file(entity: &Entity) -> Error {
    Error::invalid_path(entity.path(), format!("a {} has no file content", entity.kind()))
}

impl From<Directory> for Entity {
    fn from(directory: Directory) -> Self {
        Self::Directory(directory)
    }
}

impl From<File> for Entity {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

impl From<TxtFile> for Entity {
    fn from(file: TxtFile) -> Self {
        Self::Text(file)
    }
}

impl From<JsonFile> for Entity {
    fn from(file: JsonFile) -> Self {
        Self::Json(file)
    }
}

impl From<PklFile> for Entity {
    fn from(file: PklFile) -> Self {
        Self::Pickle(file)
    }
}

impl From<PyFile> for Entity {
    fn from(file: PyFile) -> Self {
        Self::Python(file)
    }
}

impl From<UiFile> for Entity {
    fn from(file: UiFile) -> Self {
        Self::Ui(file)
    }
}
