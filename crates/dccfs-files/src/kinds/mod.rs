//! File kinds and their capabilities.
//!
//! Every kind is a thin newtype over [`File`]. What a kind can do is expressed
//! through capability traits instead of an inheritance chain:
//!
//! - [`FileType`]: declared extension, checked construction, creation with
//!   kind-specific default content, and dynamic [`Content`] encode/decode
//! - [`Readable`] / [`Writable`]: typed read and write
//! - [`Compilable`]: turning a source file into a derived file

/// Declare a kind newtype over [`File`] with its declared extension and the
/// wrapping half of [`FileType`].
macro_rules! file_kind {
    ($(#[$meta:meta])* $name:ident, $ext:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            file: $crate::file::File,
        }

        impl $name {
            /// Extension every path of this kind carries.
            pub const EXTENSION: &'static str = $ext;

            pub fn path(&self) -> &$crate::path::EntityPath {
                self.file.path()
            }
        }

        impl AsRef<$crate::file::File> for $name {
            fn as_ref(&self) -> &$crate::file::File {
                &self.file
            }
        }
    };
}

/// The wrapping methods of [`FileType`] for a [`file_kind!`] newtype.
macro_rules! wrap_file {
    () => {
        fn from_file(file: $crate::file::File) -> Self {
            Self { file }
        }

        fn file(&self) -> &$crate::file::File {
            &self.file
        }

        fn file_mut(&mut self) -> &mut $crate::file::File {
            &mut self.file
        }

        fn into_file(self) -> $crate::file::File {
            self.file
        }
    };
}

mod json;
mod pickle;
mod text;
mod ui;

pub use json::JsonFile;
pub use pickle::{PickleValue, PklFile};
pub use text::{PyFile, TxtFile};
pub use ui::{UiFile, UI_TEMPLATE};

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use dccfs_common::{Error, Result};

use crate::content::Content;
use crate::directory::Directory;
use crate::file::File;
use crate::path::EntityPath;
use crate::tools::UiCompiler;

/// The kinds of entity the registry can map a key to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A bare path, used for paths that exist as neither file nor directory.
    Path,
    /// A directory.
    Directory,
    /// A file of any extension.
    File,
    /// A `.txt` file.
    Text,
    /// A `.json` file.
    Json,
    /// A `.pkl` file holding a binary-serialized value.
    Pickle,
    /// A `.py` source file.
    Python,
    /// A `.ui` interface definition.
    Ui,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Path,
        EntityKind::Directory,
        EntityKind::File,
        EntityKind::Text,
        EntityKind::Json,
        EntityKind::Pickle,
        EntityKind::Python,
        EntityKind::Ui,
    ];

    /// The extension a kind is bound to, `None` for the untyped kinds.
    pub fn declared_extension(self) -> Option<&'static str> {
        match self {
            Self::Path | Self::Directory | Self::File => None,
            Self::Text => Some(TxtFile::EXTENSION),
            Self::Json => Some(JsonFile::EXTENSION),
            Self::Pickle => Some(PklFile::EXTENSION),
            Self::Python => Some(PyFile::EXTENSION),
            Self::Ui => Some(UiFile::EXTENSION),
        }
    }

    /// Whether the kind wraps a regular file.
    pub fn is_file_kind(self) -> bool {
        !matches!(self, Self::Path | Self::Directory)
    }

    /// Type name used in error messages and listings.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Path => "EntityPath",
            Self::Directory => "Directory",
            Self::File => "File",
            Self::Text => "TxtFile",
            Self::Json => "JsonFile",
            Self::Pickle => "PklFile",
            Self::Python => "PyFile",
            Self::Ui => "UiFile",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Directory => write!(f, "directory"),
            Self::File => write!(f, "file"),
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Pickle => write!(f, "pickle"),
            Self::Python => write!(f, "python"),
            Self::Ui => write!(f, "ui"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s)
            .ok_or_else(|| format!("Invalid entity kind: {}", s))
    }
}

/// A file kind: a typed view over a [`File`].
pub trait FileType: Sized {
    /// Registry kind of this type.
    const KIND: EntityKind;

    /// Wrap a file without checking its extension.
    ///
    /// The factory uses this for registry-driven dispatch, where the registry
    /// entry is what binds the extension to the kind.
    fn from_file(file: File) -> Self;

    fn file(&self) -> &File;

    fn file_mut(&mut self) -> &mut File;

    fn into_file(self) -> File;

    /// Serialize dynamic content into file bytes; `None` yields the kind's
    /// default content.
    fn encode(content: Option<Content>) -> Result<Vec<u8>>;

    /// Deserialize file bytes into dynamic content.
    fn decode(bytes: &[u8]) -> Result<Content>;

    /// Wrap `path`, failing with [`Error::TypeMismatch`] if the kind declares
    /// an extension and the path carries another one.
    fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = EntityPath::new_file(path)?;
        ensure_extension(Self::KIND, &path)?;
        Ok(Self::from_file(File::from_path(path)))
    }

    /// Create (or overwrite) the file on disk with `content`.
    fn create(path: impl AsRef<Path>, content: Option<Content>) -> Result<Self> {
        let file = Self::new(path)?;
        file.write_content(content)?;
        tracing::debug!("created {} {}", Self::KIND.type_name(), file.file().path());
        Ok(file)
    }

    /// Read the file as dynamic content.
    fn read_content(&self) -> Result<Content> {
        Self::decode(&fs::read(self.file().path())?)
    }

    /// Replace the file's content; `None` writes the kind's default content.
    fn write_content(&self, content: Option<Content>) -> Result<()> {
        fs::write(self.file().path(), Self::encode(content)?)?;
        Ok(())
    }
}

/// Typed read capability.
pub trait Readable {
    type Output;

    fn read(&self) -> Result<Self::Output>;
}

/// Typed write capability.
pub trait Writable {
    type Input: ?Sized;

    fn write(&self, content: &Self::Input) -> Result<()>;
}

/// Compile capability: produce a derived file from this one.
pub trait Compilable {
    type Output;

    /// Compile into `target_directory`, defaulting to the source's directory.
    fn compile(
        &self,
        target_directory: Option<&Directory>,
        compiler: &dyn UiCompiler,
    ) -> Result<Self::Output>;
}

/// Reject paths whose extension differs from the one `kind` declares.
pub(crate) fn ensure_extension(kind: EntityKind, path: &EntityPath) -> Result<()> {
    match kind.declared_extension() {
        Some(expected) if path.extension().as_deref() != Some(expected) => {
            Err(Error::type_mismatch(path, kind.type_name(), expected))
        }
        _ => Ok(()),
    }
}

/// Decode UTF-8 text content.
pub(crate) fn decode_text(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_extensions() {
        assert_eq!(EntityKind::Json.declared_extension(), Some("json"));
        assert_eq!(EntityKind::Pickle.declared_extension(), Some("pkl"));
        assert_eq!(EntityKind::Ui.declared_extension(), Some("ui"));
        assert_eq!(EntityKind::File.declared_extension(), None);
        assert_eq!(EntityKind::Directory.declared_extension(), None);

        use dccfs_common::FileExtension;
        assert_eq!(TxtFile::EXTENSION, FileExtension::TXT);
        assert_eq!(PyFile::EXTENSION, FileExtension::PY);
    }

    #[test]
    fn test_kind_parse_roundtrip() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), kind);
        }
        assert!("yaml".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&EntityKind::Pickle).unwrap();
        assert_eq!(json, r#""pickle""#);
        let kind: EntityKind = serde_json::from_str(r#""python""#).unwrap();
        assert_eq!(kind, EntityKind::Python);
    }

    #[test]
    fn test_file_kinds() {
        assert!(!EntityKind::Path.is_file_kind());
        assert!(!EntityKind::Directory.is_file_kind());
        assert!(EntityKind::File.is_file_kind());
        assert!(EntityKind::Json.is_file_kind());
    }

    #[test]
    fn test_ensure_extension() {
        let json = EntityPath::new("/tmp/a.json").unwrap();
        let txt = EntityPath::new("/tmp/a.txt").unwrap();
        assert!(ensure_extension(EntityKind::Json, &json).is_ok());
        assert!(matches!(
            ensure_extension(EntityKind::Json, &txt),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(ensure_extension(EntityKind::File, &txt).is_ok());
    }
}
