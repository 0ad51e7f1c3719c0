//! Registry-driven construction of entities.

use std::path::Path;

use dccfs_common::{Error, Result};

use crate::content::Content;
use crate::directory::Directory;
use crate::entity::Entity;
use crate::file::File;
use crate::kinds::{EntityKind, FileType, JsonFile, PklFile, PyFile, TxtFile, UiFile};
use crate::path::EntityPath;
use crate::registry::TypeRegistry;

/// Turns paths into typed [`Entity`] values using a [`TypeRegistry`].
///
/// # Examples
///
/// ```no_run
/// use dccfs_files::{Entity, EntityFactory};
///
/// let factory = EntityFactory::default();
/// let entity = factory.create("/tmp/settings.json", None)?;
/// assert!(matches!(entity, Entity::Json(_)));
/// # Ok::<(), dccfs_common::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntityFactory {
    registry: TypeRegistry,
}

impl EntityFactory {
    pub fn new(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Wrap an existing path in the entity its registry entry names.
    ///
    /// Directories resolve to the `directory` entry whatever their name.
    /// Files resolve by extension, falling back to the `file` entry. Anything
    /// else is an [`Error::InvalidPath`].
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<Entity> {
        let path = EntityPath::new(path)?;

        let kind = if path.is_directory() {
            self.registry.directory_kind()
        } else if path.is_file() {
            self.registry.lookup(path.extension().as_deref())
        } else {
            return Err(Error::invalid_path(&path, "not an existing file or directory"));
        };

        Ok(instantiate(kind, path))
    }

    /// Like [`EntityFactory::resolve`], but a path that exists as neither
    /// file nor directory yields the `path` entry.
    pub fn resolve_or_path(&self, path: impl AsRef<Path>) -> Result<Entity> {
        let path = EntityPath::new(path)?;
        if path.is_directory() || path.is_file() {
            return self.resolve(path);
        }
        Ok(instantiate(self.registry.path_kind(), path))
    }

    /// Create (or overwrite) a file whose kind is chosen by its extension.
    ///
    /// `None` content writes the kind's default: `{}` for JSON, an empty map
    /// for pickles, a blank form for `.ui` files, and an empty file
    /// otherwise. Fails with [`Error::TypeMismatch`] when the extension is
    /// registered to a kind that declares a different one.
    pub fn create(&self, path: impl AsRef<Path>, content: Option<Content>) -> Result<Entity> {
        let path = EntityPath::new_file(path)?;

        if path.is_directory() {
            return Err(Error::destination_conflict(
                &path,
                "a directory exists at this path",
            ));
        }

        match self.registry.lookup(path.extension().as_deref()) {
            EntityKind::Text => TxtFile::create(path, content).map(Entity::from),
            EntityKind::Json => JsonFile::create(path, content).map(Entity::from),
            EntityKind::Pickle => PklFile::create(path, content).map(Entity::from),
            EntityKind::Python => PyFile::create(path, content).map(Entity::from),
            EntityKind::Ui => UiFile::create(path, content).map(Entity::from),
            EntityKind::File => File::create(path, content).map(Entity::from),
            // Registration only maps extensions to file kinds.
            kind @ (EntityKind::Path | EntityKind::Directory) => Err(Error::invalid_path(
                &path,
                format!("extension is registered to {kind}, not a file kind"),
            )),
        }
    }

    /// Create a directory and any missing parents.
    pub fn create_directory(&self, path: impl AsRef<Path>) -> Result<Directory> {
        Directory::create(path)
    }
}

fn instantiate(kind: EntityKind, path: EntityPath) -> Entity {
    match kind {
        EntityKind::Path => Entity::Path(path),
        EntityKind::Directory => Entity::Directory(Directory::from_path(path)),
        EntityKind::File => Entity::File(File::from_path(path)),
        EntityKind::Text => Entity::Text(TxtFile::from_file(File::from_path(path))),
        EntityKind::Json => Entity::Json(JsonFile::from_file(File::from_path(path))),
        EntityKind::Pickle => Entity::Pickle(PklFile::from_file(File::from_path(path))),
        EntityKind::Python => Entity::Python(PyFile::from_file(File::from_path(path))),
        EntityKind::Ui => Entity::Ui(UiFile::from_file(File::from_path(path))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_missing_path() {
        let dir = tempdir().unwrap();
        let factory = EntityFactory::default();
        assert_matches!(
            factory.resolve(dir.path().join("missing.json")),
            Err(Error::InvalidPath { .. })
        );
    }

    #[test]
    fn test_resolve_or_path_for_missing() {
        let dir = tempdir().unwrap();
        let factory = EntityFactory::default();
        let entity = factory.resolve_or_path(dir.path().join("later.json")).unwrap();
        assert_eq!(entity.kind(), EntityKind::Path);
        assert_eq!(entity.extension().as_deref(), Some("json"));
    }

    #[test]
    fn test_resolve_or_path_for_existing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        let factory = EntityFactory::default();
        let entity = factory.resolve_or_path(dir.path().join("notes.txt")).unwrap();
        assert_eq!(entity.kind(), EntityKind::Text);
    }

    #[test]
    fn test_create_over_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("taken.json")).unwrap();
        let factory = EntityFactory::default();
        assert_matches!(
            factory.create(dir.path().join("taken.json"), None),
            Err(Error::DestinationConflict { .. })
        );
    }

    #[test]
    fn test_create_with_trailing_separator() {
        let dir = tempdir().unwrap();
        let factory = EntityFactory::default();
        let target = format!("{}/out.json/", dir.path().display());
        assert_matches!(factory.create(&target, None), Err(Error::InvalidPath { .. }));
        assert!(!dir.path().join("out.json").exists());
    }

    #[test]
    fn test_create_directory_is_idempotent() {
        let dir = tempdir().unwrap();
        let factory = EntityFactory::default();
        let nested = dir.path().join("a").join("b");
        factory.create_directory(&nested).unwrap();
        let again = factory.create_directory(&nested).unwrap();
        assert!(again.exists());
    }

    #[test]
    fn test_instantiate_matches_kind() {
        let path = EntityPath::new("/tmp/anything.bin").unwrap();
        for kind in EntityKind::ALL {
            assert_eq!(instantiate(kind, path.clone()).kind(), kind);
        }
    }
}
