//! # dccfs-files
//!
//! Filesystem entities with extension-based type dispatch.
//!
//! This crate provides:
//!
//! - **Paths** ([`EntityPath`]) -- absolute, normalized path values with
//!   extension, base-name, and rename operations.
//! - **Entities** ([`File`], [`Directory`], [`Entity`]) -- files and
//!   directories, copying, renaming, and filtered directory listings.
//! - **File kinds** ([`kinds`]) -- typed newtypes for `.txt`, `.json`,
//!   `.pkl`, `.py`, and `.ui` files with kind-specific default content.
//! - **Type registry** ([`TypeRegistry`]) -- the extension-to-kind mapping,
//!   built once and injected into an [`EntityFactory`].
//! - **External tools** ([`tools`]) -- editor and UI compiler collaborators.
//!
//! # Examples
//!
//! ```no_run
//! use dccfs_files::{Content, ContentFilter, Directory, EntityFactory};
//!
//! let factory = EntityFactory::default();
//! let settings = factory.create("/tmp/shot/settings.json", None)?;
//! settings.write(Content::from(serde_json::json!({"fps": 24})))?;
//!
//! let shot = Directory::new("/tmp/shot")?;
//! for entity in shot.content(&factory, &ContentFilter::files().including(["json"]))? {
//!     println!("{} {}", entity.kind(), entity.path());
//! }
//! # Ok::<(), dccfs_common::Error>(())
//! ```

pub mod content;
pub mod directory;
pub mod entity;
pub mod factory;
pub mod file;
pub mod kinds;
pub mod path;
pub mod registry;
pub mod tools;

// ---- Re-exports for convenience ----

pub use content::Content;
pub use directory::{ContentFilter, Directory};
pub use entity::Entity;
pub use factory::EntityFactory;
pub use file::{CopyOptions, File};
pub use kinds::{
    Compilable, EntityKind, FileType, JsonFile, PickleValue, PklFile, PyFile, Readable, TxtFile,
    UiFile, Writable, UI_TEMPLATE,
};
pub use path::EntityPath;
pub use registry::TypeRegistry;
pub use tools::{CommandCompiler, CommandEditor, Editor, UiCompiler};

pub use dccfs_common::{Error, FileFilter, Result};
