//! Qt Designer interface definitions.

use dccfs_common::{Error, FileExtension, Result};

use super::{decode_text, Compilable, EntityKind, FileType, PyFile, Readable, Writable};
use crate::content::Content;
use crate::directory::Directory;
use crate::tools::UiCompiler;

/// Written when a `.ui` file is created without content: an empty 400x300
/// `QWidget` form.
pub const UI_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ui version="4.0">
 <class>Form</class>
 <widget class="QWidget" name="Form">
  <property name="geometry">
   <rect>
    <x>0</x>
    <y>0</y>
    <width>400</width>
    <height>300</height>
   </rect>
  </property>
  <property name="windowTitle">
   <string>Form</string>
  </property>
 </widget>
 <resources/>
 <connections/>
</ui>
"#;

file_kind!(
    /// A `.ui` file.
    UiFile,
    FileExtension::UI
);

impl FileType for UiFile {
    const KIND: EntityKind = EntityKind::Ui;

    wrap_file!();

    fn encode(content: Option<Content>) -> Result<Vec<u8>> {
        let text = content.map(Content::into_text).unwrap_or_default();
        if text.is_empty() {
            Ok(UI_TEMPLATE.as_bytes().to_vec())
        } else {
            Ok(text.into_bytes())
        }
    }

    fn decode(bytes: &[u8]) -> Result<Content> {
        decode_text(bytes).map(Content::Text)
    }
}

impl Readable for UiFile {
    type Output = String;

    fn read(&self) -> Result<String> {
        self.file.read_text()
    }
}

impl Writable for UiFile {
    type Input = str;

    fn write(&self, content: &str) -> Result<()> {
        self.file.write_text(content)
    }
}

impl Compilable for UiFile {
    type Output = PyFile;

    /// Compile into `<stem>.py`, where `<stem>` is the file name minus `.ui`.
    fn compile(
        &self,
        target_directory: Option<&Directory>,
        compiler: &dyn UiCompiler,
    ) -> Result<PyFile> {
        let target_directory = match target_directory {
            Some(directory) => directory.clone(),
            None => self.file.directory(),
        };

        if !target_directory.path().is_directory() {
            return Err(Error::invalid_path(
                target_directory.path(),
                "compile target is not an existing directory",
            ));
        }

        let stem = self
            .path()
            .as_path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target = target_directory.path().join(format!("{stem}.{}", PyFile::EXTENSION));

        tracing::info!("compiling {} -> {}", self.path(), target);
        compiler.compile(self.path().as_path(), target.as_path())?;

        PyFile::new(target)
    }
}
