//! Plain-text kinds.

use dccfs_common::{FileExtension, Result};

use super::{decode_text, EntityKind, FileType, Readable, Writable};
use crate::content::Content;

file_kind!(
    /// A `.txt` file.
    TxtFile,
    FileExtension::TXT
);

file_kind!(
    /// A `.py` source file.
    PyFile,
    FileExtension::PY
);

impl PyFile {
    /// Name the file is importable under.
    pub fn module_name(&self) -> String {
        self.file.base_name(false)
    }
}

impl FileType for TxtFile {
    const KIND: EntityKind = EntityKind::Text;

    wrap_file!();

    fn encode(content: Option<Content>) -> Result<Vec<u8>> {
        Ok(content.map(Content::into_text).unwrap_or_default().into_bytes())
    }

    fn decode(bytes: &[u8]) -> Result<Content> {
        decode_text(bytes).map(Content::Text)
    }
}

impl FileType for PyFile {
    const KIND: EntityKind = EntityKind::Python;

    wrap_file!();

    fn encode(content: Option<Content>) -> Result<Vec<u8>> {
        TxtFile::encode(content)
    }

    fn decode(bytes: &[u8]) -> Result<Content> {
        TxtFile::decode(bytes)
    }
}

impl Readable for TxtFile {
    type Output = String;

    fn read(&self) -> Result<String> {
        self.file.read_text()
    }
}

impl Writable for TxtFile {
    type Input = str;

    fn write(&self, content: &str) -> Result<()> {
        self.file.write_text(content)
    }
}

impl Readable for PyFile {
    type Output = String;

    fn read(&self) -> Result<String> {
        self.file.read_text()
    }
}

impl Writable for PyFile {
    type Input = str;

    fn write(&self, content: &str) -> Result<()> {
        self.file.write_text(content)
    }
}
