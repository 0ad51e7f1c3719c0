//! JSON files.

use std::fs;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use dccfs_common::{FileExtension, Result};

use super::{EntityKind, FileType, Readable, Writable};
use crate::content::Content;

/// Indentation used for every JSON document written.
const JSON_INDENT: &[u8] = b"    ";

file_kind!(
    /// A `.json` file. Documents are written pretty-printed with a four-space
    /// indent; object keys keep their insertion order.
    JsonFile,
    FileExtension::JSON
);

impl JsonFile {
    /// Deserialize the document into `T`.
    pub fn read_as<T: DeserializeOwned>(&self) -> Result<T> {
        let bytes = fs::read(self.path())?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Serialize `value` as the whole document.
    pub fn write_as<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        fs::write(self.path(), to_pretty_json(value)?)?;
        Ok(())
    }
}

impl FileType for JsonFile {
    const KIND: EntityKind = EntityKind::Json;

    wrap_file!();

    fn encode(content: Option<Content>) -> Result<Vec<u8>> {
        let value = match content.map(Content::into_value) {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(value) => value,
        };
        to_pretty_json(&value)
    }

    fn decode(bytes: &[u8]) -> Result<Content> {
        Ok(Content::Value(serde_json::from_slice(bytes)?))
    }
}

impl Readable for JsonFile {
    type Output = Value;

    fn read(&self) -> Result<Value> {
        self.read_as()
    }
}

impl Writable for JsonFile {
    type Input = Value;

    fn write(&self, content: &Value) -> Result<()> {
        self.write_as(content)
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
