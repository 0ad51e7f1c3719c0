//! Binary-serialized value files.
//!
//! A `.pkl` file holds one [`PickleValue`] tree encoded with bincode. The
//! format is only meant to be read back by this library.

use std::fs;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use dccfs_common::{Error, FileExtension, Result};

use super::{EntityKind, FileType, Readable, Writable};
use crate::content::Content;

/// Self-describing value tree stored in pickle files.
///
/// bincode cannot deserialize schema-less data, so dynamic values travel
/// through this enum instead of [`serde_json::Value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PickleValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<PickleValue>),
    Map(Vec<(String, PickleValue)>),
}

impl PickleValue {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(Error::pickle)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(Error::pickle)
    }
}

impl From<Value> for PickleValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<PickleValue> for Value {
    fn from(value: PickleValue) -> Self {
        match value {
            PickleValue::Null => Value::Null,
            PickleValue::Bool(b) => Value::Bool(b),
            PickleValue::Int(i) => Value::from(i),
            PickleValue::UInt(u) => Value::from(u),
            // Non-finite floats have no JSON form.
            PickleValue::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            PickleValue::Str(s) => Value::String(s),
            PickleValue::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            PickleValue::Map(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

file_kind!(
    /// A `.pkl` file.
    PklFile,
    FileExtension::PKL
);

impl PklFile {
    /// Read the raw value tree.
    pub fn read_pickle(&self) -> Result<PickleValue> {
        PickleValue::from_bytes(&fs::read(self.path())?)
    }

    /// Deserialize the stored value into `T`.
    pub fn read_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.read()?)?)
    }

    /// Store `value`, replacing the file's content.
    pub fn write_as<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        self.write(&serde_json::to_value(value)?)
    }
}

impl FileType for PklFile {
    const KIND: EntityKind = EntityKind::Pickle;

    wrap_file!();

    fn encode(content: Option<Content>) -> Result<Vec<u8>> {
        let value = match content {
            Some(content) => PickleValue::from(content.into_value()),
            None => PickleValue::Map(Vec::new()),
        };
        value.to_bytes()
    }

    fn decode(bytes: &[u8]) -> Result<Content> {
        Ok(Content::Value(PickleValue::from_bytes(bytes)?.into()))
    }
}

impl Readable for PklFile {
    type Output = Value;

    fn read(&self) -> Result<Value> {
        Ok(self.read_pickle()?.into())
    }
}

impl Writable for PklFile {
    type Input = Value;

    fn write(&self, content: &Value) -> Result<()> {
        fs::write(self.path(), PickleValue::from(content.clone()).to_bytes()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pose {
        name: String,
        joints: Vec<f64>,
        frame: u32,
    }

    #[test]
    fn test_create_default_is_empty_map() {
        let dir = tempdir().unwrap();
        let file = PklFile::create(dir.path().join("cache.pkl"), None).unwrap();
        assert_eq!(file.read().unwrap(), json!({}));
        assert_eq!(file.read_pickle().unwrap(), PickleValue::Map(Vec::new()));
    }

    #[test]
    fn test_value_roundtrip() {
        let dir = tempdir().unwrap();
        let value = json!({
            "name": "shot010",
            "frames": [1001, 1002],
            "scale": 0.5,
            "big": u64::MAX,
            "negative": -3,
            "enabled": false,
            "missing": null
        });
        let file = PklFile::create(dir.path().join("shot.pkl"), Some(value.clone().into())).unwrap();
        assert_eq!(file.read().unwrap(), value);
    }

    #[test]
    fn test_typed_roundtrip() {
        let dir = tempdir().unwrap();
        let file = PklFile::create(dir.path().join("pose.pkl"), None).unwrap();
        let pose = Pose {
            name: "idle".into(),
            joints: vec![0.0, 1.5, -2.25],
            frame: 12,
        };
        file.write_as(&pose).unwrap();
        assert_eq!(file.read_as::<Pose>().unwrap(), pose);
    }

    #[test]
    fn test_text_content_is_pickled_string() {
        let dir = tempdir().unwrap();
        let file = PklFile::create(dir.path().join("s.pkl"), Some("hello".into())).unwrap();
        assert_eq!(file.read_pickle().unwrap(), PickleValue::Str("hello".into()));
    }

    #[test]
    fn test_corrupt_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.pkl");
        fs::write(&path, [0xff, 0xff, 0xff, 0xff]).unwrap();
        let file = PklFile::new(&path).unwrap();
        assert_matches!(file.read(), Err(Error::Pickle(_)));
    }

    #[test]
    fn test_non_finite_float_reads_as_null() {
        assert_eq!(Value::from(PickleValue::Float(f64::INFINITY)), Value::Null);
    }
}
