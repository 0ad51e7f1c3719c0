//! Dynamic file content.

use serde_json::Value;

/// Payload passed to creation/write calls and returned by dynamic reads.
///
/// Text kinds store text verbatim; structured kinds (JSON, pickle) store a
/// value tree. Each kind converts whichever variant it receives.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Value(Value),
}

impl Content {
    /// Text form: strings verbatim, other values rendered as compact JSON.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) | Self::Value(Value::String(text)) => text,
            Self::Value(value) => value.to_string(),
        }
    }

    /// Value form: text becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            Self::Text(text) => Value::String(text),
            Self::Value(value) => value,
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_text() {
        assert_eq!(Content::from("plain").into_text(), "plain");
        assert_eq!(Content::from(json!("quoted")).into_text(), "quoted");
        assert_eq!(Content::from(json!({"k": 1})).into_text(), r#"{"k":1}"#);
        assert_eq!(Content::from(json!(null)).into_text(), "null");
    }

    #[test]
    fn test_into_value() {
        assert_eq!(Content::from("plain").into_value(), json!("plain"));
        assert_eq!(Content::from(json!([1, 2])).into_value(), json!([1, 2]));
    }
}
