//! Common error types used throughout dccfs.
//!
//! Every filesystem entity operation reports failures through [`Error`].
//! Errors are raised synchronously to the caller; nothing is retried and no
//! variant is recovered from inside the library.

use std::path::{Path, PathBuf};

/// Common error type for dccfs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operation needs an existing file or directory and none was found,
    /// or the entity at the path is the wrong kind for the operation.
    #[error("Invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// Human-readable description.
        reason: String,
    },

    /// A typed constructor or create was used on a path with another extension.
    #[error("{} is not a {kind} path (expected .{expected})", path.display())]
    TypeMismatch {
        /// The offending path.
        path: PathBuf,
        /// Name of the file kind that rejected the path.
        kind: String,
        /// Extension declared by that kind.
        expected: String,
    },

    /// A copy or rename target exists and cannot be replaced.
    #[error("Destination conflict at {}: {reason}", path.display())]
    DestinationConflict {
        /// The destination path.
        path: PathBuf,
        /// Human-readable description.
        reason: String,
    },

    /// Copy source and destination are the same path.
    #[error("Can't copy {} onto itself", path.display())]
    SelfCopy {
        /// The source path.
        path: PathBuf,
    },

    /// An unknown file filter name was supplied.
    #[error("Invalid file filter: {0} (expected one of: file, directory)")]
    InvalidFilter(String),

    /// A type registry entry was rejected.
    #[error("Invalid registration for '{key}': {reason}")]
    InvalidRegistration {
        /// Registry key of the rejected entry.
        key: String,
        /// Human-readable description.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary (pickle) encoding or decoding failed.
    #[error("Pickle error: {0}")]
    Pickle(String),

    /// An external tool (editor, UI compiler) is missing or failed.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool.
        tool: String,
        /// Human-readable error description.
        message: String,
    },
}

impl Error {
    /// Create a new InvalidPath error.
    pub fn invalid_path(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a new TypeMismatch error.
    pub fn type_mismatch(
        path: impl AsRef<Path>,
        kind: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            path: path.as_ref().to_path_buf(),
            kind: kind.into(),
            expected: expected.into(),
        }
    }

    /// Create a new DestinationConflict error.
    pub fn destination_conflict(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::DestinationConflict {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a new InvalidRegistration error.
    pub fn invalid_registration(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRegistration {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a new Pickle error from any displayable codec error.
    pub fn pickle(err: impl std::fmt::Display) -> Self {
        Self::Pickle(err.to_string())
    }

    /// Create a new Tool error.
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_path("/tmp/missing", "not an existing file or directory");
        assert_eq!(
            err.to_string(),
            "Invalid path /tmp/missing: not an existing file or directory"
        );

        let err = Error::type_mismatch("/tmp/a.txt", "JsonFile", "json");
        assert_eq!(err.to_string(), "/tmp/a.txt is not a JsonFile path (expected .json)");

        let err = Error::SelfCopy {
            path: PathBuf::from("/tmp/a.txt"),
        };
        assert_eq!(err.to_string(), "Can't copy /tmp/a.txt onto itself");

        let err = Error::InvalidFilter("files".into());
        assert_eq!(
            err.to_string(),
            "Invalid file filter: files (expected one of: file, directory)"
        );

        let err = Error::tool("editor", "not found");
        assert_eq!(err.to_string(), "Tool error [editor]: not found");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_error_constructors() {
        let err = Error::destination_conflict("/tmp/b", "read-only");
        assert!(matches!(err, Error::DestinationConflict { .. }));

        let err = Error::invalid_registration("directory", "must map to directory");
        assert!(matches!(err, Error::InvalidRegistration { ref key, .. } if key == "directory"));

        let err = Error::pickle("unexpected end of file");
        assert_eq!(err.to_string(), "Pickle error: unexpected end of file");
    }
}
