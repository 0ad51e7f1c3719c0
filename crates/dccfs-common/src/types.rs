//! Core type definitions for file entities.
//!
//! All enums are serialized in lowercase, matching the names accepted on the
//! command line and in configuration files.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

/// Selects which kind of directory child a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFilter {
    /// Regular files.
    File,
    /// Directories.
    Directory,
}

impl FileFilter {
    /// Every filter, the default selection for a listing.
    pub const ALL: [FileFilter; 2] = [FileFilter::File, FileFilter::Directory];
}

impl fmt::Display for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

impl std::str::FromStr for FileFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "directory" => Ok(Self::Directory),
            _ => Err(Error::InvalidFilter(s.to_string())),
        }
    }
}

/// Whether a path is stored relative or absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// Relative to some base directory.
    Relative,
    /// Anchored at the filesystem root.
    Absolute,
}

impl PathType {
    /// Classify a path without touching the filesystem.
    pub fn of(path: &std::path::Path) -> Self {
        if path.is_absolute() {
            Self::Absolute
        } else {
            Self::Relative
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative => write!(f, "relative"),
            Self::Absolute => write!(f, "absolute"),
        }
    }
}

/// Extension tokens of the built-in file kinds.
pub struct FileExtension;

impl FileExtension {
    pub const JSON: &'static str = "json";
    pub const PKL: &'static str = "pkl";
    pub const PY: &'static str = "py";
    pub const TXT: &'static str = "txt";
    pub const UI: &'static str = "ui";
}
