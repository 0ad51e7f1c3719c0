//! Dccfs-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across dccfs:
//!
//! - **Error Handling**: The unified error type and result alias
//! - **Path Utilities**: The extension resolver and lexical path helpers
//! - **Core Types**: File filters, extension tokens, and path types
//!
//! # Examples
//!
//! ```
//! use dccfs_common::{Error, FileFilter, Result};
//! use dccfs_common::paths::extension;
//!
//! // Resolve extension tokens
//! assert_eq!(extension("scene/config.JSON").as_deref(), Some("json"));
//! assert_eq!(extension(".bashrc"), None);
//!
//! // Parse filters
//! let filter: FileFilter = "directory".parse().unwrap();
//! assert_eq!(filter, FileFilter::Directory);
//!
//! // Use common error types
//! fn example() -> Result<()> {
//!     Err(Error::invalid_path("/missing", "not an existing file or directory"))
//! }
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
