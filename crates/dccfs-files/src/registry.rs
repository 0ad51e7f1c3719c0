//! Extension-keyed registry of entity kinds.
//!
//! The [`TypeRegistry`] maps lower-cased extension tokens to the
//! [`EntityKind`] used for files carrying them, plus three sentinel keys:
//!
//! - `file`: the fallback kind for unregistered extensions
//! - `directory`: the kind used for directories
//! - `path`: the kind used for paths that exist as neither
//!
//! A registry is plain data. Populate it during initialization, then move it
//! into an [`crate::EntityFactory`]; from then on it is only reachable through
//! shared references, so every registration happens before any lookup.

use std::collections::HashMap;

use dccfs_common::{Error, Result};

use crate::kinds::EntityKind;

/// Sentinel key for the generic file fallback.
pub const FILE_KEY: &str = "file";
/// Sentinel key for directories.
pub const DIRECTORY_KEY: &str = "directory";
/// Sentinel key for bare paths.
pub const PATH_KEY: &str = "path";

/// Mapping from extension token (or sentinel key) to entity kind.
///
/// # Examples
///
/// ```
/// use dccfs_files::{EntityKind, TypeRegistry};
///
/// let mut registry = TypeRegistry::default();
/// registry.register([("cfg", EntityKind::Json)]).unwrap();
///
/// assert_eq!(registry.lookup(Some("cfg")), EntityKind::Json);
/// assert_eq!(registry.lookup(Some("xyz")), EntityKind::File);
/// assert_eq!(registry.lookup(None), EntityKind::File);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    kinds: HashMap<String, EntityKind>,
}

impl TypeRegistry {
    /// A registry holding only the three sentinel entries.
    pub fn new() -> Self {
        let kinds = HashMap::from([
            (FILE_KEY.to_string(), EntityKind::File),
            (DIRECTORY_KEY.to_string(), EntityKind::Directory),
            (PATH_KEY.to_string(), EntityKind::Path),
        ]);
        Self { kinds }
    }

    /// Merge `entries` into the registry; the last entry for a key wins.
    ///
    /// Keys are lower-cased. `directory` must map to
    /// [`EntityKind::Directory`], `path` to [`EntityKind::Path`], and every
    /// other key to a file kind. Extension tokens must be a non-empty single
    /// token without dots or separators. If any entry is rejected nothing is
    /// merged.
    pub fn register<I, K>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, EntityKind)>,
        K: AsRef<str>,
    {
        let validated = entries
            .into_iter()
            .map(|(key, kind)| {
                let key = key.as_ref().to_lowercase();
                validate_entry(&key, kind)?;
                Ok((key, kind))
            })
            .collect::<Result<Vec<_>>>()?;

        for (key, kind) in validated {
            tracing::debug!("registered '{key}' -> {kind}");
            self.kinds.insert(key, kind);
        }

        Ok(())
    }

    /// The kind registered for exactly `key`.
    pub fn get(&self, key: &str) -> Option<EntityKind> {
        self.kinds.get(&key.to_lowercase()).copied()
    }

    /// The kind for a file extension token, falling back to the `file`
    /// sentinel when the token is absent or unregistered.
    pub fn lookup(&self, token: Option<&str>) -> EntityKind {
        token
            .and_then(|token| self.get(token))
            .unwrap_or_else(|| self.sentinel(FILE_KEY, EntityKind::File))
    }

    /// The kind used for directories.
    pub fn directory_kind(&self) -> EntityKind {
        self.sentinel(DIRECTORY_KEY, EntityKind::Directory)
    }

    /// The kind used for paths that exist as neither file nor directory.
    pub fn path_kind(&self) -> EntityKind {
        self.sentinel(PATH_KEY, EntityKind::Path)
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> Vec<(&str, EntityKind)> {
        let mut entries: Vec<_> = self
            .kinds
            .iter()
            .map(|(key, kind)| (key.as_str(), *kind))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    // Sentinels are inserted by `new` and can only be replaced, never removed.
    fn sentinel(&self, key: &str, bootstrap: EntityKind) -> EntityKind {
        self.kinds.get(key).copied().unwrap_or(bootstrap)
    }
}

impl Default for TypeRegistry {
    /// Sentinels plus the built-in kinds under their declared extensions.
    fn default() -> Self {
        let mut registry = Self::new();
        for kind in EntityKind::ALL {
            if let Some(ext) = kind.declared_extension() {
                registry.kinds.insert(ext.to_string(), kind);
            }
        }
        registry
    }
}

fn validate_entry(key: &str, kind: EntityKind) -> Result<()> {
    match key {
        DIRECTORY_KEY if kind != EntityKind::Directory => Err(Error::invalid_registration(
            key,
            format!("must map to directory, got {kind}"),
        )),
        PATH_KEY if kind != EntityKind::Path => Err(Error::invalid_registration(
            key,
            format!("must map to path, got {kind}"),
        )),
        DIRECTORY_KEY | PATH_KEY => Ok(()),
        _ if !kind.is_file_kind() => Err(Error::invalid_registration(
            key,
            format!("extensions must map to a file kind, got {kind}"),
        )),
        _ if key.is_empty() => Err(Error::invalid_registration(key, "empty extension token")),
        _ if key.contains(['.', '/', '\\']) || key.contains(char::is_whitespace) => Err(
            Error::invalid_registration(key, "extension tokens are a single segment without dots"),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_new_has_only_sentinels() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(FILE_KEY), Some(EntityKind::File));
        assert_eq!(registry.get(DIRECTORY_KEY), Some(EntityKind::Directory));
        assert_eq!(registry.get(PATH_KEY), Some(EntityKind::Path));
        assert_eq!(registry.lookup(Some("json")), EntityKind::File);
    }

    #[test]
    fn test_default_builtin_kinds() {
        let registry = TypeRegistry::default();
        assert_eq!(registry.lookup(Some("txt")), EntityKind::Text);
        assert_eq!(registry.lookup(Some("json")), EntityKind::Json);
        assert_eq!(registry.lookup(Some("pkl")), EntityKind::Pickle);
        assert_eq!(registry.lookup(Some("py")), EntityKind::Python);
        assert_eq!(registry.lookup(Some("ui")), EntityKind::Ui);
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_lookup_fallback() {
        let registry = TypeRegistry::default();
        assert_eq!(registry.lookup(Some("xyz")), EntityKind::File);
        assert_eq!(registry.lookup(None), EntityKind::File);
    }

    #[test]
    fn test_register_last_wins() {
        let mut registry = TypeRegistry::default();
        registry
            .register([("cfg", EntityKind::Json), ("cfg", EntityKind::Text)])
            .unwrap();
        assert_eq!(registry.lookup(Some("cfg")), EntityKind::Text);

        registry.register([("json", EntityKind::File)]).unwrap();
        assert_eq!(registry.lookup(Some("json")), EntityKind::File);
    }

    #[test]
    fn test_register_case_insensitive() {
        let mut registry = TypeRegistry::default();
        registry.register([("LOG", EntityKind::Text)]).unwrap();
        assert_eq!(registry.get("log"), Some(EntityKind::Text));
        assert_eq!(registry.lookup(Some("Log")), EntityKind::Text);
    }

    #[test]
    fn test_replace_file_fallback() {
        let mut registry = TypeRegistry::default();
        registry.register([(FILE_KEY, EntityKind::Text)]).unwrap();
        assert_eq!(registry.lookup(Some("xyz")), EntityKind::Text);
    }

    #[test]
    fn test_register_rejects_bad_sentinels() {
        let mut registry = TypeRegistry::default();
        assert_matches!(
            registry.register([(DIRECTORY_KEY, EntityKind::Json)]),
            Err(Error::InvalidRegistration { ref key, .. }) if key == "directory"
        );
        assert_matches!(
            registry.register([(PATH_KEY, EntityKind::File)]),
            Err(Error::InvalidRegistration { .. })
        );
        assert_matches!(
            registry.register([(FILE_KEY, EntityKind::Directory)]),
            Err(Error::InvalidRegistration { .. })
        );
    }

    #[test]
    fn test_register_rejects_bad_tokens() {
        let mut registry = TypeRegistry::default();
        for token in ["", "tar.gz", ".json", "a/b", "two words"] {
            assert_matches!(
                registry.register([(token, EntityKind::Text)]),
                Err(Error::InvalidRegistration { .. }),
                "token {token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_register_is_all_or_nothing() {
        let mut registry = TypeRegistry::default();
        let before = registry.clone();
        let result = registry.register([("cfg", EntityKind::Json), ("bad.token", EntityKind::Text)]);
        assert!(result.is_err());
        assert_eq!(registry, before);
    }

    #[test]
    fn test_entries_sorted() {
        let registry = TypeRegistry::default();
        let keys: Vec<_> = registry.entries().into_iter().map(|(k, _)| k).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert!(keys.contains(&"directory"));
    }
}
