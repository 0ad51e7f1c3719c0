//! Path utilities: the extension resolver and lexical path helpers.
//!
//! Everything here is pure string/component manipulation. Nothing touches the
//! filesystem except [`absolute`], which reads the current working directory
//! to anchor relative input.

use std::io;
use std::path::{is_separator, Component, Path, PathBuf};

/// Resolve the extension token of a path string.
///
/// Returns the text after the last dot of the final path segment, lower-cased.
/// Returns `None` when the final segment has no dot, when its only dots are
/// leading ones (dotfiles), when it ends in a dot, or when the path itself
/// ends in a separator (a directory never has an extension).
///
/// # Examples
///
/// ```
/// use dccfs_common::paths::extension;
///
/// assert_eq!(extension("config.json").as_deref(), Some("json"));
/// assert_eq!(extension("/renders/archive.tar.GZ").as_deref(), Some("gz"));
/// assert_eq!(extension(".bashrc"), None);
/// assert_eq!(extension("publish.v2/"), None);
/// ```
pub fn extension(path: &str) -> Option<String> {
    if path.ends_with(is_separator) {
        return None;
    }

    let name = path.rsplit(is_separator).next()?;
    let stem = name.trim_start_matches('.');
    let dot = stem.rfind('.')?;
    let ext = &stem[dot + 1..];

    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// Strip everything from the first extension dot of a file name.
///
/// Leading dots belong to the name, so `.config.json` becomes `.config` and
/// a bare dotfile is returned unchanged.
///
/// # Examples
///
/// ```
/// use dccfs_common::paths::strip_extensions;
///
/// assert_eq!(strip_extensions("rig.v001.ma"), "rig");
/// assert_eq!(strip_extensions(".bashrc"), ".bashrc");
/// ```
#[must_use]
pub fn strip_extensions(name: &str) -> &str {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].find('.') {
        Some(idx) => &name[..leading + idx],
        None => name,
    }
}

/// Normalize a path lexically: drop `.` components and fold `..` into the
/// preceding component. Symlinks are not resolved and the path need not
/// exist. `..` at the root stays at the root.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                // Relative paths keep leading `..` components.
                _ => normalized.push(".."),
            },
            Component::Normal(part) => normalized.push(part),
        }
    }

    normalized
}

/// Make a path absolute against the current working directory, then
/// [`normalize`] it.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_basic() {
        assert_eq!(extension("config.json").as_deref(), Some("json"));
        assert_eq!(extension("notes.txt").as_deref(), Some("txt"));
        assert_eq!(extension("/path/to/tool.py").as_deref(), Some("py"));
        assert_eq!(extension("relative/path/window.ui").as_deref(), Some("ui"));

        // Case insensitive
        assert_eq!(extension("CONFIG.JSON").as_deref(), Some("json"));
        assert_eq!(extension("Data.Pkl").as_deref(), Some("pkl"));
    }

    #[test]
    fn test_extension_last_dot_wins() {
        assert_eq!(extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension("rig.v001.ma").as_deref(), Some("ma"));
        assert_eq!(extension(".hidden.json").as_deref(), Some("json"));
    }

    #[test]
    fn test_extension_dotfiles() {
        assert_eq!(extension(".bashrc"), None);
        assert_eq!(extension("/home/user/.profile"), None);
        assert_eq!(extension("..double"), None);
    }

    #[test]
    fn test_extension_edge_cases() {
        assert_eq!(extension(""), None);
        assert_eq!(extension("no_extension"), None);
        assert_eq!(extension("trailing."), None);
        assert_eq!(extension("."), None);
        assert_eq!(extension(".."), None);

        // Dots in parent segments never leak into the token
        assert_eq!(extension("scenes.v2/shot010"), None);
    }

    #[test]
    fn test_extension_directory_paths() {
        assert_eq!(extension("publish.v2/"), None);
        assert_eq!(extension("/assets/textures.d/"), None);
    }

    #[test]
    fn test_strip_extensions() {
        assert_eq!(strip_extensions("config.json"), "config");
        assert_eq!(strip_extensions("archive.tar.gz"), "archive");
        assert_eq!(strip_extensions("no_extension"), "no_extension");
        assert_eq!(strip_extensions(".bashrc"), ".bashrc");
        assert_eq!(strip_extensions(".config.json"), ".config");
        assert_eq!(strip_extensions(""), "");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/a/b/")), PathBuf::from("/a/b"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("/a/../..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("a/b/..")), PathBuf::from("a"));
    }

    #[test]
    fn test_absolute() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute(Path::new("x/y.json")).unwrap(), cwd.join("x/y.json"));
        assert_eq!(absolute(Path::new("/x/./y")).unwrap(), PathBuf::from("/x/y"));
        assert!(absolute(Path::new("rel")).unwrap().is_absolute());
    }
}
