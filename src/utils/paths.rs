// Path Conversion Utilities
//
// Output files mirror the input tree. Each module is keyed by its path relative to the
// input root, Unix-style, with the source suffix removed ("pkg/sub/module"). Keys are
// joined back onto the output root with native separators.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::language::SOURCE_SUFFIX;

/// Convert a path under `root` to a relative Unix-style path (with `/` separators)
///
/// Both paths are canonicalized when possible so symlinked roots still match; if
/// either cannot be canonicalized the original paths are compared instead.
///
/// # Examples
/// ```text
/// to_relative_unix_style("/home/dev/project/src/main.py", "/home/dev/project")
/// // => "src/main.py"
/// ```
pub fn to_relative_unix_style(path: &Path, root: &Path) -> Result<String> {
    let (path_to_use, root_to_use) = match (path.canonicalize(), root.canonicalize()) {
        (Ok(canonical_path), Ok(canonical_root)) => (canonical_path, canonical_root),
        _ => (path.to_path_buf(), root.to_path_buf()),
    };

    let relative = path_to_use.strip_prefix(&root_to_use).with_context(|| {
        format!(
            "File path '{}' is not within input root '{}'",
            path_to_use.display(),
            root_to_use.display()
        )
    })?;

    let path_str = relative.to_str().context("Path contains invalid UTF-8")?;

    // On Unix, MAIN_SEPARATOR is already '/', so this is a no-op
    let unix_style = if MAIN_SEPARATOR == '\\' {
        path_str.replace('\\', "/")
    } else {
        path_str.to_string()
    };

    Ok(unix_style)
}

/// Output key of a module file: relative Unix-style path without the source suffix
///
/// Files that are not under `root` (or are `root` itself) fall back to their bare
/// file name.
pub fn module_key(path: &Path, root: &Path) -> String {
    let relative = match to_relative_unix_style(path, root) {
        Ok(relative) if !relative.is_empty() => relative,
        _ => path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default(),
    };

    let suffix = format!(".{}", SOURCE_SUFFIX);
    match relative.strip_suffix(&suffix) {
        Some(stem) => stem.to_string(),
        None => relative,
    }
}

/// Directory part of a key ("" for keys at the root)
pub fn key_parent(key: &str) -> &str {
    key.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Last segment of a key
pub fn key_leaf(key: &str) -> &str {
    key.rsplit_once('/').map_or(key, |(_, leaf)| leaf)
}

/// Convert a relative Unix-style key to a native path under `root`
pub fn to_absolute_native(relative_unix: &str, root: &Path) -> PathBuf {
    // Path::join accepts '/' on every platform
    root.join(relative_unix)
}
