//! Path helper functions

use std::path::Path;

/// `path` relative to `base`, joined with `/` on every platform
pub fn slash_relative(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
