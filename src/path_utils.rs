use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::types::PathParts;

/// Expand a leading `~` to the home directory. Other forms (`~user`) are left
/// untouched, as is everything when no home directory can be determined.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, BaseDirs::new()) {
        (Some(rest), Some(dirs)) if rest.is_empty() => dirs.home_dir().to_path_buf(),
        (Some(rest), Some(dirs)) => dirs.home_dir().join(rest),
        _ => PathBuf::from(path),
    }
}

#[inline]
pub fn path_parts(path: &Path) -> PathParts {
    let stem = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let extension = path
        .extension()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();

    PathParts { stem, extension }
}

#[inline]
pub fn stem(path: &Path) -> String {
    path_parts(path).stem
}

/// Path shown to the user: relative to `root` when possible, otherwise as is.
pub fn display_path(path: &Path, root: Option<&Path>) -> String {
    root.and_then(|root| pathdiff::diff_paths(path, root))
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
