//! Stable ordering of file lists.
//!
//! `ModTime` is newest-first by default; `reverse` flips that to oldest-first.
//! The other criteria are ascending by default.

use crate::path_utils::path_parts;
use crate::types::SortCriterion;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::warn;

#[inline]
fn modified_time(path: &Path) -> SystemTime {
    match std::fs::metadata(path).and_then(|metadata| metadata.modified()) {
        Ok(modified) => modified,
        Err(err) => {
            warn!("Cannot read modification time of {}: {}", path.display(), err);
            SystemTime::UNIX_EPOCH
        }
    }
}

#[inline]
fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Order `files` by `criterion`. Files with equal keys keep their relative
/// input order in both directions.
pub fn sort_files(files: &[PathBuf], criterion: SortCriterion, reverse: bool) -> Vec<PathBuf> {
    match criterion {
        SortCriterion::None => files.to_vec(),
        SortCriterion::Name => sort_by_key(files, reverse, |path| path_parts(path).stem),
        SortCriterion::Extension => sort_by_key(files, reverse, |path| {
            let parts = path_parts(path);
            (parts.extension, parts.stem)
        }),
        SortCriterion::ModTime => sort_by_key(files, !reverse, modified_time),
    }
}

/// Parse `criterion` and sort. Unknown criteria are rejected with
/// `Error::InvalidSortCriterion`.
pub fn sort_files_by(
    files: &[PathBuf],
    criterion: &str,
    reverse: bool,
) -> crate::Result<Vec<PathBuf>> {
    let criterion: SortCriterion = criterion.parse()?;
    Ok(sort_files(files, criterion, reverse))
}

fn sort_by_key<K, F>(files: &[PathBuf], descending: bool, key: F) -> Vec<PathBuf>
where
    K: Ord + Send,
    F: Fn(&Path) -> K + Sync,
{
    // Keys are computed once per file; for mod_time that is one stat call each.
    let mut keyed: Vec<(K, &PathBuf)> = files
        .par_iter()
        .map(|path| (key(path.as_path()), path))
        .collect();
    keyed.par_sort_by(|a, b| directed(a.0.cmp(&b.0), descending));
    keyed.into_iter().map(|(_, path)| path.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_none_is_identity() {
        let files = paths(&["z.mp3", "a.ogg", "m.mp3"]);
        assert_eq!(sort_files(&files, SortCriterion::None, false), files);
        assert_eq!(sort_files(&files, SortCriterion::None, true), files);
    }

    #[test]
    fn test_sort_by_name_is_stable() {
        let files = paths(&["b/song.ogg", "z/alpha.mp3", "a/song.mp3", "c/beta.mp3"]);
        assert_eq!(
            sort_files(&files, SortCriterion::Name, false),
            paths(&["z/alpha.mp3", "c/beta.mp3", "b/song.ogg", "a/song.mp3"])
        );
        assert_eq!(
            sort_files(&files, SortCriterion::Name, true),
            paths(&["b/song.ogg", "a/song.mp3", "c/beta.mp3", "z/alpha.mp3"])
        );
    }

    #[test]
    fn test_sort_by_extension_then_name() {
        let files = paths(&["b.ogg", "c.mp3", "a.ogg", "a.mp3", "x/c.mp3"]);
        assert_eq!(
            sort_files(&files, SortCriterion::Extension, false),
            paths(&["a.mp3", "c.mp3", "x/c.mp3", "a.ogg", "b.ogg"])
        );
    }

    #[test]
    fn test_mod_time_defaults_to_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let base = SystemTime::now() - Duration::from_secs(3600);
        let files: Vec<PathBuf> = ["f1.mp3", "f2.mp3", "f3.mp3"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let path = dir.path().join(name);
                let file = fs::File::create(&path).unwrap();
                file.set_modified(base + Duration::from_secs(60 * i as u64)).unwrap();
                path
            })
            .collect();

        let newest_first = sort_files(&files, SortCriterion::ModTime, false);
        assert_eq!(
            newest_first,
            vec![files[2].clone(), files[1].clone(), files[0].clone()]
        );
        assert_eq!(sort_files(&files, SortCriterion::ModTime, true), files);
    }

    #[test]
    fn test_mod_time_ties_keep_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let stamp = SystemTime::now() - Duration::from_secs(60);
        let files: Vec<PathBuf> = ["c.mp3", "a.mp3", "b.mp3"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::File::create(&path).unwrap().set_modified(stamp).unwrap();
                path
            })
            .collect();

        assert_eq!(sort_files(&files, SortCriterion::ModTime, false), files);
        assert_eq!(sort_files(&files, SortCriterion::ModTime, true), files);
    }

    #[test]
    fn test_unknown_criterion() {
        let files = paths(&["a.mp3"]);
        assert!(matches!(
            sort_files_by(&files, "size", false),
            Err(crate::Error::InvalidSortCriterion(c)) if c == "size"
        ));
        assert_eq!(sort_files_by(&files, "name", false).unwrap(), files);
    }
}
