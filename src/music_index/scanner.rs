use crate::error::{Error, Result};
use crate::music_index::core::FileIndex;
use crate::types::AudioKind;
use ignore::{WalkBuilder, WalkState};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Walk `root` and collect every recognized audio file into a fresh index.
///
/// Symbolic links to directories are followed. Entries the walker cannot
/// read (permission denied, dangling links, link loops) are skipped so a
/// single bad subtree never aborts the scan.
pub fn scan_music_dir(root: &Path) -> Result<FileIndex> {
    if !root.is_dir() {
        return Err(Error::InvalidDirectory(root.to_path_buf()));
    }

    let scan_start = std::time::Instant::now();
    info!("SCAN_START: Scanning {} for audio files", root.display());

    // Audio libraries are plain directory trees; none of the ignore-file
    // conventions apply to them.
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .parents(false)
        .ignore(false)
        .git_ignore(false)
        .git_exclude(false)
        .git_global(false)
        .follow_links(true)
        .build_parallel();

    let found = Arc::new(Mutex::new(Vec::with_capacity(1024)));
    walker.run(|| {
        let found = Arc::clone(&found);

        Box::new(move |result| {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    debug!("SCAN_SKIP: {}", err);
                    return WalkState::Continue;
                }
            };

            let is_file = entry.file_type().is_some_and(|file_type| file_type.is_file());
            if is_file && AudioKind::from_path(entry.path()).is_some() {
                let mut paths = found.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                paths.push(entry.into_path());
            }
            WalkState::Continue
        })
    });

    let paths = std::mem::take(
        &mut *found.lock().unwrap_or_else(|poisoned| poisoned.into_inner()),
    );
    let index = FileIndex::from_paths(paths);

    info!(
        "SCAN_COMPLETE: Found {} audio files in {:?}",
        index.len(),
        scan_start.elapsed()
    );

    Ok(index)
}
