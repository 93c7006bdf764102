//! Filename search over a list of indexed files.
//!
//! Matching always looks at the stem (file name without directories or
//! extension). Exact modes keep the input order; fuzzy mode ranks results by
//! how tightly the query matched.
//!
//! Fuzzy matching is case-insensitive no matter what `ignore_case` says.

use crate::path_utils::stem;
use crate::score::match_and_score_files;
use crate::types::SearchQuery;
use std::path::PathBuf;
use tracing::debug;

pub fn filename_search(files: &[PathBuf], query: &SearchQuery) -> Vec<PathBuf> {
    if query.text.is_empty() {
        return files.to_vec();
    }

    let time = std::time::Instant::now();
    let results: Vec<PathBuf> = if query.fuzzy {
        match_and_score_files(files, &query.text)
            .into_iter()
            .map(|(idx, _)| files[idx].clone())
            .collect()
    } else if query.ignore_case {
        let needle = query.text.to_lowercase();
        files
            .iter()
            .filter(|file| stem(file).to_lowercase().contains(&needle))
            .cloned()
            .collect()
    } else {
        files
            .iter()
            .filter(|file| stem(file).contains(&query.text))
            .cloned()
            .collect()
    };

    debug!(
        "Search '{}' (ignore_case={}, fuzzy={}): {} of {} files in {:?}",
        query.text,
        query.ignore_case,
        query.fuzzy,
        results.len(),
        files.len(),
        time.elapsed()
    );

    results
}
