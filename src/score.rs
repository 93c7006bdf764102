use crate::path_utils::stem;
use rayon::prelude::*;
use std::path::PathBuf;

/// How well a fuzzy query matched one candidate. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FuzzyScore {
    /// Length in chars of the tightest window containing the query.
    pub window: usize,
    /// Char offset where that window starts.
    pub start: usize,
}

/// Find the tightest window of `haystack` that contains every char of
/// `needle` in order. Both inputs are expected to be lowercased already.
#[inline]
pub fn match_subsequence(needle: &[char], haystack: &[char]) -> Option<FuzzyScore> {
    let (&first, rest) = needle.split_first()?;
    let mut best: Option<FuzzyScore> = None;

    for (start, _) in haystack.iter().enumerate().filter(|&(_, &c)| c == first) {
        // Greedy forward matching yields the shortest window for this start.
        let mut end = start;
        let mut remaining = rest.iter().peekable();
        for (offset, &c) in haystack[start + 1..].iter().enumerate() {
            match remaining.peek() {
                Some(&&wanted) if wanted == c => {
                    remaining.next();
                    end = start + 1 + offset;
                }
                Some(_) => {}
                None => break,
            }
        }
        if remaining.peek().is_some() {
            // No later start can succeed once an earlier one ran out of text.
            break;
        }

        let score = FuzzyScore {
            window: end - start + 1,
            start,
        };
        if best.map_or(true, |current| score < current) {
            best = Some(score);
        }
    }

    best
}

#[inline]
fn lowercase_chars(text: &str) -> Vec<char> {
    text.to_lowercase().chars().collect()
}

/// Score every file whose stem fuzzily matches `query`, case-insensitively.
/// Returns `(index into files, score)` pairs ranked best first; equal scores
/// keep input order.
pub fn match_and_score_files(files: &[PathBuf], query: &str) -> Vec<(usize, FuzzyScore)> {
    let needle = lowercase_chars(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<(usize, FuzzyScore)> = files
        .par_iter()
        .enumerate()
        .filter_map(|(idx, file)| {
            let haystack = lowercase_chars(&stem(file));
            match_subsequence(&needle, &haystack).map(|score| (idx, score))
        })
        .collect();

    results.par_sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    results
}
