use crate::error::Result;
use crate::music_index::scanner::scan_music_dir;
use crate::path_utils::{expand_tilde, path_parts};
use crate::types::{AudioKind, ExtensionFilter};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Bucket order: by stem, then extension, then full path so that equal
/// paths end up adjacent.
#[inline]
fn bucket_order(a: &Path, b: &Path) -> Ordering {
    path_parts(a)
        .cmp(&path_parts(b))
        .then_with(|| a.cmp(b))
}

/// Audio files partitioned by kind. Each bucket is sorted by stem and holds
/// no duplicate paths. Paths are kept as discovered, never canonicalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIndex {
    buckets: BTreeMap<AudioKind, Vec<PathBuf>>,
}

impl FileIndex {
    /// Build an index from arbitrary paths. Unrecognized extensions are
    /// dropped.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut buckets: BTreeMap<AudioKind, Vec<PathBuf>> = BTreeMap::new();
        for path in paths {
            if let Some(kind) = AudioKind::from_path(&path) {
                buckets.entry(kind).or_default().push(path);
            }
        }

        for bucket in buckets.values_mut() {
            bucket.sort_by_cached_key(|path| (path_parts(path), path.clone()));
            bucket.dedup();
        }

        Self { buckets }
    }

    pub fn bucket(&self, kind: AudioKind) -> &[PathBuf] {
        self.buckets.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Owned copy of the requested buckets, concatenated in `AudioKind`
    /// order for `ExtensionFilter::All`.
    pub fn files(&self, filter: ExtensionFilter) -> Vec<PathBuf> {
        match filter {
            ExtensionFilter::All => self.buckets.values().flatten().cloned().collect(),
            ExtensionFilter::Only(kind) => self.bucket(kind).to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, path: &Path) -> bool {
        AudioKind::from_path(path).is_some_and(|kind| {
            self.bucket(kind)
                .binary_search_by(|probe| bucket_order(probe, path))
                .is_ok()
        })
    }

    /// Insert keeping the bucket sorted. Returns false if the path is already
    /// present or not an audio file.
    pub fn insert_sorted(&mut self, path: PathBuf) -> bool {
        let Some(kind) = AudioKind::from_path(&path) else {
            debug!("Not indexing {}: unrecognized extension", path.display());
            return false;
        };

        let bucket = self.buckets.entry(kind).or_default();
        match bucket.binary_search_by(|probe| bucket_order(probe, &path)) {
            Ok(_) => {
                warn!(
                    "Trying to insert a file that already exists: {}",
                    path.display()
                );
                false
            }
            Err(pos) => {
                bucket.insert(pos, path);
                true
            }
        }
    }

    /// Remove by full path equality. Searches every bucket since the path
    /// may carry any casing of its extension.
    pub fn remove(&mut self, path: &Path) -> bool {
        for bucket in self.buckets.values_mut() {
            if let Some(pos) = bucket.iter().position(|probe| probe == path) {
                bucket.remove(pos);
                return true;
            }
        }
        false
    }
}

/// The music directory and the audio files found under it.
#[derive(Debug, Default)]
pub struct PathIndex {
    root: Option<PathBuf>,
    files: FileIndex,
    generation: u64,
}

impl PathIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an index on `root`, scanning it immediately.
    pub fn with_root(root: &str) -> Result<Self> {
        let mut index = Self::new();
        index.set_root(Some(root))?;
        Ok(index)
    }

    /// Point the index at a new root and rebuild it. `None` clears the
    /// index. On error the previous root and files are left untouched.
    pub fn set_root(&mut self, root: Option<&str>) -> Result<()> {
        let Some(root) = root else {
            info!("Clearing music index");
            self.root = None;
            self.replace_index(FileIndex::default());
            return Ok(());
        };

        let root = expand_tilde(root);
        let files = scan_music_dir(&root)?;
        self.root = Some(root);
        self.replace_index(files);
        Ok(())
    }

    /// Rebuild from the current root. On error the index is left untouched.
    pub fn rescan(&mut self) -> Result<()> {
        let Some(root) = self.root.as_deref() else {
            return Ok(());
        };

        let files = scan_music_dir(root)?;
        self.replace_index(files);
        Ok(())
    }

    /// Snapshot of the indexed files. Mutating the returned vector has no
    /// effect on the index.
    pub fn get_files(&self, filter: ExtensionFilter) -> Vec<PathBuf> {
        self.files.files(filter)
    }

    /// Swap `old` for `new` after an external rename. Does nothing if `old`
    /// is not indexed.
    pub fn replace_file(&mut self, old: &Path, new: &Path) {
        if !self.files.remove(old) {
            debug!("replace_file: {} is not indexed", old.display());
            return;
        }

        self.files.insert_sorted(new.to_path_buf());
        self.generation = self.generation.wrapping_add(1);
        debug!("Replaced {} with {}", old.display(), new.display());
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn file_index(&self) -> &FileIndex {
        &self.files
    }

    /// Bumped on every rebuild or replacement.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn replace_index(&mut self, files: FileIndex) {
        self.files = files;
        self.generation = self.generation.wrapping_add(1);
    }
}
