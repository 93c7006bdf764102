use crate::database::Database;
use crate::error::{Error, Result, ValidationError};
use crate::music_index::PathIndex;
use crate::path_utils::display_path;
use crate::preview::PreviewFormat;
use crate::prefs::Action;
use crate::search::filename_search;
use crate::sort::sort_files;
use crate::tags::{TagCodec, Tags};
use crate::types::{ExtensionFilter, SearchQuery, SortCriterion};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Settings the UI reads on every redraw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub smooth_scroll: bool,
    pub vim_mode: bool,
    pub keymap: BTreeMap<Action, String>,
    /// Bumped whenever something on screen needs to be redrawn.
    pub redraws: u64,
}

/// Everything preference hooks reconfigure: the music index, the tag
/// preview and UI flags.
pub struct Library {
    index: PathIndex,
    codec: Box<dyn TagCodec>,
    preview_format: PreviewFormat,
    preview_cache: HashMap<PathBuf, String>,
    pub ui: UiState,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("index", &self.index)
            .field("preview_format", &self.preview_format)
            .field("ui", &self.ui)
            .finish_non_exhaustive()
    }
}

impl Library {
    pub fn new(codec: Box<dyn TagCodec>) -> Self {
        Self {
            index: PathIndex::new(),
            codec,
            preview_format: PreviewFormat::default(),
            preview_cache: HashMap::new(),
            ui: UiState::default(),
        }
    }

    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    /// Point the index at `music_dir` and rescan. Cached previews are
    /// dropped only if the scan succeeds.
    pub fn set_music_dir(&mut self, music_dir: &str) -> Result<()> {
        self.index.set_root(Some(music_dir))?;
        self.preview_cache.clear();
        Ok(())
    }

    pub fn rescan(&mut self) -> Result<()> {
        self.index.rescan()?;
        self.preview_cache.clear();
        Ok(())
    }

    pub fn preview_format(&self) -> &PreviewFormat {
        &self.preview_format
    }

    pub fn set_preview_format(&mut self, format: &str) -> std::result::Result<(), ValidationError> {
        self.preview_format = PreviewFormat::parse(format)?;
        self.preview_cache.clear();
        Ok(())
    }

    pub fn request_redraw(&mut self) {
        self.ui.redraws = self.ui.redraws.wrapping_add(1);
    }

    /// Files of the index narrowed by `query` and ordered by `criterion`.
    pub fn find_files(
        &self,
        filter: ExtensionFilter,
        query: &SearchQuery,
        criterion: SortCriterion,
        reverse: bool,
    ) -> Vec<PathBuf> {
        let files = self.index.get_files(filter);
        let found = filename_search(&files, query);
        sort_files(&found, criterion, reverse)
    }

    pub fn read_tags(&self, path: &Path) -> Result<Tags> {
        Ok(self.codec.read_tags(path)?)
    }

    pub fn write_tags(&mut self, path: &Path, tags: &Tags) -> Result<()> {
        self.codec.write_tags(path, tags)?;
        self.preview_cache.remove(path);
        debug!("Wrote tags to {}", path.display());
        Ok(())
    }

    /// Preview line for `path`, rendered with the current preview format.
    pub fn preview(&mut self, path: &Path) -> Result<String> {
        if let Some(cached) = self.preview_cache.get(path) {
            return Ok(cached.clone());
        }

        let tags = self.codec.read_tags(path)?;
        let rendered = self.preview_format.render(&tags);
        self.preview_cache.insert(path.to_path_buf(), rendered.clone());
        Ok(rendered)
    }

    /// Rename a file on disk and update the index to match.
    pub fn rename_file(&mut self, old: &Path, new: &Path) -> Result<()> {
        std::fs::rename(old, new).map_err(|e| Error::io(old, e))?;
        self.index.replace_file(old, new);
        self.preview_cache.remove(old);
        info!("Renamed {} to {}", old.display(), new.display());
        Ok(())
    }

    fn resolve(&self, item: &str) -> PathBuf {
        let path = Path::new(item);
        match self.index.root() {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Database for Library {
    /// Indexed files relative to the music directory.
    fn display_values(&self) -> Vec<String> {
        let root = self.index.root();
        self.index
            .get_files(ExtensionFilter::All)
            .iter()
            .map(|path| display_path(path, root))
            .collect()
    }

    fn describe_item(&mut self, item: &str) -> Option<String> {
        let path = self.resolve(item);
        match self.preview(&path) {
            Ok(preview) => Some(preview),
            Err(err) => {
                warn!("No preview for {}: {}", path.display(), err);
                None
            }
        }
    }
}
