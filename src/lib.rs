//! clid - music directory index and preferences for a terminal tag editor
//!
//! This crate scans a music directory into per-format buckets, searches and
//! sorts the result, and keeps the user's preferences with hooks that apply
//! a change to the running session without a restart.

pub mod database;
mod error;
pub mod library;
pub mod log;
pub mod music_index;
pub mod path_utils;
pub mod preview;
pub mod prefs;
pub mod score;
pub mod search;
pub mod session;
pub mod sort;
pub mod tags;
pub mod types;

pub use database::Database;
pub use error::{Error, Result, ValidationError};
pub use library::{Library, UiState};
pub use music_index::{FileIndex, PathIndex};
pub use prefs::{Action, PrefKey, PreferenceStore, Section};
pub use search::filename_search;
pub use session::Session;
pub use sort::{sort_files, sort_files_by};
pub use tags::{MemoryTagCodec, TagCodec, TagError, TagField, Tags};
pub use types::{AudioKind, ExtensionFilter, PathParts, SearchQuery, SortCriterion};
