use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;

/// Audio file kinds the index recognizes. Declaration order is the bucket
/// order used when concatenating buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AudioKind {
    Mp3,
    Ogg,
}

impl AudioKind {
    pub const ALL: [AudioKind; 2] = [AudioKind::Mp3, AudioKind::Ogg];

    pub fn as_str(self) -> &'static str {
        match self {
            AudioKind::Mp3 => "mp3",
            AudioKind::Ogg => "ogg",
        }
    }

    /// Classify an extension (without the dot), ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        AudioKind::ALL.into_iter().find(|kind| kind.as_str() == ext)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for AudioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which buckets `get_files` should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtensionFilter {
    #[default]
    All,
    Only(AudioKind),
}

impl FromStr for ExtensionFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(ExtensionFilter::All);
        }
        AudioKind::from_extension(s)
            .map(ExtensionFilter::Only)
            .ok_or_else(|| Error::UnknownExtension(s.to_string()))
    }
}

impl From<AudioKind> for ExtensionFilter {
    fn from(kind: AudioKind) -> Self {
        ExtensionFilter::Only(kind)
    }
}

/// `(stem, extension)` of a path: the file name without directories, split at
/// the last dot. The extension carries no leading dot and keeps its case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PathParts {
    pub stem: String,
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub text: String,
    pub ignore_case: bool,
    pub fuzzy: bool,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ignore_case: false,
            fuzzy: false,
        }
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortCriterion {
    #[default]
    None,
    Name,
    Extension,
    ModTime,
}

impl FromStr for SortCriterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortCriterion::None),
            "name" => Ok(SortCriterion::Name),
            "extension" | "ext" => Ok(SortCriterion::Extension),
            "mod_time" => Ok(SortCriterion::ModTime),
            other => Err(Error::InvalidSortCriterion(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_kind_classification_ignores_case() {
        assert_eq!(AudioKind::from_extension("MP3"), Some(AudioKind::Mp3));
        assert_eq!(AudioKind::from_extension("Ogg"), Some(AudioKind::Ogg));
        assert_eq!(AudioKind::from_extension("flac"), None);
        assert_eq!(AudioKind::from_path(Path::new("a/b/d.MP3")), Some(AudioKind::Mp3));
        assert_eq!(AudioKind::from_path(Path::new("a/b/noext")), None);
    }

    #[test]
    fn extension_filter_parsing() {
        assert_eq!("all".parse::<ExtensionFilter>().unwrap(), ExtensionFilter::All);
        assert_eq!(
            "ogg".parse::<ExtensionFilter>().unwrap(),
            ExtensionFilter::Only(AudioKind::Ogg)
        );
        assert!(matches!(
            "wav".parse::<ExtensionFilter>(),
            Err(Error::UnknownExtension(ext)) if ext == "wav"
        ));
    }

    #[test]
    fn sort_criterion_parsing() {
        assert_eq!("mod_time".parse::<SortCriterion>().unwrap(), SortCriterion::ModTime);
        assert_eq!("ext".parse::<SortCriterion>().unwrap(), SortCriterion::Extension);
        assert!(matches!(
            "size".parse::<SortCriterion>(),
            Err(Error::InvalidSortCriterion(_))
        ));
    }
}
