//! Boundary to the tag reader/writer.
//!
//! Decoding and encoding of tag formats happens behind [`TagCodec`]; the
//! index, search and sort code never looks at tag contents.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not a supported audio format", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Cannot read tags from {}: {message}", path.display())]
    Unreadable { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Title,
    Artist,
    Album,
    AlbumArtist,
    Genre,
    Date,
    Track,
    Comment,
}

/// Flat tag record. Missing fields are empty strings; a missing track number
/// is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
    pub genre: String,
    pub date: String,
    pub track: Option<u32>,
    pub comment: String,
}

impl Tags {
    /// Field value rendered as text.
    pub fn field(&self, field: TagField) -> String {
        match field {
            TagField::Title => self.title.clone(),
            TagField::Artist => self.artist.clone(),
            TagField::Album => self.album.clone(),
            TagField::AlbumArtist => self.album_artist.clone(),
            TagField::Genre => self.genre.clone(),
            TagField::Date => self.date.clone(),
            TagField::Track => self.track.map(|n| n.to_string()).unwrap_or_default(),
            TagField::Comment => self.comment.clone(),
        }
    }
}

pub trait TagCodec: Send {
    fn read_tags(&self, path: &Path) -> Result<Tags, TagError>;
    fn write_tags(&mut self, path: &Path, tags: &Tags) -> Result<(), TagError>;
}

/// Codec that keeps tags in memory. Unknown files read as empty tags as long
/// as they exist on disk.
#[derive(Debug, Default)]
pub struct MemoryTagCodec {
    tags: HashMap<PathBuf, Tags>,
}

impl MemoryTagCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, path: impl Into<PathBuf>, tags: Tags) -> Self {
        self.tags.insert(path.into(), tags);
        self
    }
}

impl TagCodec for MemoryTagCodec {
    fn read_tags(&self, path: &Path) -> Result<Tags, TagError> {
        if let Some(tags) = self.tags.get(path) {
            return Ok(tags.clone());
        }
        if path.exists() {
            Ok(Tags::default())
        } else {
            Err(TagError::NotFound(path.to_path_buf()))
        }
    }

    fn write_tags(&mut self, path: &Path, tags: &Tags) -> Result<(), TagError> {
        self.tags.insert(path.to_path_buf(), tags.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_rendering() {
        let tags = Tags {
            title: "Song".into(),
            track: Some(7),
            ..Default::default()
        };
        assert_eq!(tags.field(TagField::Title), "Song");
        assert_eq!(tags.field(TagField::Track), "7");
        assert_eq!(tags.field(TagField::Artist), "");
        assert_eq!(Tags::default().field(TagField::Track), "");
    }

    #[test]
    fn test_memory_codec_round_trip() {
        let mut codec = MemoryTagCodec::new();
        let path = Path::new("/nonexistent/a.mp3");
        assert_eq!(
            codec.read_tags(path),
            Err(TagError::NotFound(path.to_path_buf()))
        );

        let tags = Tags {
            artist: "Artist".into(),
            ..Default::default()
        };
        codec.write_tags(path, &tags).unwrap();
        assert_eq!(codec.read_tags(path).unwrap(), tags);
    }
}
