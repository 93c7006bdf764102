use std::path::PathBuf;

use crate::tags::TagError;

/// A preference value rejected by its validator. The message is meant to be
/// shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("\"{}\" is not a valid directory path", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("\"{0}\" is not a known preference")]
    UnknownPreference(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("\"{0}\" is not a valid sort parameter")]
    InvalidSortCriterion(String),

    #[error("\"{0}\" is not a recognized audio file extension")]
    UnknownExtension(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preference file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize preferences: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Tag(#[from] TagError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error was caused by user input rather than by the
    /// environment. User errors are reported on the status line and never
    /// abort the session.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDirectory(_)
                | Self::UnknownPreference(_)
                | Self::Validation(_)
                | Self::InvalidSortCriterion(_)
                | Self::UnknownExtension(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
