/// Core error types for MTag
use crate::flavor::TagOrigin;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using `MTagError`
pub type Result<T> = std::result::Result<T, MTagError>;

/// Core error type for MTag
///
/// A missing tag flavor is not an error: lookups report it as `None`.
#[derive(Error, Debug)]
pub enum MTagError {
    /// The engine could not open or recognise the file
    #[error("Unsupported or unreadable file '{}': {reason}", path.display())]
    OpenFailure { path: PathBuf, reason: String },

    /// Field access on a tag whose native resource does not exist
    #[error("Tag {origin} is not present in this file")]
    FieldAccessOnAbsentTag { origin: TagOrigin },

    /// The owning file has been closed
    #[error("File has been closed")]
    Closed,

    /// Persisting the file failed
    #[error("Failed to save '{}': {reason}", path.display())]
    Save { path: PathBuf, reason: String },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MTagError {
    /// Create an open failure for `path`
    pub fn open_failure(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::OpenFailure {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a save failure for `path`
    pub fn save(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Save {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::FlavorId;

    #[test]
    fn open_failure_names_the_path() {
        let err = MTagError::open_failure("/music/missing.mp3", "not found");
        let msg = err.to_string();
        assert!(msg.contains("/music/missing.mp3"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn absent_tag_names_the_flavor() {
        let err = MTagError::FieldAccessOnAbsentTag {
            origin: TagOrigin::Flavor(FlavorId::new("ape")),
        };
        assert_eq!(err.to_string(), "Tag 'ape' is not present in this file");
    }
}
