//! Error types for the profile renderer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Fatal failures of a profile render.
///
/// Problems with the logo are not represented here: they are logged and rendering continues.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The output directory could not be created.
    #[error("failed to create output directory {}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No usable font family was found.
    #[error("failed to load fonts")]
    FontLoad(#[source] genpdf::error::Error),

    /// The document could not be laid out or serialized.
    #[error("failed to render the profile document")]
    Render(#[source] genpdf::error::Error),

    /// The serialized document could not be written to disk.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Section bookmarks could not be embedded.
    #[cfg(feature = "bookmarks")]
    #[error("failed to add section bookmarks")]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}
