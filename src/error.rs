//! # Error Module
//!
//! Error type shared by the catalog, pagination, content and rendering layers.

use thiserror::Error;

/// Errors raised while turning an inbound update into a rendered screen
#[derive(Error, Debug)]
pub enum GalleryError {
    /// Callback payload or command text that does not follow the expected format
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    /// The Telegram API rejected or failed a send/edit request
    #[error("Transport error: {0}")]
    Transport(#[from] teloxide::RequestError),
    /// Pagination produced an index outside the catalog
    #[error("Catalog index {index} out of range for {len} entries")]
    CatalogIndex { index: usize, len: usize },
    /// Photo bytes could not be read
    #[error("Failed to load media '{entry}': {source}")]
    Content {
        entry: String,
        #[source]
        source: std::io::Error,
    },
    /// Photo bytes are not in a format Telegram accepts as a photo
    #[error("Unsupported media '{0}'")]
    UnsupportedMedia(String),
    /// A catalog must contain at least one entry
    #[error("Media catalog is empty")]
    EmptyCatalog,
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;

impl GalleryError {
    /// Whether the error came from the remote side rather than from local input or data
    pub fn is_upstream(&self) -> bool {
        matches!(self, GalleryError::Transport(_))
    }
}
