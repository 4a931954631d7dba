//! # Content Module
//!
//! Loads photo bytes for catalog entries. The controller only sees the
//! [`ContentProvider`] trait, so catalog identifiers are not tied to paths.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{GalleryError, Result};

/// Minimum bytes required for format detection
pub const MIN_FORMAT_BYTES: usize = 8;

/// Source of raw photo bytes keyed by catalog identifier
pub trait ContentProvider: Send + Sync {
    fn load(&self, entry: &str) -> Result<Vec<u8>>;
}

/// Reads photos from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryContent {
    root: PathBuf,
}

impl DirectoryContent {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check that every entry exists as a file
    ///
    /// Returns the entries that are missing. Nothing fails here: a missing
    /// photo only breaks the screen that shows it.
    pub fn verify<'a>(&self, entries: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let missing: Vec<String> = entries
            .into_iter()
            .filter(|entry| !self.root.join(entry).is_file())
            .map(str::to_string)
            .collect();

        for entry in &missing {
            warn!("Media file {} not found in {}", entry, self.root.display());
        }
        if missing.is_empty() {
            info!("All media files present in {}", self.root.display());
        }

        missing
    }
}

impl ContentProvider for DirectoryContent {
    fn load(&self, entry: &str) -> Result<Vec<u8>> {
        // Identifiers are plain file names, never paths
        if entry.contains(['/', '\\']) || entry == ".." {
            return Err(GalleryError::UnsupportedMedia(entry.to_string()));
        }

        fs::read(self.root.join(entry)).map_err(|source| GalleryError::Content {
            entry: entry.to_string(),
            source,
        })
    }
}

/// Photos held in memory, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct InMemoryContent {
    photos: HashMap<String, Vec<u8>>,
}

impl InMemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_photo(mut self, entry: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.photos.insert(entry.into(), bytes.into());
        self
    }
}

impl ContentProvider for InMemoryContent {
    fn load(&self, entry: &str) -> Result<Vec<u8>> {
        self.photos
            .get(entry)
            .cloned()
            .ok_or_else(|| GalleryError::Content {
                entry: entry.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such photo"),
            })
    }
}

/// Validate that `bytes` hold an image Telegram accepts as a photo
///
/// Uses `image::guess_format` on the file header; JPEG, PNG, GIF and WEBP
/// pass, everything else is rejected.
pub fn validate_photo(entry: &str, bytes: &[u8]) -> Result<image::ImageFormat> {
    if bytes.len() < MIN_FORMAT_BYTES {
        warn!(
            "Could not read enough bytes to determine image format for {} (read {} bytes, need at least {})",
            entry,
            bytes.len(),
            MIN_FORMAT_BYTES
        );
        return Err(GalleryError::UnsupportedMedia(entry.to_string()));
    }

    match image::guess_format(bytes) {
        Ok(
            format @ (image::ImageFormat::Jpeg
            | image::ImageFormat::Png
            | image::ImageFormat::Gif
            | image::ImageFormat::WebP),
        ) => Ok(format),
        Ok(format) => {
            warn!("Detected unsupported image format: {format:?} for {entry}");
            Err(GalleryError::UnsupportedMedia(entry.to_string()))
        }
        Err(e) => {
            warn!("Could not determine image format for {entry} - {e}");
            Err(GalleryError::UnsupportedMedia(entry.to_string()))
        }
    }
}
