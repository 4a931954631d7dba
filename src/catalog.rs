//! # Media Catalog Module
//!
//! The fixed, ordered list of photos the gallery screens page through.

use std::num::NonZeroUsize;

use crate::error::{GalleryError, Result};

/// Photos shown when no catalog is configured
pub const DEFAULT_ENTRIES: [&str; 5] = [
    "media_1.jpg",
    "media_2.jpg",
    "media_3.jpg",
    "media_4.jpg",
    "media_5.jpg",
];

const DEFAULT_LEN: NonZeroUsize = match NonZeroUsize::new(DEFAULT_ENTRIES.len()) {
    Some(len) => len,
    None => panic!("default catalog is empty"),
};

/// Immutable, non-empty list of photo identifiers
///
/// Identifiers are opaque names handed to a [`crate::content::ContentProvider`];
/// the catalog never touches the filesystem itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCatalog {
    entries: Vec<String>,
    len: NonZeroUsize,
}

impl MediaCatalog {
    /// Build a catalog, rejecting empty lists and blank identifiers
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries
            .into_iter()
            .map(|entry| entry.into().trim().to_string())
            .collect();

        let Some(len) = NonZeroUsize::new(entries.len()) else {
            return Err(GalleryError::EmptyCatalog);
        };
        if let Some(pos) = entries.iter().position(|entry| entry.is_empty()) {
            return Err(GalleryError::Config(format!(
                "catalog entry {pos} is blank"
            )));
        }

        Ok(Self { entries, len })
    }

    pub fn len(&self) -> NonZeroUsize {
        self.len
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for MediaCatalog {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ENTRIES.iter().map(|s| s.to_string()).collect(),
            len: DEFAULT_LEN,
        }
    }
}
