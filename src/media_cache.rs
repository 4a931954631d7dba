//! # Remote Media Cache Module
//!
//! Remembers the Telegram file identifier issued for each uploaded photo so
//! later renders can reference it instead of uploading the bytes again.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Opaque identifier Telegram returns for an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaHandle(String);

impl MediaHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MediaHandle {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Process-wide map from catalog entry to its remote handle
///
/// Keys are catalog identifiers, so the map is bounded by the catalog size and
/// needs no eviction.
///
/// # Thread Safety
///
/// The internal lock is only held for the duration of a single map operation,
/// never across an upload. Two handlers that see the same entry for the first
/// time at once will both upload and both store; the last write wins and
/// either handle is valid.
#[derive(Debug, Default)]
pub struct RemoteMediaCache {
    handles: Mutex<HashMap<String, MediaHandle>>,
}

impl RemoteMediaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle previously stored for `key`, if any
    pub fn lookup(&self, key: &str) -> Option<MediaHandle> {
        let handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.get(key).cloned()
    }

    /// Record `handle` for `key`, replacing any earlier value
    ///
    /// Must only be called after the transport confirmed the upload.
    pub fn store(&self, key: &str, handle: MediaHandle) {
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = handles.insert(key.to_string(), handle) {
            log::debug!("Replaced cached handle {previous} for {key}");
        }
    }

    pub fn len(&self) -> usize {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
