//! # Configuration Module
//!
//! Runtime settings read from the environment (optionally via a `.env` file).

use std::path::PathBuf;

use crate::catalog::MediaCatalog;
use crate::error::{GalleryError, Result};

pub const DEFAULT_MEDIA_DIR: &str = "media";
pub const DEFAULT_MENU_PHOTO: &str = "menu.jpg";

/// Log output style for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Settings for one bot process
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token (`TELEGRAM_BOT_TOKEN`)
    pub token: String,
    /// Directory holding the photos (`MEDIA_DIR`)
    pub media_dir: PathBuf,
    /// Photo shown with the menu (`MENU_PHOTO`)
    pub menu_photo: String,
    /// Photos to page through (`GALLERY_PHOTOS`, comma-separated)
    pub catalog: MediaCatalog,
    /// `LOG_FORMAT=json` switches to JSON log lines
    pub log_format: LogFormat,
}

impl BotConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let token = non_empty("TELEGRAM_BOT_TOKEN")
            .ok_or_else(|| GalleryError::Config("TELEGRAM_BOT_TOKEN must be set".to_string()))?;

        let media_dir = non_empty("MEDIA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MEDIA_DIR));

        let menu_photo = non_empty("MENU_PHOTO").unwrap_or_else(|| DEFAULT_MENU_PHOTO.to_string());

        let catalog = match non_empty("GALLERY_PHOTOS") {
            Some(list) => MediaCatalog::new(list.split(',').filter(|s| !s.trim().is_empty()))?,
            None => MediaCatalog::default(),
        };

        let log_format = match non_empty("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(GalleryError::Config(format!(
                    "LOG_FORMAT must be 'text' or 'json', got '{other}'"
                )))
            }
        };

        Ok(Self {
            token,
            media_dir,
            menu_photo,
            catalog,
            log_format,
        })
    }
}
