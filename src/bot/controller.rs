//! Menu controller: turns a navigation request into a rendered screen

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::catalog::MediaCatalog;
use crate::content::{validate_photo, ContentProvider};
use crate::error::{GalleryError, Result};
use crate::localization::LocalizationManager;
use crate::media_cache::RemoteMediaCache;
use crate::navigation::{Navigation, Screen};
use crate::pagination::{advance, Direction};

use super::transport::{MediaSource, MediaTransport, Render, RenderTarget};
use super::ui_builder::{create_menu_keyboard, create_navigation_keyboard, format_caption};

/// Summary of a screen that was rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub screen: Screen,
    /// Catalog index shown, `None` for the menu
    pub index: Option<usize>,
    pub entry: String,
    /// Only set for the cached carousel
    pub cache_hit: Option<bool>,
}

/// Process-scoped state shared by every handler invocation
pub struct MenuController {
    catalog: Arc<MediaCatalog>,
    cache: Arc<RemoteMediaCache>,
    content: Arc<dyn ContentProvider>,
    localization: Arc<LocalizationManager>,
    menu_photo: String,
}

impl MenuController {
    pub fn new(
        catalog: Arc<MediaCatalog>,
        cache: Arc<RemoteMediaCache>,
        content: Arc<dyn ContentProvider>,
        localization: Arc<LocalizationManager>,
        menu_photo: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            cache,
            content,
            localization,
            menu_photo: menu_photo.into(),
        }
    }

    pub fn catalog(&self) -> &MediaCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &RemoteMediaCache {
        &self.cache
    }

    pub fn localization(&self) -> &LocalizationManager {
        &self.localization
    }

    /// Parse raw callback data and render the screen it names
    ///
    /// Malformed data is logged and yields `Ok(None)`: nothing is rendered and
    /// the cache is not touched.
    pub async fn handle_callback<T: MediaTransport>(
        &self,
        transport: &T,
        target: RenderTarget,
        data: &str,
        language_code: Option<&str>,
    ) -> Result<Option<Rendered>> {
        let navigation = match data.parse::<Navigation>() {
            Ok(navigation) => navigation,
            Err(e) => {
                warn!(data, error = %e, "Ignoring malformed callback data");
                return Ok(None);
            }
        };

        self.handle(transport, target, navigation, language_code)
            .await
            .map(Some)
    }

    /// Render the screen requested by `navigation` to `target`
    ///
    /// For the cached carousel the cache is consulted first; a miss uploads
    /// the bytes and records the returned handle only once the transport has
    /// confirmed the render.
    pub async fn handle<T: MediaTransport>(
        &self,
        transport: &T,
        target: RenderTarget,
        navigation: Navigation,
        language_code: Option<&str>,
    ) -> Result<Rendered> {
        let screen = navigation.screen();
        let (Some(mode), Some(requested)) = (screen.mode(), navigation.index()) else {
            return self.render_menu(transport, target, language_code).await;
        };

        let len = self.catalog.len();
        let view = advance(requested, Direction::Stay, len, mode);
        let entry = self
            .catalog
            .get(view.index)
            .ok_or(GalleryError::CatalogIndex { index: view.index, len: len.get() })?
            .to_string();
        debug!(%screen, requested, index = view.index, %entry, "Resolved page");

        let keyboard = create_navigation_keyboard(screen, view, &self.localization, language_code);

        if screen != Screen::CarouselCached {
            let render = Render {
                media: self.upload_source(&entry)?,
                caption: format_caption(screen, None, &self.localization, language_code),
                keyboard,
            };
            transport.render(target, render).await?;
            return Ok(Rendered { screen, index: Some(view.index), entry, cache_hit: None });
        }

        if let Some(handle) = self.cache.lookup(&entry) {
            debug!(%entry, %handle, "Serving photo from cache");
            let render = Render {
                media: MediaSource::Cached(handle),
                caption: format_caption(screen, Some(true), &self.localization, language_code),
                keyboard,
            };
            transport.render(target, render).await?;
            return Ok(Rendered { screen, index: Some(view.index), entry, cache_hit: Some(true) });
        }

        let render = Render {
            media: self.upload_source(&entry)?,
            caption: format_caption(screen, Some(false), &self.localization, language_code),
            keyboard,
        };
        let delivered = transport.render(target, render).await?;

        match delivered.handle {
            Some(handle) => {
                info!(%entry, %handle, "Cached uploaded photo");
                self.cache.store(&entry, handle);
            }
            None => warn!(%entry, "Upload succeeded but no file id was returned"),
        }

        Ok(Rendered { screen, index: Some(view.index), entry, cache_hit: Some(false) })
    }

    async fn render_menu<T: MediaTransport>(
        &self,
        transport: &T,
        target: RenderTarget,
        language_code: Option<&str>,
    ) -> Result<Rendered> {
        let render = Render {
            media: self.upload_source(&self.menu_photo)?,
            caption: format_caption(Screen::Menu, None, &self.localization, language_code),
            keyboard: create_menu_keyboard(&self.localization, language_code),
        };
        transport.render(target, render).await?;

        Ok(Rendered {
            screen: Screen::Menu,
            index: None,
            entry: self.menu_photo.clone(),
            cache_hit: None,
        })
    }

    fn upload_source(&self, entry: &str) -> Result<MediaSource> {
        let bytes = self.content.load(entry).inspect_err(|e| {
            error!(%entry, error = %e, "Failed to load photo");
        })?;
        validate_photo(entry, &bytes)?;

        Ok(MediaSource::Upload { file_name: entry.to_string(), bytes })
    }
}
