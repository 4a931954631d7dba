//! # Controller Tests
//!
//! End-to-end navigation through the menu controller using a recording
//! transport in place of the Telegram API.

use photo_gallery_bot::bot::{
    Delivered, MediaSource, MediaTransport, MenuController, Render, RenderTarget,
};
use photo_gallery_bot::catalog::MediaCatalog;
use photo_gallery_bot::content::InMemoryContent;
use photo_gallery_bot::error::GalleryError;
use photo_gallery_bot::localization::LocalizationManager;
use photo_gallery_bot::media_cache::{MediaHandle, RemoteMediaCache};
use photo_gallery_bot::navigation::{Navigation, Screen};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardButtonKind, MessageId};

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG: [u8; 11] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    const CHAT: ChatId = ChatId(42);
    const MESSAGE: MessageId = MessageId(7);

    /// Records every render and hands out sequential file ids
    #[derive(Default)]
    struct RecordingTransport {
        renders: Mutex<Vec<(RenderTarget, Render)>>,
        uploads: AtomicUsize,
        fail: AtomicBool,
    }

    impl RecordingTransport {
        fn failing() -> Self {
            let transport = Self::default();
            transport.fail.store(true, Ordering::SeqCst);
            transport
        }

        fn last(&self) -> (RenderTarget, Render) {
            self.renders.lock().unwrap().last().cloned().expect("nothing rendered")
        }

        fn count(&self) -> usize {
            self.renders.lock().unwrap().len()
        }
    }

    impl MediaTransport for RecordingTransport {
        async fn render(&self, target: RenderTarget, render: Render) -> Result<Delivered, GalleryError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(GalleryError::Transport(teloxide::RequestError::Api(
                    teloxide::ApiError::MessageNotModified,
                )));
            }

            let handle = match &render.media {
                MediaSource::Upload { file_name, .. } => {
                    let n = self.uploads.fetch_add(1, Ordering::SeqCst);
                    Some(MediaHandle::new(format!("file-id-{file_name}-{n}")))
                }
                MediaSource::Cached(handle) => Some(handle.clone()),
            };
            self.renders.lock().unwrap().push((target, render));
            Ok(Delivered { handle })
        }
    }

    fn controller() -> MenuController {
        let catalog = MediaCatalog::default();
        let content = catalog
            .iter()
            .chain(["menu.jpg"])
            .fold(InMemoryContent::new(), |content, entry| content.with_photo(entry, JPEG.to_vec()));

        MenuController::new(
            Arc::new(catalog),
            Arc::new(RemoteMediaCache::new()),
            Arc::new(content),
            Arc::new(LocalizationManager::new().unwrap()),
            "menu.jpg",
        )
    }

    fn payload(button: &InlineKeyboardButton) -> Navigation {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data.parse().unwrap(),
            other => panic!("unexpected button kind {other:?}"),
        }
    }

    /// Arrow buttons of a paged screen as (prev, next)
    fn arrows(render: &Render) -> (Option<Navigation>, Option<Navigation>) {
        let rows = &render.keyboard.inline_keyboard;
        assert_eq!(rows.len(), 2, "expected arrow row and back row");
        let mut prev = None;
        let mut next = None;
        for button in &rows[0] {
            match button.text.as_str() {
                "◀️" => prev = Some(payload(button)),
                "▶️" => next = Some(payload(button)),
                other => panic!("unexpected arrow {other}"),
            }
        }
        (prev, next)
    }

    #[tokio::test]
    async fn test_start_sends_new_menu_message() {
        let controller = controller();
        let transport = RecordingTransport::default();

        let rendered = controller
            .handle(&transport, RenderTarget::New(CHAT), Navigation::Menu, None)
            .await
            .unwrap();

        assert_eq!(rendered.screen, Screen::Menu);
        assert_eq!(rendered.index, None);

        let (target, render) = transport.last();
        assert_eq!(target, RenderTarget::New(CHAT));
        assert!(matches!(render.media, MediaSource::Upload { ref file_name, .. } if file_name == "menu.jpg"));
        assert!(render.caption.contains("photo gallery"));

        let entries: Vec<_> = render
            .keyboard
            .inline_keyboard
            .iter()
            .map(|row| payload(&row[0]))
            .collect();
        assert_eq!(
            entries,
            vec![Navigation::Gallery(0), Navigation::Carousel(0), Navigation::CarouselCached(0)]
        );
    }

    #[tokio::test]
    async fn test_gallery_stops_at_the_last_photo() {
        let controller = controller();
        let transport = RecordingTransport::default();
        let target = RenderTarget::Edit(CHAT, MESSAGE);

        let rendered = controller
            .handle(&transport, target, Navigation::Gallery(0), None)
            .await
            .unwrap();
        assert_eq!(rendered.index, Some(0));
        let (prev, mut next) = arrows(&transport.last().1);
        assert_eq!(prev, None);

        // Press "next" three times
        for _ in 0..3 {
            let navigation = next.expect("next button should be shown");
            controller.handle(&transport, target, navigation, None).await.unwrap();
            next = arrows(&transport.last().1).1;
        }
        let (_, render) = transport.last();
        assert!(matches!(render.media, MediaSource::Upload { ref file_name, .. } if file_name == "media_4.jpg"));
        let (prev, next_after_three) = arrows(&render);
        assert_eq!(prev, Some(Navigation::Gallery(2)));
        assert_eq!(next_after_three, Some(Navigation::Gallery(4)));

        // And once more reaches the end
        let rendered = controller
            .handle(&transport, target, Navigation::Gallery(4), None)
            .await
            .unwrap();
        assert_eq!(rendered.index, Some(4));
        assert_eq!(rendered.entry, "media_5.jpg");
        let (prev, next) = arrows(&transport.last().1);
        assert_eq!(prev, Some(Navigation::Gallery(3)));
        assert_eq!(next, None);
    }

    #[tokio::test]
    async fn test_gallery_clamps_forged_index() {
        let controller = controller();
        let transport = RecordingTransport::default();

        let rendered = controller
            .handle(&transport, RenderTarget::Edit(CHAT, MESSAGE), Navigation::Gallery(99), None)
            .await
            .unwrap();

        assert_eq!(rendered.index, Some(4));
        assert_eq!(arrows(&transport.last().1).1, None);
    }

    #[tokio::test]
    async fn test_carousel_wraps_backwards() {
        let controller = controller();
        let transport = RecordingTransport::default();
        let target = RenderTarget::Edit(CHAT, MESSAGE);

        controller.handle(&transport, target, Navigation::Carousel(0), None).await.unwrap();
        let (prev, next) = arrows(&transport.last().1);
        assert_eq!(prev, Some(Navigation::Carousel(-1)));
        assert_eq!(next, Some(Navigation::Carousel(1)));

        let rendered = controller
            .handle(&transport, target, prev.unwrap(), None)
            .await
            .unwrap();
        assert_eq!(rendered.index, Some(4));
        assert_eq!(rendered.entry, "media_5.jpg");
        let (prev, next) = arrows(&transport.last().1);
        assert!(prev.is_some() && next.is_some());

        // Past the end starts over
        let rendered = controller
            .handle(&transport, target, next.unwrap(), None)
            .await
            .unwrap();
        assert_eq!(rendered.index, Some(0));
    }

    #[tokio::test]
    async fn test_cached_carousel_reuses_uploaded_photo() {
        let controller = controller();
        let transport = RecordingTransport::default();
        let target = RenderTarget::Edit(CHAT, MESSAGE);

        // First view of media_2.jpg uploads the file
        let rendered = controller
            .handle(&transport, target, Navigation::CarouselCached(1), None)
            .await
            .unwrap();
        assert_eq!(rendered.entry, "media_2.jpg");
        assert_eq!(rendered.cache_hit, Some(false));
        let (_, render) = transport.last();
        assert!(matches!(render.media, MediaSource::Upload { .. }));
        assert!(render.caption.contains("🟠"));
        assert_eq!(
            controller.cache().lookup("media_2.jpg"),
            Some(MediaHandle::new("file-id-media_2.jpg-0"))
        );

        // Second view is served from the cache
        let rendered = controller
            .handle(&transport, target, Navigation::CarouselCached(1), None)
            .await
            .unwrap();
        assert_eq!(rendered.cache_hit, Some(true));
        let (_, render) = transport.last();
        assert_eq!(render.media, MediaSource::Cached(MediaHandle::new("file-id-media_2.jpg-0")));
        assert!(render.caption.contains("🟢"));
        assert_eq!(transport.uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_uncached_carousel_does_not_populate_cache() {
        let controller = controller();
        let transport = RecordingTransport::default();

        controller
            .handle(&transport, RenderTarget::Edit(CHAT, MESSAGE), Navigation::Carousel(2), None)
            .await
            .unwrap();

        assert!(controller.cache().is_empty());
    }

    #[tokio::test]
    async fn test_failed_upload_is_not_cached() {
        let controller = controller();
        let transport = RecordingTransport::failing();

        let err = controller
            .handle(&transport, RenderTarget::Edit(CHAT, MESSAGE), Navigation::CarouselCached(3), None)
            .await
            .unwrap_err();

        assert!(err.is_upstream());
        assert_eq!(controller.cache().lookup("media_4.jpg"), None);
        assert_eq!(transport.count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_callback_renders_nothing() {
        let controller = controller();
        let transport = RecordingTransport::default();
        let target = RenderTarget::Edit(CHAT, MESSAGE);

        for data in ["photo_gallery:abc", "start_menu:1", "", "carousel_with_cache:"] {
            let rendered = controller
                .handle_callback(&transport, target, data, None)
                .await
                .unwrap();
            assert_eq!(rendered, None, "{data:?} should not render");
        }

        assert_eq!(transport.count(), 0);
        assert!(controller.cache().is_empty());
    }

    #[tokio::test]
    async fn test_valid_callback_renders_screen() {
        let controller = controller();
        let transport = RecordingTransport::default();

        let rendered = controller
            .handle_callback(&transport, RenderTarget::Edit(CHAT, MESSAGE), "carousel_with_cache:2", None)
            .await
            .unwrap()
            .expect("valid payload should render");

        assert_eq!(rendered.entry, "media_3.jpg");
        assert_eq!(rendered.cache_hit, Some(false));
        assert_eq!(transport.count(), 1);
        assert!(controller.cache().lookup("media_3.jpg").is_some());

        let rendered = controller
            .handle_callback(&transport, RenderTarget::Edit(CHAT, MESSAGE), "start_menu", None)
            .await
            .unwrap()
            .expect("menu payload should render");
        assert_eq!(rendered.screen, Screen::Menu);
    }

    #[tokio::test]
    async fn test_missing_photo_renders_nothing() {
        let catalog = MediaCatalog::new(["media_1.jpg", "missing.jpg"]).unwrap();
        let content = InMemoryContent::new().with_photo("media_1.jpg", JPEG.to_vec());
        let controller = MenuController::new(
            Arc::new(catalog),
            Arc::new(RemoteMediaCache::new()),
            Arc::new(content),
            Arc::new(LocalizationManager::new().unwrap()),
            "menu.jpg",
        );
        let transport = RecordingTransport::default();

        let err = controller
            .handle(&transport, RenderTarget::Edit(CHAT, MESSAGE), Navigation::CarouselCached(1), None)
            .await
            .unwrap_err();

        assert!(matches!(err, GalleryError::Content { .. }));
        assert_eq!(transport.count(), 0);
        assert!(controller.cache().is_empty());
    }

    #[tokio::test]
    async fn test_captions_follow_user_language() {
        let controller = controller();
        let transport = RecordingTransport::default();

        controller
            .handle(&transport, RenderTarget::Edit(CHAT, MESSAGE), Navigation::Gallery(1), Some("fr-FR"))
            .await
            .unwrap();

        let (_, render) = transport.last();
        assert!(render.caption.contains("galerie"));
        assert_eq!(render.keyboard.inline_keyboard[1][0].text, "Retour au menu");
    }
}
