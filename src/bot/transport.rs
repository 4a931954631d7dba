//! Transport module: the single outbound operation the controller needs,
//! implemented for the teloxide `Bot`.

use std::future::Future;

use teloxide::prelude::*;
use teloxide::types::{FileId, InlineKeyboardMarkup, InputFile, InputMedia, InputMediaPhoto, MessageId};

use crate::error::GalleryError;
use crate::media_cache::MediaHandle;

/// Where a rendered screen goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// Send a new message to the chat (first contact)
    New(ChatId),
    /// Replace the photo, caption and keyboard of an existing message
    Edit(ChatId, MessageId),
}

/// Photo to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Raw bytes that have to be uploaded
    Upload { file_name: String, bytes: Vec<u8> },
    /// A file Telegram already has
    Cached(MediaHandle),
}

/// One complete screen: photo, caption and keyboard
#[derive(Debug, Clone)]
pub struct Render {
    pub media: MediaSource,
    pub caption: String,
    pub keyboard: InlineKeyboardMarkup,
}

/// What the transport reports back after a successful render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivered {
    /// Identifier of the photo as stored by Telegram, when the response carried one
    pub handle: Option<MediaHandle>,
}

/// Outbound side of the bot
///
/// A render either fully succeeds or returns an error; there is no partial
/// screen.
pub trait MediaTransport: Sync {
    fn render(
        &self,
        target: RenderTarget,
        render: Render,
    ) -> impl Future<Output = Result<Delivered, GalleryError>> + Send;
}

impl MediaSource {
    fn into_input_file(self) -> InputFile {
        match self {
            MediaSource::Upload { file_name, bytes } => InputFile::memory(bytes).file_name(file_name),
            MediaSource::Cached(handle) => InputFile::file_id(FileId(handle.as_str().to_string())),
        }
    }
}

/// Largest photo size in the message, which is the one worth caching
fn delivered_from(message: &Message) -> Delivered {
    let handle = message
        .photo()
        .and_then(|sizes| sizes.last())
        .map(|size| MediaHandle::new(size.file.id.0.clone()));
    Delivered { handle }
}

impl MediaTransport for Bot {
    async fn render(&self, target: RenderTarget, render: Render) -> Result<Delivered, GalleryError> {
        let Render { media, caption, keyboard } = render;
        let photo = media.into_input_file();

        let message = match target {
            RenderTarget::New(chat_id) => {
                self.send_photo(chat_id, photo)
                    .caption(caption)
                    .reply_markup(keyboard)
                    .await?
            }
            RenderTarget::Edit(chat_id, message_id) => {
                let media = InputMedia::Photo(InputMediaPhoto::new(photo).caption(caption));
                self.edit_message_media(chat_id, message_id, media)
                    .reply_markup(keyboard)
                    .await?
            }
        };

        Ok(delivered_from(&message))
    }
}
