//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::MessageKind;
use tracing::{debug, error};

use crate::navigation::{Command, Navigation};

use super::controller::MenuController;
use super::transport::RenderTarget;

/// Whether a message that is not a command should get the usage hint
///
/// Only regular messages in private chats qualify; group chatter and service
/// messages (joins, pins, title changes) are left alone.
pub fn wants_hint(msg: &Message) -> bool {
    msg.chat.is_private() && matches!(msg.kind, MessageKind::Common(_))
}

pub async fn message_handler(bot: Bot, msg: Message, controller: Arc<MenuController>) -> Result<()> {
    // Extract user's language code from Telegram
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_ref())
        .map(|s| s.as_str());

    match msg.text().and_then(Command::parse) {
        Some(Command::Start) => {
            debug!(user_id = %msg.chat.id, "Opening menu");
            // First contact: the menu arrives as a new message, later screens edit it
            if let Err(e) = controller
                .handle(&bot, RenderTarget::New(msg.chat.id), Navigation::Menu, language_code)
                .await
            {
                error!(user_id = %msg.chat.id, error = %e, "Failed to send menu");
            }
        }
        Some(Command::Help) => {
            bot.send_message(msg.chat.id, controller.localization().t_lang("help-text", language_code))
                .await?;
        }
        None if wants_hint(&msg) => {
            bot.send_message(msg.chat.id, controller.localization().t_lang("text-hint", language_code))
                .await?;
        }
        None => debug!(chat_id = %msg.chat.id, "Ignoring message"),
    }

    Ok(())
}
