//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, error, info};

use super::controller::MenuController;
use super::transport::RenderTarget;

/// Handle callback queries from inline keyboards
///
/// Malformed payloads and failed renders are logged and otherwise ignored so
/// the dispatcher keeps running. The query is always answered to clear the
/// button's loading state.
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    controller: Arc<MenuController>,
) -> Result<()> {
    let data = q.data.as_deref().unwrap_or("");
    debug!(user_id = %q.from.id, data, "Received callback query from user");

    match &q.message {
        Some(msg) => {
            let language_code = q.from.language_code.as_deref();
            let target = RenderTarget::Edit(msg.chat().id, msg.id());

            match controller.handle_callback(&bot, target, data, language_code).await {
                Ok(Some(rendered)) => info!(
                    user_id = %q.from.id,
                    screen = %rendered.screen,
                    index = ?rendered.index,
                    cache_hit = ?rendered.cache_hit,
                    "Rendered screen"
                ),
                Ok(None) => debug!(user_id = %q.from.id, "Nothing rendered for callback"),
                Err(e) if e.is_upstream() => {
                    error!(user_id = %q.from.id, error = %e, "Failed to edit message for callback")
                }
                Err(e) => error!(user_id = %q.from.id, error = %e, "Failed to prepare screen"),
            }
        }
        None => debug!(user_id = %q.from.id, "Callback query without a message, ignoring"),
    }

    // Answer the callback query to remove the loading state
    bot.answer_callback_query(q.id).await?;

    Ok(())
}
