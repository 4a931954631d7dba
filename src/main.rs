use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::info;
use tracing_subscriber::EnvFilter;

use photo_gallery_bot::bot::{self, MenuController};
use photo_gallery_bot::config::{BotConfig, LogFormat};
use photo_gallery_bot::content::DirectoryContent;
use photo_gallery_bot::localization::LocalizationManager;
use photo_gallery_bot::media_cache::RemoteMediaCache;

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env()?;

    // Initialize logging
    init_logging(config.log_format);

    info!("Starting Photo Gallery Telegram Bot");

    let content = DirectoryContent::new(config.media_dir.clone());
    info!(media_dir = %content.root().display(), photos = config.catalog.len().get(), "Checking media files");
    content.verify(config.catalog.iter().chain(std::iter::once(config.menu_photo.as_str())));

    let localization = LocalizationManager::new()?;

    let controller = Arc::new(MenuController::new(
        Arc::new(config.catalog.clone()),
        Arc::new(RemoteMediaCache::new()),
        Arc::new(content),
        Arc::new(localization),
        config.menu_photo.clone(),
    ));

    // Initialize the bot
    let bot = Bot::new(config.token);

    info!("Bot initialized, starting dispatcher");

    // Set up the dispatcher with the shared controller
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let controller = Arc::clone(&controller);
            move |bot: Bot, msg: Message| {
                let controller = Arc::clone(&controller);
                async move { bot::message_handler(bot, msg, controller).await }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let controller = Arc::clone(&controller);
            move |bot: Bot, q: CallbackQuery| {
                let controller = Arc::clone(&controller);
                async move { bot::callback_handler(bot, q, controller).await }
            }
        }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
