//! # Photo Gallery Telegram Bot
//!
//! A Telegram bot that pages through a fixed list of photos with inline
//! keyboards: a bounded gallery, a looping carousel, and a looping carousel
//! that reuses Telegram file ids instead of uploading the same photo again.

pub mod bot;
pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod localization;
pub mod media_cache;
pub mod navigation;
pub mod pagination;
