//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles `/start`, `/help` and other messages
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `controller`: Picks the page, consults the media cache and renders
//! - `transport`: The outbound render operation and its teloxide implementation
//! - `ui_builder`: Creates keyboards and captions

pub mod callback_handler;
pub mod controller;
pub mod message_handler;
pub mod transport;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

pub use controller::{MenuController, Rendered};
pub use transport::{Delivered, MediaSource, MediaTransport, Render, RenderTarget};
