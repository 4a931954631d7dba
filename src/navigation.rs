//! # Navigation Module
//!
//! Parsing of callback payloads and chat commands into typed navigation
//! requests. Payloads look like `photo_gallery:3`; the menu is `start_menu`.

use std::fmt;
use std::str::FromStr;

use crate::error::GalleryError;
use crate::pagination::WrapMode;

/// The four screens the bot can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Menu,
    Gallery,
    Carousel,
    CarouselCached,
}

impl Screen {
    /// Screens reachable from the menu, in menu order
    pub const PAGED: [Screen; 3] = [Screen::Gallery, Screen::Carousel, Screen::CarouselCached];

    /// Callback payload prefix identifying the screen
    pub fn token(self) -> &'static str {
        match self {
            Screen::Menu => "start_menu",
            Screen::Gallery => "photo_gallery",
            Screen::Carousel => "photo_carousel",
            Screen::CarouselCached => "carousel_with_cache",
        }
    }

    /// Paging behaviour, `None` for the menu
    pub fn mode(self) -> Option<WrapMode> {
        match self {
            Screen::Menu => None,
            Screen::Gallery => Some(WrapMode::Bounded),
            Screen::Carousel | Screen::CarouselCached => Some(WrapMode::Circular),
        }
    }

    /// Navigation request for this screen at `index`
    pub fn at(self, index: i64) -> Navigation {
        match self {
            Screen::Menu => Navigation::Menu,
            Screen::Gallery => Navigation::Gallery(index),
            Screen::Carousel => Navigation::Carousel(index),
            Screen::CarouselCached => Navigation::CarouselCached(index),
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        [Screen::Menu, Screen::Gallery, Screen::Carousel, Screen::CarouselCached]
            .into_iter()
            .find(|screen| screen.token() == token)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A parsed callback payload
///
/// Indices are kept exactly as received; normalizing them is the job of
/// [`crate::pagination::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Menu,
    Gallery(i64),
    Carousel(i64),
    CarouselCached(i64),
}

impl Navigation {
    pub fn screen(self) -> Screen {
        match self {
            Navigation::Menu => Screen::Menu,
            Navigation::Gallery(_) => Screen::Gallery,
            Navigation::Carousel(_) => Screen::Carousel,
            Navigation::CarouselCached(_) => Screen::CarouselCached,
        }
    }

    pub fn index(self) -> Option<i64> {
        match self {
            Navigation::Menu => None,
            Navigation::Gallery(i) | Navigation::Carousel(i) | Navigation::CarouselCached(i) => {
                Some(i)
            }
        }
    }

    /// Callback data string that parses back into `self`
    pub fn to_payload(self) -> String {
        match self.index() {
            Some(index) => format!("{}:{index}", self.screen().token()),
            None => self.screen().token().to_string(),
        }
    }
}

impl FromStr for Navigation {
    type Err = GalleryError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let malformed = || GalleryError::MalformedInput(data.to_string());

        if data == Screen::Menu.token() {
            return Ok(Navigation::Menu);
        }

        let (token, raw_index) = data.split_once(':').ok_or_else(malformed)?;
        let screen = Screen::from_token(token)
            .filter(|screen| *screen != Screen::Menu)
            .ok_or_else(malformed)?;
        let index: i64 = raw_index.trim().parse().map_err(|_| malformed())?;

        Ok(screen.at(index))
    }
}

/// Text commands the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

impl Command {
    /// Parse the first word of a message, accepting the `/cmd@botname` form
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);

        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            _ => None,
        }
    }
}
