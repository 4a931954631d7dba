//! UI Builder module for creating keyboards and captions

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::localization::LocalizationManager;
use crate::navigation::{Navigation, Screen};
use crate::pagination::PageView;

/// Create the menu keyboard: one button per paged screen, each entering at index 0
pub fn create_menu_keyboard(
    localization: &LocalizationManager,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    let rows = Screen::PAGED.into_iter().map(|screen| {
        let label_key = match screen {
            Screen::Gallery => "menu-gallery",
            Screen::Carousel => "menu-carousel",
            _ => "menu-carousel-cached",
        };
        vec![InlineKeyboardButton::callback(
            localization.t_lang(label_key, language_code),
            screen.at(0).to_payload(),
        )]
    });

    InlineKeyboardMarkup::new(rows)
}

/// Create the paging keyboard for `screen`
///
/// The arrow buttons carry the index they lead to, so the page in a callback
/// payload is the page to display.
pub fn create_navigation_keyboard(
    screen: Screen,
    view: PageView,
    localization: &LocalizationManager,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    let index = view.index as i64;
    let mut arrows = Vec::with_capacity(2);

    if view.show_prev {
        arrows.push(InlineKeyboardButton::callback(
            localization.t_lang("button-prev", language_code),
            screen.at(index - 1).to_payload(),
        ));
    }
    if view.show_next {
        arrows.push(InlineKeyboardButton::callback(
            localization.t_lang("button-next", language_code),
            screen.at(index + 1).to_payload(),
        ));
    }

    let mut rows = Vec::with_capacity(2);
    if !arrows.is_empty() {
        rows.push(arrows);
    }
    rows.push(vec![InlineKeyboardButton::callback(
        localization.t_lang("button-back", language_code),
        Navigation::Menu.to_payload(),
    )]);

    InlineKeyboardMarkup::new(rows)
}

/// Caption for `screen`, with the cache status line appended for the cached carousel
pub fn format_caption(
    screen: Screen,
    cache_hit: Option<bool>,
    localization: &LocalizationManager,
    language_code: Option<&str>,
) -> String {
    let key = match screen {
        Screen::Menu => "menu-caption",
        Screen::Gallery => "gallery-caption",
        Screen::Carousel => "carousel-caption",
        Screen::CarouselCached => "carousel-cached-caption",
    };
    let caption = localization.t_lang(key, language_code);

    match cache_hit {
        Some(true) => format!("{caption}\n\n{}", localization.t_lang("cache-status-hit", language_code)),
        Some(false) => format!("{caption}\n\n{}", localization.t_lang("cache-status-miss", language_code)),
        None => caption,
    }
}
