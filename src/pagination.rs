//! # Pagination Module
//!
//! Maps a requested page and a navigation step onto the page that is actually
//! shown, together with which navigation buttons the keyboard should carry.

use std::num::NonZeroUsize;

/// How a screen behaves at the ends of its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Hard stop at the first and last photo
    Bounded,
    /// Paging past either end jumps to the other end
    Circular,
}

/// Navigation step applied to the current index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Stay,
    Next,
}

impl Direction {
    pub fn delta(self) -> i64 {
        match self {
            Direction::Prev => -1,
            Direction::Stay => 0,
            Direction::Next => 1,
        }
    }
}

/// Result of a pagination step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView {
    /// Always within `[0, len)`
    pub index: usize,
    pub show_prev: bool,
    pub show_next: bool,
}

/// Compute the next page
///
/// `current` comes straight from a callback payload and may be anything,
/// including values far outside the catalog. The function is total: it never
/// fails and never returns an index outside `[0, len)`.
///
/// * `Bounded` clamps the index to the catalog and hides the button that would
///   leave it.
/// * `Circular` resets an index past the end to `0` and an index before the
///   start to `len - 1`; both buttons are always shown.
///
/// # Examples
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use photo_gallery_bot::pagination::{advance, Direction, WrapMode};
///
/// let len = NonZeroUsize::new(5).unwrap();
/// let view = advance(0, Direction::Prev, len, WrapMode::Circular);
/// assert_eq!(view.index, 4);
/// assert!(view.show_prev && view.show_next);
/// ```
pub fn advance(current: i64, direction: Direction, len: NonZeroUsize, mode: WrapMode) -> PageView {
    let last = i64::try_from(len.get() - 1).unwrap_or(i64::MAX);
    let next = current.saturating_add(direction.delta());

    match mode {
        WrapMode::Bounded => {
            let index = next.clamp(0, last);
            PageView {
                index: index as usize,
                show_prev: index > 0,
                show_next: index < last,
            }
        }
        WrapMode::Circular => {
            let index = if next > last {
                0
            } else if next < 0 {
                last
            } else {
                next
            };
            PageView {
                index: index as usize,
                show_prev: true,
                show_next: true,
            }
        }
    }
}
