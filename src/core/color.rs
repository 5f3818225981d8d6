//! Player colors and their entry points on the shared track.

use serde::{Deserialize, Serialize};

/// One of the four seat colors.
///
/// Each color enters the 52-cell shared track at a fixed offset. The offsets
/// are 13 cells apart, so every color sees the same track layout relative to
/// its own entry cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
}

impl Color {
    /// All colors in seat order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

    /// Absolute track index of this color's entry cell (its position `0`).
    #[must_use]
    pub const fn entry_offset(self) -> usize {
        match self {
            Color::Green => 1,
            Color::Red => 14,
            Color::Blue => 27,
            Color::Yellow => 40,
        }
    }

    /// Lowercase name, used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Green => "green",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}
