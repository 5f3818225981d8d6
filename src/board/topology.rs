//! Board geometry: 15×15 grid, shared circuit, bases and home stretches.
//!
//! Linear positions are relative to a token's owner. The shared circuit is
//! indexed absolutely (0..52); a color's position `p` on the track sits at
//! absolute index `(p + entry_offset) % 52`. Two tokens of any colors at the
//! same absolute index share a cell. Home-stretch cells belong to one color
//! and are never compared across colors.

use serde::{Deserialize, Serialize};

use crate::core::{Color, Position, Regime, Token, TokenId};

/// Number of cells on the shared circuit.
pub const TRACK_LEN: usize = 52;

/// Absolute circuit indices where captures never happen.
///
/// Each color's entry cell and the cell eight steps past it.
pub const SAFE_TRACK_INDICES: [usize; 8] = [1, 9, 14, 22, 27, 35, 40, 48];

/// A grid cell, `(row, col)` on the 15×15 board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

const fn c(row: u8, col: u8) -> Cell {
    Cell::new(row, col)
}

/// The shared circuit in absolute order.
const CIRCUIT: [Cell; TRACK_LEN] = [
    c(6, 0), c(6, 1), c(6, 2), c(6, 3), c(6, 4), c(6, 5),
    c(5, 6), c(4, 6), c(3, 6), c(2, 6), c(1, 6), c(0, 6),
    c(0, 7), c(0, 8),
    c(1, 8), c(2, 8), c(3, 8), c(4, 8), c(5, 8),
    c(6, 9), c(6, 10), c(6, 11), c(6, 12), c(6, 13), c(6, 14),
    c(7, 14), c(8, 14),
    c(8, 13), c(8, 12), c(8, 11), c(8, 10), c(8, 9),
    c(9, 8), c(10, 8), c(11, 8), c(12, 8), c(13, 8), c(14, 8),
    c(14, 7), c(14, 6),
    c(13, 6), c(12, 6), c(11, 6), c(10, 6), c(9, 6),
    c(8, 5), c(8, 4), c(8, 3), c(8, 2), c(8, 1), c(8, 0),
    c(7, 0),
];

/// Board center, where finished tokens rest.
pub const FINISH_CELL: Cell = Cell::new(7, 7);

const fn home_stretch(color: Color) -> [Cell; 6] {
    match color {
        Color::Green => [c(7, 1), c(7, 2), c(7, 3), c(7, 4), c(7, 5), c(7, 6)],
        Color::Red => [c(1, 7), c(2, 7), c(3, 7), c(4, 7), c(5, 7), c(6, 7)],
        Color::Blue => [c(7, 13), c(7, 12), c(7, 11), c(7, 10), c(7, 9), c(7, 8)],
        Color::Yellow => [c(13, 7), c(12, 7), c(11, 7), c(10, 7), c(9, 7), c(8, 7)],
    }
}

/// Top-left corner of each color's base yard.
const fn base_corner(color: Color) -> Cell {
    match color {
        Color::Green => c(1, 1),
        Color::Red => c(1, 10),
        Color::Yellow => c(10, 1),
        Color::Blue => c(10, 10),
    }
}

/// Absolute circuit index for a track position, `None` off the track.
#[must_use]
pub fn track_index(color: Color, position: Position) -> Option<usize> {
    match position.regime() {
        Regime::Track(step) => Some((step as usize + color.entry_offset()) % TRACK_LEN),
        _ => None,
    }
}

/// True when the position is on one of the safe circuit cells.
#[must_use]
pub fn is_safe_square(color: Color, position: Position) -> bool {
    track_index(color, position).is_some_and(|idx| SAFE_TRACK_INDICES.contains(&idx))
}

/// Grid cell of a token.
///
/// Base tokens occupy one of four yard slots keyed by `token`; track tokens
/// map through the circuit; home-stretch tokens index their color's lane;
/// finished tokens sit on the center.
#[must_use]
pub fn coordinates_for(color: Color, position: Position, token: TokenId) -> Cell {
    match position.regime() {
        Regime::Base => {
            let corner = base_corner(color);
            let slot = token.0 % 4;
            Cell::new(corner.row + slot / 2 + 1, corner.col + slot % 2 + 1)
        }
        Regime::Track(step) => CIRCUIT[(step as usize + color.entry_offset()) % TRACK_LEN],
        Regime::HomeStretch(step) => home_stretch(color)[step as usize],
        Regime::Finished => FINISH_CELL,
    }
}

/// Whether two tokens occupy the same cell.
///
/// Across colors only circuit cells can coincide. Tokens of the same color
/// also coincide in the home stretch; base tokens never share a slot.
#[must_use]
pub fn same_cell(a: &Token, b: &Token) -> bool {
    match (track_index(a.owner, a.position), track_index(b.owner, b.position)) {
        (Some(x), Some(y)) => x == y,
        (None, None) if a.owner == b.owner => {
            !a.position.is_base() && !a.position.is_finished() && a.position == b.position
        }
        _ => false,
    }
}
