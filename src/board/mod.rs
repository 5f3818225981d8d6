//! Board topology.
//!
//! Pure mapping from `(color, position, token)` to grid cells, plus the
//! collision and safe-square queries the rules build on.

pub mod topology;

pub use topology::{
    coordinates_for, is_safe_square, same_cell, track_index, Cell, FINISH_CELL,
    SAFE_TRACK_INDICES, TRACK_LEN,
};
