//! Grid model and the slide/merge rules of the game.
//!
//! Everything here is plain data plus free functions over it; nothing in this
//! module knows about terminals, browsers or storage.
//!
//! Example
//! ```
//! use play_2048::engine::{self, Grid, Move};
//!
//! let mut grid = Grid::from_rows([
//!     [2, 2, 0, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//! ]);
//! assert!(engine::can_move(&grid, Move::Left));
//! let motions = engine::slide(&mut grid, Move::Left);
//! assert_eq!(motions.len(), 1);
//! assert_eq!(engine::commit_merges(&mut grid), 4);
//! assert_eq!(grid.rows()[0], [4, 0, 0, 0]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

mod cell;
mod grid;
mod ops;

pub use cell::{Cell, Tile, TileId};
pub use grid::{Grid, Group, CELL_COUNT, GRID_SIZE, MAX_TILE_VALUE};
pub use ops::{
    can_move, commit_merges, generate_tile_value, is_game_over, legal_moves, slide,
    spawn_random_tile, Motion,
};

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in the order legality is checked.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Map a DOM-style key name (`"ArrowUp"`, ...) to a direction.
    ///
    /// ```
    /// use play_2048::engine::Move;
    /// assert_eq!(Move::from_key("ArrowLeft"), Some(Move::Left));
    /// assert_eq!(Move::from_key("Enter"), None);
    /// ```
    pub fn from_key(name: &str) -> Option<Move> {
        match name {
            "ArrowUp" => Some(Move::Up),
            "ArrowDown" => Some(Move::Down),
            "ArrowLeft" => Some(Move::Left),
            "ArrowRight" => Some(Move::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}
