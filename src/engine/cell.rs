use log::warn;
use serde::{Deserialize, Serialize};

/// Stable identity of a tile for as long as it lives on the grid.
///
/// Adapters use it to match transition-end notifications to tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// A numbered game piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub x: usize,
    pub y: usize,
}

/// A fixed grid position.
///
/// Holds at most one settled tile and at most one tile waiting to merge into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    x: usize,
    y: usize,
    tile: Option<Tile>,
    incoming: Option<Tile>,
    merged_score: u32,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Cell { x, y, tile: None, incoming: None, merged_score: 0 }
    }

    #[inline]
    pub fn x(&self) -> usize { self.x }

    #[inline]
    pub fn y(&self) -> usize { self.y }

    /// The settled tile, if any.
    #[inline]
    pub fn tile(&self) -> Option<&Tile> { self.tile.as_ref() }

    /// The tile that slid onto this cell and merges into it on commit.
    #[inline]
    pub fn incoming(&self) -> Option<&Tile> { self.incoming.as_ref() }

    /// Value produced by the last merge committed on this cell (0 if none yet).
    #[inline]
    pub fn merged_score(&self) -> u32 { self.merged_score }

    #[inline]
    pub fn is_empty(&self) -> bool { self.tile.is_none() }

    #[inline]
    pub fn has_incoming(&self) -> bool { self.incoming.is_some() }

    /// True if `tile` may slide onto this cell: the cell is empty, or it holds
    /// an equal value and has not already accepted a merge this move.
    pub fn can_accept(&self, tile: &Tile) -> bool {
        match &self.tile {
            None => true,
            Some(settled) => !self.has_incoming() && settled.value == tile.value,
        }
    }

    pub(crate) fn link(&mut self, mut tile: Tile) {
        debug_assert!(self.tile.is_none(), "cell ({}, {}) already holds a tile", self.x, self.y);
        tile.x = self.x;
        tile.y = self.y;
        self.tile = Some(tile);
    }

    pub(crate) fn link_for_merge(&mut self, mut tile: Tile) {
        debug_assert!(self.incoming.is_none(), "cell ({}, {}) already has a pending merge", self.x, self.y);
        tile.x = self.x;
        tile.y = self.y;
        self.incoming = Some(tile);
    }

    pub(crate) fn unlink(&mut self) -> Option<Tile> { self.tile.take() }

    /// Fold the incoming tile into the settled one. Returns the merged value.
    ///
    /// A sum that would overflow `u32` is refused: the incoming tile stays
    /// pending and `None` is returned.
    pub(crate) fn merge(&mut self) -> Option<u32> {
        let incoming = self.incoming.take()?;
        let settled = self.tile.as_mut()?;
        let Some(value) = settled.value.checked_add(incoming.value) else {
            warn!("merge at ({}, {}) overflows: {} + {}", self.x, self.y, settled.value, incoming.value);
            self.incoming = Some(incoming);
            return None;
        };
        settled.value = value;
        self.merged_score = value;
        Some(value)
    }

    pub(crate) fn clear(&mut self) {
        self.tile = None;
        self.incoming = None;
        self.merged_score = 0;
    }
}
