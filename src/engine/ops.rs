use log::debug;
use rand::Rng;

use super::cell::{Tile, TileId};
use super::grid::{Grid, Group};
use super::Move;

/// One tile relocation produced by [`slide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub tile: TileId,
    pub from: (usize, usize),
    pub to: (usize, usize),
    /// True when the tile lands on an equal tile and merges into it on commit.
    pub merges: bool,
}

/// Slide every tile toward the leading edge of `dir`.
///
/// Tiles landing on an equal, not yet merging tile are parked as that cell's
/// incoming tile; call [`commit_merges`] once the motions have been shown.
/// Returns an empty vector (and leaves the grid untouched) when `dir` is
/// illegal.
pub fn slide(grid: &mut Grid, dir: Move) -> Vec<Motion> {
    let groups = *grid.groups(dir);
    let mut motions = Vec::new();
    for group in &groups {
        slide_group(grid, group, &mut motions);
    }
    debug!("slide {dir}: {} tile(s) moved", motions.len());
    motions
}

fn slide_group(grid: &mut Grid, group: &Group, motions: &mut Vec<Motion>) {
    for i in 1..group.len() {
        let Some(tile) = grid.cells()[group[i]].tile().copied() else {
            continue;
        };

        let mut target = None;
        let mut j = i;
        while j > 0 && grid.cells()[group[j - 1]].can_accept(&tile) {
            j -= 1;
            target = Some(group[j]);
        }
        let Some(target) = target else {
            continue;
        };

        let cells = grid.cells_mut();
        let Some(tile) = cells[group[i]].unlink() else {
            continue;
        };
        let dest = &mut cells[target];
        let merges = !dest.is_empty();
        let to = (dest.x(), dest.y());
        if merges {
            dest.link_for_merge(tile);
        } else {
            dest.link(tile);
        }
        motions.push(Motion { tile: tile.id, from: (tile.x, tile.y), to, merges });
    }
}

/// Fold every pending merge into its cell. Returns the total merged value,
/// which is the score gained by the move.
pub fn commit_merges(grid: &mut Grid) -> u64 {
    grid.cells_mut()
        .iter_mut()
        .filter_map(|cell| cell.merge())
        .map(u64::from)
        .sum()
}

/// True if sliding in `dir` would move or merge at least one tile.
pub fn can_move(grid: &Grid, dir: Move) -> bool {
    let cells = grid.cells();
    grid.groups(dir).iter().any(|group| {
        group.windows(2).any(|pair| match cells[pair[1]].tile() {
            Some(tile) => cells[pair[0]].can_accept(tile),
            None => false,
        })
    })
}

/// Directions that are currently legal, in [`Move::ALL`] order.
pub fn legal_moves(grid: &Grid) -> Vec<Move> {
    Move::ALL.into_iter().filter(|&dir| can_move(grid, dir)).collect()
}

/// True if no direction is legal.
pub fn is_game_over(grid: &Grid) -> bool {
    Move::ALL.iter().all(|&dir| !can_move(grid, dir))
}

/// A new tile value: 2 or 4 with equal probability.
pub fn generate_tile_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_bool(0.5) { 2 } else { 4 }
}

/// Place a 2 or 4 on a uniformly random empty cell. `None` if the grid is full.
pub fn spawn_random_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<Tile> {
    let idx = grid.random_empty_cell(rng)?;
    let value = generate_tile_value(rng);
    let cell = &grid.cells()[idx];
    let (x, y) = (cell.x(), cell.y());
    let tile = grid.place_tile(x, y, value);
    debug!("spawned {} at ({}, {})", tile.value, x, y);
    Some(tile)
}
