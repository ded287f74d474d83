use std::fmt;

use rand::Rng;

use super::cell::{Cell, Tile, TileId};
use super::Move;

/// Side length of the square grid.
pub const GRID_SIZE: usize = 4;
/// Number of cells on the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;
/// Largest tile a game on this grid can build: every cell full of distinct
/// powers of two topped off by a spawned 4.
pub const MAX_TILE_VALUE: u32 = 1 << (CELL_COUNT + 1);

/// Cell indices along one line of the active axis, leading cell first.
pub type Group = [usize; GRID_SIZE];

/// The 4x4 board: cells in row-major order (`x + y * GRID_SIZE`) plus the
/// four precomputed group orderings, one per direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    by_column: [Group; GRID_SIZE],
    by_reversed_column: [Group; GRID_SIZE],
    by_row: [Group; GRID_SIZE],
    by_reversed_row: [Group; GRID_SIZE],
    next_tile_id: u32,
}

impl Default for Grid {
    fn default() -> Self { Grid::new() }
}

impl Grid {
    /// An empty grid.
    pub fn new() -> Self {
        let cells = (0..CELL_COUNT)
            .map(|i| Cell::new(i % GRID_SIZE, i / GRID_SIZE))
            .collect();

        let mut by_column = [[0; GRID_SIZE]; GRID_SIZE];
        let mut by_row = [[0; GRID_SIZE]; GRID_SIZE];
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                by_column[x][y] = Grid::index(x, y);
                by_row[y][x] = Grid::index(x, y);
            }
        }
        let by_reversed_column = by_column.map(reversed);
        let by_reversed_row = by_row.map(reversed);

        Grid { cells, by_column, by_reversed_column, by_row, by_reversed_row, next_tile_id: 0 }
    }

    /// Build a grid from row-major values, 0 meaning empty.
    ///
    /// Values are taken as given; callers are expected to pass powers of two.
    pub fn from_rows(rows: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        let mut grid = Grid::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value != 0 {
                    grid.place_tile(x, y, value);
                }
            }
        }
        grid
    }

    /// Settled values in row-major rows, 0 for empty cells.
    pub fn rows(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        let mut rows = [[0; GRID_SIZE]; GRID_SIZE];
        for cell in &self.cells {
            rows[cell.y()][cell.x()] = cell.tile().map_or(0, |t| t.value);
        }
        rows
    }

    #[inline]
    pub fn index(x: usize, y: usize) -> usize { x + y * GRID_SIZE }

    #[inline]
    pub fn cells(&self) -> &[Cell] { &self.cells }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] { &mut self.cells }

    /// Cell at column `x`, row `y`. Panics when out of bounds.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> &Cell { &self.cells[Grid::index(x, y)] }

    /// Group ordering for a direction: columns top-to-bottom for `Up`,
    /// bottom-to-top for `Down`, rows left-to-right for `Left`, right-to-left
    /// for `Right`.
    pub fn groups(&self, dir: Move) -> &[Group; GRID_SIZE] {
        match dir {
            Move::Up => &self.by_column,
            Move::Down => &self.by_reversed_column,
            Move::Left => &self.by_row,
            Move::Right => &self.by_reversed_row,
        }
    }

    /// Put a fresh tile on an empty cell and return it.
    pub fn place_tile(&mut self, x: usize, y: usize, value: u32) -> Tile {
        let tile = Tile { id: TileId(self.next_tile_id), value, x, y };
        self.next_tile_id = self.next_tile_id.wrapping_add(1);
        self.cells[Grid::index(x, y)].link(tile);
        tile
    }

    /// Drop every tile (settled and pending).
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear);
    }

    /// Pick a uniformly random empty cell index.
    pub fn random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        let empty: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect();
        if empty.is_empty() {
            return None;
        }
        Some(empty[rng.gen_range(0..empty.len())])
    }

    /// Settled tiles in grid order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().filter_map(Cell::tile)
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Sum of all settled and pending tile values.
    pub fn tile_sum(&self) -> u64 {
        self.cells
            .iter()
            .flat_map(|c| c.tile().into_iter().chain(c.incoming()))
            .map(|t| t.value as u64)
            .sum()
    }

    /// Highest settled tile value, 0 on an empty grid.
    pub fn highest_tile(&self) -> u32 {
        self.tiles().map(|t| t.value).max().unwrap_or(0)
    }
}

fn reversed(mut group: Group) -> Group {
    group.reverse();
    group
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f, "{}", "-".repeat(GRID_SIZE * 8 - 1))?;
            }
            let line: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: u32) -> String {
    match val {
        0 => " ".repeat(7),
        x => format!("{:^7}", x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn it_lays_out_cells_row_major() {
        let grid = Grid::new();
        assert_eq!(grid.cells().len(), CELL_COUNT);
        let c = &grid.cells()[6];
        assert_eq!((c.x(), c.y()), (2, 1));
        assert_eq!(Grid::index(3, 3), 15);
    }

    #[test]
    fn it_groups_by_direction() {
        let grid = Grid::new();
        assert_eq!(grid.groups(Move::Up)[1], [1, 5, 9, 13]);
        assert_eq!(grid.groups(Move::Down)[1], [13, 9, 5, 1]);
        assert_eq!(grid.groups(Move::Left)[2], [8, 9, 10, 11]);
        assert_eq!(grid.groups(Move::Right)[2], [11, 10, 9, 8]);
    }

    #[test]
    fn test_from_rows_round_trip() {
        let rows = [[2, 0, 0, 4], [0, 8, 0, 0], [0, 0, 0, 0], [16, 0, 0, 2]];
        let grid = Grid::from_rows(rows);
        assert_eq!(grid.rows(), rows);
        assert_eq!(grid.count_empty(), 11);
        assert_eq!(grid.tile_sum(), 32);
        assert_eq!(grid.highest_tile(), 16);
        assert_eq!(grid.cell(3, 0).tile().unwrap().value, 4);
    }

    #[test]
    fn test_place_tile_assigns_fresh_ids() {
        let mut grid = Grid::new();
        let a = grid.place_tile(0, 0, 2);
        let b = grid.place_tile(1, 0, 2);
        assert_ne!(a.id, b.id);
        assert_eq!((b.x, b.y), (1, 0));
    }

    #[test]
    fn test_random_empty_cell() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut grid = Grid::from_rows([[2, 2, 2, 2], [2, 2, 2, 2], [2, 2, 0, 2], [2, 2, 2, 2]]);
        for _ in 0..10 {
            assert_eq!(grid.random_empty_cell(&mut rng), Some(Grid::index(2, 2)));
        }
        grid.place_tile(2, 2, 4);
        assert_eq!(grid.random_empty_cell(&mut rng), None);
        grid.clear();
        assert_eq!(grid.count_empty(), CELL_COUNT);
        assert_eq!(grid.highest_tile(), 0);
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_rows([[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 2048]]);
        let text = grid.to_string();
        assert_eq!(text.lines().count(), 7);
        assert!(text.lines().next().unwrap().starts_with("   2   |"));
        assert!(text.lines().last().unwrap().ends_with(" 2048  "));
    }
}
