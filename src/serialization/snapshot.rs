use std::io;

use serde::{Deserialize, Serialize};

use crate::engine::{Grid, GRID_SIZE, MAX_TILE_VALUE};

/// One saved cell: its position and settled value (`null` when empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCell {
    pub x: usize,
    pub y: usize,
    pub value: Option<u32>,
}

/// An element of the persisted array: a cell, or the trailing score record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotEntry {
    Cell(SavedCell),
    Score { score: u64 },
}

/// Flat snapshot of a game in progress.
///
/// On the wire it is a JSON array with one `{x, y, value}` object per cell in
/// grid order and a trailing `{score}` object:
///
/// ```
/// use play_2048::engine::Grid;
/// use play_2048::serialization::Snapshot;
///
/// let grid = Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
/// let json = Snapshot::capture(&grid, 12).to_json().unwrap();
/// assert!(json.starts_with(r#"[{"x":0,"y":0,"value":2},{"x":1,"y":0,"value":null}"#));
/// assert!(json.ends_with(r#"{"score":12}]"#));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<SnapshotEntry>", try_from = "Vec<SnapshotEntry>")]
pub struct Snapshot {
    pub cells: Vec<SavedCell>,
    pub score: u64,
}

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot has no trailing score record")]
    MissingScore,
    #[error("score record at position {0} is not the last entry")]
    MisplacedScore(usize),
    #[error("cell ({x}, {y}) lies outside the grid")]
    OutOfBounds { x: usize, y: usize },
    #[error("invalid tile value {0}")]
    InvalidValue(u32),
    #[error("snapshot holds no tiles")]
    Empty,
}

impl Snapshot {
    /// Record every cell of `grid` (settled values only) and the score.
    pub fn capture(grid: &Grid, score: u64) -> Self {
        let cells = grid
            .cells()
            .iter()
            .map(|c| SavedCell { x: c.x(), y: c.y(), value: c.tile().map(|t| t.value) })
            .collect();
        Snapshot { cells, score }
    }

    /// Check positions and values without building a grid.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut tiles = 0;
        for cell in &self.cells {
            if cell.x >= GRID_SIZE || cell.y >= GRID_SIZE {
                return Err(SnapshotError::OutOfBounds { x: cell.x, y: cell.y });
            }
            if let Some(value) = cell.value {
                if value < 2 || value > MAX_TILE_VALUE || !value.is_power_of_two() {
                    return Err(SnapshotError::InvalidValue(value));
                }
                tiles += 1;
            }
        }
        if tiles == 0 {
            return Err(SnapshotError::Empty);
        }
        Ok(())
    }

    /// Rebuild the grid. For each grid position the first saved record with
    /// matching coordinates wins; positions with no record stay empty.
    pub fn to_grid(&self) -> Result<Grid, SnapshotError> {
        self.validate()?;
        let mut grid = Grid::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let saved = self.cells.iter().find(|c| c.x == x && c.y == y);
                if let Some(value) = saved.and_then(|c| c.value) {
                    grid.place_tile(x, y, value);
                }
            }
        }
        Ok(grid)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Snapshot> for Vec<SnapshotEntry> {
    fn from(snapshot: Snapshot) -> Self {
        let mut entries: Vec<SnapshotEntry> =
            snapshot.cells.into_iter().map(SnapshotEntry::Cell).collect();
        entries.push(SnapshotEntry::Score { score: snapshot.score });
        entries
    }
}

impl TryFrom<Vec<SnapshotEntry>> for Snapshot {
    type Error = SnapshotError;

    fn try_from(mut entries: Vec<SnapshotEntry>) -> Result<Self, Self::Error> {
        let score = match entries.pop() {
            Some(SnapshotEntry::Score { score }) => score,
            _ => return Err(SnapshotError::MissingScore),
        };
        let mut cells = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            match entry {
                SnapshotEntry::Cell(cell) => cells.push(cell),
                SnapshotEntry::Score { .. } => return Err(SnapshotError::MisplacedScore(i)),
            }
        }
        let snapshot = Snapshot { cells, score };
        snapshot.validate()?;
        Ok(snapshot)
    }
}
