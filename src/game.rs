//! One game session: grid, score, and the move cycle.
//!
//! A move runs in two halves so that front-ends can animate it:
//! [`Game::begin_move`] slides tiles and returns the motions to show, then
//! each finished transition is reported with [`Game::transition_ended`]. Once
//! the last one arrives the pending merges are committed, a tile is spawned
//! and input is accepted again. Front-ends without animation call
//! [`Game::play`], which does both halves at once.
//!
//! ```
//! use play_2048::engine::Move;
//! use play_2048::game::Game;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut game = Game::new(&mut rng);
//! assert_eq!(game.grid().tiles().count(), 2);
//!
//! for dir in Move::ALL {
//!     if let Some(report) = game.play(dir, &mut rng) {
//!         assert!(report.spawned.is_some());
//!         break;
//!     }
//! }
//! ```

use std::collections::BTreeSet;

use log::{debug, info};
use rand::Rng;

use crate::engine::{self, Grid, Motion, Move, Tile, TileId};
use crate::score::Score;
use crate::serialization::{Snapshot, SnapshotError};

/// Tiles placed when a game starts or is reset.
pub const INITIAL_TILES: usize = 2;

/// Where the move cycle currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a direction.
    Ready,
    /// Tiles are moving; input is ignored until every transition has ended.
    Animating { direction: Move, pending: BTreeSet<TileId> },
    /// No legal move remains.
    Over,
}

/// Outcome of a completed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub direction: Move,
    /// Points gained from merges this move.
    pub merged: u64,
    pub spawned: Option<Tile>,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    score: Score,
    phase: Phase,
}

impl Game {
    /// A fresh game with two random tiles.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Game { grid: Grid::new(), score: Score::new(), phase: Phase::Ready };
        game.seed_tiles(rng);
        game
    }

    /// Resume from an existing grid and score. A grid with no legal move starts
    /// out in [`Phase::Over`].
    pub fn from_parts(grid: Grid, score: Score) -> Self {
        let phase = if engine::is_game_over(&grid) { Phase::Over } else { Phase::Ready };
        Game { grid, score, phase }
    }

    /// Rebuild a game from a snapshot. Malformed snapshots are rejected whole.
    pub fn restore(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let grid = snapshot.to_grid()?;
        info!("restored game: score {}, {} tile(s)", snapshot.score, grid.tiles().count());
        Ok(Game::from_parts(grid, Score::restored(snapshot.score)))
    }

    pub fn snapshot(&self) -> Snapshot { Snapshot::capture(&self.grid, self.score.value()) }

    #[inline]
    pub fn grid(&self) -> &Grid { &self.grid }

    #[inline]
    pub fn score(&self) -> u64 { self.score.value() }

    #[inline]
    pub fn phase(&self) -> &Phase { &self.phase }

    #[inline]
    pub fn is_over(&self) -> bool { self.phase == Phase::Over }

    #[inline]
    pub fn is_animating(&self) -> bool { matches!(self.phase, Phase::Animating { .. }) }

    /// True if `dir` would change the grid right now.
    pub fn can_move(&self, dir: Move) -> bool { engine::can_move(&self.grid, dir) }

    /// Start a move. Returns `None` (and changes nothing) while another move is
    /// animating, after game over, or when `dir` is illegal.
    pub fn begin_move(&mut self, dir: Move) -> Option<Vec<Motion>> {
        if self.phase != Phase::Ready || !self.can_move(dir) {
            debug!("ignoring {dir} (phase {:?})", self.phase);
            return None;
        }
        let motions = engine::slide(&mut self.grid, dir);
        let pending = motions.iter().map(|m| m.tile).collect();
        self.phase = Phase::Animating { direction: dir, pending };
        Some(motions)
    }

    /// Acknowledge that `tile` finished its transition. When it was the last
    /// one outstanding the move completes and its report is returned.
    pub fn transition_ended<R: Rng + ?Sized>(&mut self, tile: TileId, rng: &mut R) -> Option<TurnReport> {
        let Phase::Animating { pending, .. } = &mut self.phase else {
            return None;
        };
        pending.remove(&tile);
        if pending.is_empty() {
            self.finish_move(rng)
        } else {
            None
        }
    }

    /// Complete the animating move regardless of outstanding transitions:
    /// commit merges, score them, spawn a tile and check for game over.
    pub fn finish_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<TurnReport> {
        let Phase::Animating { direction, .. } = self.phase else {
            return None;
        };
        let merged = engine::commit_merges(&mut self.grid);
        self.score.add(merged);
        let spawned = engine::spawn_random_tile(&mut self.grid, rng);
        let game_over = engine::is_game_over(&self.grid);
        self.phase = if game_over { Phase::Over } else { Phase::Ready };
        if game_over {
            info!("game over: score {}, highest tile {}", self.score.value(), self.grid.highest_tile());
        }
        Some(TurnReport { direction, merged, spawned, game_over })
    }

    /// Run a whole move without waiting for transitions.
    pub fn play<R: Rng + ?Sized>(&mut self, dir: Move, rng: &mut R) -> Option<TurnReport> {
        self.begin_move(dir)?;
        self.finish_move(rng)
    }

    /// Clear the grid and score and start over with two random tiles.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid.clear();
        self.score.reset();
        self.phase = Phase::Ready;
        self.seed_tiles(rng);
        info!("game reset");
    }

    fn seed_tiles<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for _ in 0..INITIAL_TILES {
            engine::spawn_random_tile(&mut self.grid, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn game_from(rows: [[u32; 4]; 4]) -> Game {
        Game::from_parts(Grid::from_rows(rows), Score::new())
    }

    #[test]
    fn it_starts_with_two_small_tiles() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = Game::new(&mut rng);
        let values: Vec<u32> = game.grid().tiles().map(|t| t.value).collect();
        assert_eq!(values.len(), INITIAL_TILES);
        assert!(values.iter().all(|&v| v == 2 || v == 4));
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), &Phase::Ready);
    }

    #[test]
    fn test_merge_left_scores_and_spawns() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = game_from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let report = game.play(Move::Left, &mut rng).unwrap();
        assert_eq!(report.merged, 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.grid().cell(0, 0).tile().unwrap().value, 4);
        let spawned = report.spawned.unwrap();
        assert_ne!((spawned.x, spawned.y), (0, 0));
        assert_eq!(game.grid().tiles().count(), 2);
        assert!(!report.game_over);
    }

    #[test]
    fn test_illegal_move_changes_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = game_from([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = game.grid().clone();
        assert!(game.play(Move::Left, &mut rng).is_none());
        assert!(game.play(Move::Up, &mut rng).is_none());
        assert_eq!(game.grid(), &before);
        assert_eq!(game.phase(), &Phase::Ready);
    }

    #[test]
    fn test_input_is_serialized_until_transitions_end() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = game_from([[2, 0, 2, 4], [0; 4], [0; 4], [0, 0, 0, 8]]);
        let motions = game.begin_move(Move::Left).unwrap();
        assert_eq!(motions.len(), 3);
        assert!(game.is_animating());

        // Busy: further input is dropped.
        assert!(game.begin_move(Move::Right).is_none());
        assert!(game.play(Move::Down, &mut rng).is_none());

        // Merge is not committed and nothing spawns before every tile reports in.
        assert_eq!(game.transition_ended(motions[0].tile, &mut rng), None);
        assert_eq!(game.transition_ended(motions[0].tile, &mut rng), None);
        assert_eq!(game.transition_ended(motions[1].tile, &mut rng), None);
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid().tiles().count(), 3);

        let report = game.transition_ended(motions[2].tile, &mut rng).unwrap();
        assert_eq!(report.direction, Move::Left);
        assert_eq!(report.merged, 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.grid().rows()[0][..2], [4, 4]);
        assert_eq!(game.grid().cell(0, 3).tile().unwrap().value, 8);
        assert_eq!(game.phase(), &Phase::Ready);

        // Stray notifications after completion are ignored.
        assert_eq!(game.transition_ended(motions[0].tile, &mut rng), None);
    }

    #[test]
    fn test_finish_move_outside_animation() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = game_from([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(game.finish_move(&mut rng).is_none());
    }

    #[test]
    fn test_game_over_blocks_input_until_reset() {
        let mut rng = StdRng::seed_from_u64(21);
        // One merge left; after it the spawn lands on the only free cell.
        let mut game = game_from([[2, 4, 8, 16], [32, 64, 128, 256], [2, 4, 8, 16], [32, 64, 4, 4]]);
        let report = game.play(Move::Right, &mut rng).unwrap();
        assert_eq!(report.merged, 8);
        let spawned = report.spawned.unwrap();
        assert_eq!((spawned.x, spawned.y), (0, 3));
        let expected_over = engine::is_game_over(game.grid());
        assert_eq!(report.game_over, expected_over);
        assert_eq!(game.is_over(), expected_over);

        if game.is_over() {
            for dir in Move::ALL {
                assert!(game.begin_move(dir).is_none());
            }
        }
        game.reset(&mut rng);
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid().tiles().count(), INITIAL_TILES);
        assert_eq!(game.phase(), &Phase::Ready);
    }

    #[test]
    fn test_restore_stuck_grid_is_over() {
        let grid = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let snapshot = Snapshot::capture(&grid, 1234);
        let game = Game::restore(&snapshot).unwrap();
        assert!(game.is_over());
        assert_eq!(game.score(), 1234);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut game = Game::new(&mut rng);
        for dir in [Move::Left, Move::Up, Move::Right, Move::Down].iter().cycle().take(20) {
            game.play(*dir, &mut rng);
        }
        let restored = Game::restore(&game.snapshot()).unwrap();
        assert_eq!(restored.grid().rows(), game.grid().rows());
        assert_eq!(restored.score(), game.score());
    }

    #[test]
    fn test_restore_rejects_malformed() {
        let snapshot = Snapshot { cells: vec![], score: 5 };
        assert!(Game::restore(&snapshot).is_err());
    }

    #[test]
    fn test_oversized_tiles_never_reach_a_game() {
        let json = r#"[{"x":0,"y":0,"value":2147483648},{"x":1,"y":0,"value":2147483648},{"score":0}]"#;
        assert!(matches!(Snapshot::from_json(json), Err(SnapshotError::Json(_))));

        // Built directly, the same pair stays put instead of overflowing.
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = game_from([[1 << 31, 1 << 31, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let report = game.play(Move::Left, &mut rng).unwrap();
        assert_eq!(report.merged, 0);
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid().cell(0, 0).tile().unwrap().value, 1 << 31);
    }

    /// Random play checks the move invariants on every turn.
    #[test]
    fn test_random_play_invariants() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..20 {
            let mut game = Game::new(&mut rng);
            let mut turns = 0;
            while !game.is_over() && turns < 2_000 {
                let dir = Move::ALL[rng.gen_range(0..4)];
                let sum_before = game.grid().tile_sum();
                let score_before = game.score();
                let rows_before = game.grid().rows();
                let legal = game.can_move(dir);

                match game.play(dir, &mut rng) {
                    None => {
                        assert!(!legal);
                        assert_eq!(game.grid().rows(), rows_before);
                        assert_eq!(game.score(), score_before);
                    }
                    Some(report) => {
                        assert!(legal);
                        let spawned = report.spawned.map_or(0, |t| t.value as u64);
                        assert!(spawned == 2 || spawned == 4);
                        assert_eq!(game.grid().tile_sum(), sum_before + spawned);
                        assert_eq!(game.score(), score_before + report.merged);
                        assert_eq!(report.merged % 4, 0);
                        assert_eq!(report.game_over, Move::ALL.iter().all(|&d| !game.can_move(d)));
                    }
                }
                for cell in game.grid().cells() {
                    assert!(cell.incoming().is_none());
                    if let Some(tile) = cell.tile() {
                        assert!(tile.value >= 2 && tile.value.is_power_of_two());
                        assert_eq!((tile.x, tile.y), (cell.x(), cell.y()));
                    }
                }
                turns += 1;
            }
        }
    }
}
