//! Browser bindings.
//!
//! The page owns the DOM and `localStorage`; this module owns the game. A
//! typical wiring: forward `keydown`/touch events, animate every tile listed
//! by `tiles_json`, report each `transitionend` back through
//! `transition_end`, and when it returns true persist `snapshot_json` and
//! check `is_over`.

use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::engine::{Move, Tile, TileId};
use crate::game::Game;
use crate::input::SwipeTracker;
use crate::serialization::Snapshot;
use crate::style::TileStyle;

#[derive(Serialize)]
struct TileView {
    id: u32,
    value: u32,
    x: usize,
    y: usize,
    /// Still sliding into a tile it will merge with.
    merging: bool,
    style: TileStyle,
}

impl TileView {
    fn new(tile: &Tile, merging: bool) -> Self {
        TileView {
            id: tile.id.0,
            value: tile.value,
            x: tile.x,
            y: tile.y,
            merging,
            style: TileStyle::for_value(tile.value),
        }
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    rng: StdRng,
    swipe: SwipeTracker,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WebGame {
        let mut rng = StdRng::seed_from_u64(u64::from(seed));
        let game = Game::new(&mut rng);
        WebGame { game, rng, swipe: SwipeTracker::default() }
    }

    /// Handle a `KeyboardEvent.key`. True if a move started.
    pub fn key_down(&mut self, key: &str) -> bool {
        Move::from_key(key).map_or(false, |dir| self.game.begin_move(dir).is_some())
    }

    pub fn touch_start(&mut self, x: f64, y: f64) { self.swipe.touch_start(x, y) }

    pub fn touch_move(&mut self, x: f64, y: f64) { self.swipe.touch_move(x, y) }

    /// End the gesture. True if it was a swipe that started a move.
    pub fn touch_end(&mut self) -> bool {
        self.swipe
            .touch_end()
            .map_or(false, |dir| self.game.begin_move(dir).is_some())
    }

    /// Report a finished tile transition. True once the move has completed.
    pub fn transition_end(&mut self, tile_id: u32) -> bool {
        self.game.transition_ended(TileId(tile_id), &mut self.rng).is_some()
    }

    /// Complete the current move without waiting for further transitions.
    pub fn finish_move(&mut self) -> bool { self.game.finish_move(&mut self.rng).is_some() }

    /// Every tile on the board, settled and merging, as a JSON array.
    pub fn tiles_json(&self) -> String {
        let views: Vec<TileView> = self
            .game
            .grid()
            .cells()
            .iter()
            .flat_map(|cell| {
                let settled = cell.tile().map(|t| TileView::new(t, false));
                let incoming = cell.incoming().map(|t| TileView::new(t, true));
                settled.into_iter().chain(incoming)
            })
            .collect();
        serde_json::to_string(&views).unwrap_or_else(|_| String::from("[]"))
    }

    pub fn score(&self) -> f64 { self.game.score() as f64 }

    pub fn is_over(&self) -> bool { self.game.is_over() }

    pub fn is_busy(&self) -> bool { self.game.is_animating() }

    pub fn reset(&mut self) { self.game.reset(&mut self.rng) }

    pub fn snapshot_json(&self) -> Option<String> { self.game.snapshot().to_json().ok() }

    /// Replace the game with a saved one. False (game untouched) if malformed.
    pub fn restore_json(&mut self, json: &str) -> bool {
        match Snapshot::from_json(json).and_then(|s| Game::restore(&s)) {
            Ok(game) => {
                self.game = game;
                true
            }
            Err(e) => {
                log::warn!("saved progress not restored: {e}");
                false
            }
        }
    }
}
