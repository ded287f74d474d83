//! play-2048: a 2048 sliding-tile merge puzzle
//!
//! This crate provides:
//! - The grid model and slide/merge rules (`engine` module)
//! - A move-cycle state machine that defers merges until animations finish (`game`)
//! - Keyboard and swipe mapping (`input`) and tile colouring (`style`)
//! - A flat JSON snapshot of progress and a file-backed slot for it (`serialization`)
//! - TOML settings for the front-ends (`config`)
//!
//! Quick start:
//! ```
//! use play_2048::engine::Move;
//! use play_2048::game::Game;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic game with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new(&mut rng);
//! let mut moves = 0;
//! while !game.is_over() && moves < 50 {
//!     for dir in Move::ALL {
//!         if game.play(dir, &mut rng).is_some() {
//!             moves += 1;
//!             break;
//!         }
//!     }
//! }
//! assert!(game.score() % 4 == 0);
//! ```
//!
//! Save and restore:
//! ```
//! use play_2048::game::Game;
//! use play_2048::serialization::Snapshot;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let game = Game::new(&mut rng);
//! let json = game.snapshot().to_json().unwrap();
//! let restored = Game::restore(&Snapshot::from_json(&json).unwrap()).unwrap();
//! assert_eq!(restored.grid().rows(), game.grid().rows());
//! ```
//!
pub mod config;
pub mod engine;
pub mod game;
pub mod input;
pub mod score;
pub mod serialization;
pub mod style;
#[cfg(feature = "wasm")]
pub mod wasm;
