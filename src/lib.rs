//! Connect 4 on a board of any size, against human or computer players
//!
//! Computer players look a fixed number of moves ahead, scoring each column
//! by playing it out on the board and undoing it again.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_lookahead::{Board, Checker, Evaluator, TieBreak};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // O threatens to complete the bottom row in column 3
//! let mut board = Board::from_moves(7, 6, "041516")?;
//! let player = Evaluator::new(Checker::X, TieBreak::Left, 2);
//!
//! assert_eq!(player.next_move(&mut board), Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod evaluator;

pub mod config;

pub mod game;

pub mod selfplay;


pub use board::{Board, Checker};
pub use config::{GameConfig, Symbols};
pub use evaluator::{Evaluator, Score, TieBreak};
pub use game::{Game, GameState};

/// The default width of the game board in tiles
pub const DEFAULT_WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const DEFAULT_HEIGHT: usize = 6;

/// The deepest lookahead offered to players, search cost grows as `width^ply`
pub const MAX_PLY: usize = 4;

// every column of the default board must be addressable by a single digit
const_assert!(DEFAULT_WIDTH > 0 && DEFAULT_WIDTH <= 10);
const_assert!(DEFAULT_HEIGHT > 0);
