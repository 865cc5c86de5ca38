//! Game configuration: board dimensions, marker symbols and AI tie-breaking

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use std::fs;
use std::path::Path;

use crate::{
    board::{Board, Checker},
    evaluator::{Evaluator, TieBreak},
    DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_PLY,
};

/// Characters used to draw the board
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symbols {
    pub x: char,
    pub o: char,
    pub empty: char,
    /// Character of the rule drawn under the bottom row
    pub rule: char,
}

impl Symbols {
    pub fn checker(&self, checker: Checker) -> char {
        match checker {
            Checker::X => self.x,
            Checker::O => self.o,
        }
    }

    pub fn cell(&self, cell: Option<Checker>) -> char {
        cell.map_or(self.empty, |checker| self.checker(checker))
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            x: 'X',
            o: 'O',
            empty: ' ',
            rule: '-',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub symbols: Symbols,
    /// Tie-break policy given to computer players
    pub tie_break: TieBreak,
}

impl GameConfig {
    /// Reads a JSON configuration file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&config_str)
            .with_context(|| format!("could not parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("{:#}, using default configuration", err);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "Invalid board size {}x{}, both dimensions must be at least 1",
            self.width,
            self.height
        );
        let Symbols { x, o, empty, .. } = self.symbols;
        ensure!(
            x != o && x != empty && o != empty,
            "Checker symbols '{}' and '{}' must differ from each other and from the empty symbol '{}'",
            x,
            o,
            empty
        );
        Ok(())
    }

    /// An empty board of the configured size
    pub fn board(&self) -> Result<Board> {
        Board::new(self.width, self.height)
    }

    /// A computer player for `checker` searching `ply` moves ahead
    pub fn evaluator(&self, checker: Checker, ply: usize) -> Result<Evaluator> {
        ensure!(
            ply <= MAX_PLY,
            "Invalid difficulty {}, must be between 0 and {}",
            ply,
            MAX_PLY
        );
        Ok(Evaluator::new(checker, self.tie_break, ply))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            symbols: Symbols::default(),
            tie_break: TieBreak::Random,
        }
    }
}
