use anyhow::{anyhow, ensure, Result};
use rand::Rng;

use crate::board::{Board, Checker};
use crate::config::GameConfig;
use crate::evaluator::Evaluator;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Checker),
    Draw,
}

/// A game in progress: the board, whose turn it is and the moves so far
///
/// X always moves first.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Checker,
    moves: Vec<usize>,
    state: GameState,
}

impl Game {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self::from_board(Board::new(width, height)?))
    }

    pub fn from_config(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_board(config.board()?))
    }

    fn from_board(board: Board) -> Self {
        Self {
            board,
            to_move: Checker::X,
            moves: Vec::new(),
            state: GameState::Playing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Checker {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Plays `column` for the player to move and updates the game state
    pub fn play_checked(&mut self, column: usize) -> Result<GameState> {
        if self.state != GameState::Playing {
            return Err(anyhow!("Invalid move, the game is over"));
        }
        self.board.play_checked(column, self.to_move)?;
        self.moves.push(column);

        self.state = if self.board.wins_for(self.to_move) {
            GameState::Won(self.to_move)
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.to_move = self.to_move.opponent();

        Ok(self.state)
    }

    /// Lets two computer players finish the game
    pub fn play_out<R: Rng + ?Sized>(
        &mut self,
        x: &Evaluator,
        o: &Evaluator,
        rng: &mut R,
    ) -> Result<GameState> {
        ensure!(
            x.checker() == Checker::X && o.checker() == Checker::O,
            "players must be given in the order X, O"
        );
        while self.state == GameState::Playing {
            let player = match self.to_move {
                Checker::X => x,
                Checker::O => o,
            };
            let column = player
                .next_move_with_rng(&mut self.board, rng)
                .ok_or_else(|| anyhow!("no legal moves left for {}", self.to_move))?;
            self.play_checked(column)?;
        }
        Ok(self.state)
    }
}
