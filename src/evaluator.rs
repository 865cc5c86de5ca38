//! A fixed-depth lookahead agent for Connect 4

use anyhow::{anyhow, Error};
use rand::{seq::SliceRandom, thread_rng, Rng};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Checker};

/// Goodness of a column for the player to move
pub type Score = f64;

/// The score of a won position
pub const WIN_SCORE: Score = 100.0;
/// The score of a lost position
pub const LOSS_SCORE: Score = 0.0;
/// The score of a position with no known outcome
pub const NEUTRAL_SCORE: Score = 50.0;
/// Marks a column that cannot be played, below every real score
pub const ILLEGAL_SCORE: Score = -1.0;

/// How to choose between several equally scored columns
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TieBreak {
    Left,
    Right,
    Random,
}

impl FromStr for TieBreak {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LEFT" => Ok(TieBreak::Left),
            "RIGHT" => Ok(TieBreak::Right),
            "RANDOM" => Ok(TieBreak::Random),
            _ => Err(anyhow!(
                "unknown tie-break type '{}', expected LEFT, RIGHT or RANDOM",
                s
            )),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TieBreak::Left => "LEFT",
            TieBreak::Right => "RIGHT",
            TieBreak::Random => "RANDOM",
        };
        write!(f, "{}", name)
    }
}

/// A computer player that looks a fixed number of moves ahead
///
/// # Notes
/// Every column is scored by playing it on the board, scoring the opponent's
/// replies one ply shallower and undoing the move again. The opponent is
/// assumed to pick its best reply, so a column is worth `100 - best reply`.
/// At ply 0 nothing is played and every legal column is neutral.
///
/// # Position Scoring
/// Before any column is tried the board itself is checked: if it already
/// holds four in a row for this player every legal column scores 100, if
/// it holds one for the opponent every legal column scores 0. Unplayable
/// columns always score -1 and are never chosen.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Evaluator {
    checker: Checker,
    tie_break: TieBreak,
    ply: usize,
}

impl Evaluator {
    pub fn new(checker: Checker, tie_break: TieBreak, ply: usize) -> Self {
        Self {
            checker,
            tie_break,
            ply,
        }
    }

    pub fn checker(&self) -> Checker {
        self.checker
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Static score of the board for this player, without lookahead
    pub fn score_board(&self, board: &Board) -> Score {
        static_score(board, self.checker)
    }

    /// Scores every column of the board, leaving the board as it was found
    pub fn scores_for(&self, board: &mut Board) -> Vec<Score> {
        let mut nodes = 0;
        let scores = scores_for(board, self.checker, self.ply, &mut nodes);
        log::trace!(
            "{} searched {} nodes at ply {}",
            self.checker,
            nodes,
            self.ply
        );
        scores
    }

    /// Picks a column among the best scored ones using the tie-break policy
    ///
    /// Returns `None` if no column is playable.
    pub fn tiebreak_move<R: Rng + ?Sized>(&self, scores: &[Score], rng: &mut R) -> Option<usize> {
        let best = scores.iter().cloned().fold(ILLEGAL_SCORE, Score::max);
        if best <= ILLEGAL_SCORE {
            return None;
        }
        let candidates: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|&(_, &score)| score == best)
            .map(|(column, _)| column)
            .collect();

        match self.tie_break {
            TieBreak::Left => candidates.first().copied(),
            TieBreak::Right => candidates.last().copied(),
            TieBreak::Random => candidates.choose(rng).copied(),
        }
    }

    /// Chooses the column to play, or `None` if the board is full
    pub fn next_move(&self, board: &mut Board) -> Option<usize> {
        self.next_move_with_rng(board, &mut thread_rng())
    }

    /// As [`next_move`](Self::next_move), drawing random tie-breaks from `rng`
    pub fn next_move_with_rng<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        rng: &mut R,
    ) -> Option<usize> {
        let scores = self.scores_for(board);
        let column = self.tiebreak_move(&scores, rng);
        log::debug!("{} scores {:?}, playing {:?}", self.checker, scores, column);
        column
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Player for {}", self.checker)?;
        writeln!(f, "  with tiebreak type: {}", self.tie_break)?;
        writeln!(f, "  and ply == {}", self.ply)
    }
}

fn static_score(board: &Board, checker: Checker) -> Score {
    if board.wins_for(checker) {
        WIN_SCORE
    } else if board.wins_for(checker.opponent()) {
        LOSS_SCORE
    } else {
        NEUTRAL_SCORE
    }
}

fn scores_for(board: &mut Board, checker: Checker, ply: usize, nodes: &mut usize) -> Vec<Score> {
    *nodes += 1;

    // both checks look at the board before any column is tried,
    // so they give the same answer for every column
    let won = board.wins_for(checker);
    let lost = !won && board.wins_for(checker.opponent());

    (0..board.width())
        .map(|column| {
            if !board.allows_move(column) {
                ILLEGAL_SCORE
            } else if won {
                WIN_SCORE
            } else if lost {
                LOSS_SCORE
            } else if ply == 0 {
                NEUTRAL_SCORE
            } else {
                board.add_move(column, checker);
                let replies = scores_for(board, checker.opponent(), ply - 1, nodes);
                let best_reply = replies.into_iter().fold(ILLEGAL_SCORE, Score::max);
                let score = if best_reply <= ILLEGAL_SCORE {
                    // the move filled the board, the opponent has no reply
                    static_score(board, checker)
                } else {
                    WIN_SCORE - best_reply
                };
                board.del_move(column);
                score
            }
        })
        .collect()
}
