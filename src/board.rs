//! The Connect 4 grid, with move legality and alignment checks

use anyhow::{anyhow, ensure, Result};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::config::Symbols;

/// Number of aligned checkers needed to win
pub const IN_A_ROW: usize = 4;

// (row step, column step) for horizontal, vertical and both diagonals
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// One of the two pieces that can occupy a cell
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Checker {
    X,
    O,
}

impl Checker {
    pub fn opponent(self) -> Self {
        match self {
            Checker::X => Checker::O,
            Checker::O => Checker::X,
        }
    }
}

impl fmt::Display for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checker::X => write!(f, "X"),
            Checker::O => write!(f, "O"),
        }
    }
}

/// A Connect 4 board of arbitrary size
///
/// Rows are indexed from the top (row 0) to the bottom (row `height - 1`),
/// and checkers fall to the lowest empty row of their column.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    // cells are stored row by row, top to bottom
    cells: Vec<Option<Checker>>,
    // number of checkers in each column
    heights: Vec<usize>,
}

impl Board {
    /// Creates an empty board, rejecting degenerate dimensions
    pub fn new(width: usize, height: usize) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "Invalid board size {}x{}, both dimensions must be at least 1",
            width,
            height
        );
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
            heights: vec![0; width],
        })
    }

    /// Builds a board from a string of single-digit columns, alternating
    /// checkers starting with X
    pub fn from_moves<S: AsRef<str>>(width: usize, height: usize, moves: S) -> Result<Self> {
        let mut board = Self::new(width, height)?;
        let mut checker = Checker::X;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => board.play_checked(column as usize, checker)?,
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
            checker = checker.opponent();
        }
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The checker at the given cell, `None` if empty or out of range
    pub fn cell(&self, row: usize, column: usize) -> Option<Checker> {
        if row < self.height && column < self.width {
            self.cells[row * self.width + column]
        } else {
            None
        }
    }

    /// Returns true if a checker can be dropped into `column`
    pub fn allows_move(&self, column: usize) -> bool {
        column < self.width && self.heights[column] < self.height
    }

    /// Drops `checker` into the lowest empty row of `column`
    ///
    /// The caller must have checked [`allows_move`](Self::allows_move) first;
    /// use [`play_checked`](Self::play_checked) for untrusted input.
    pub fn add_move(&mut self, column: usize, checker: Checker) {
        debug_assert!(self.allows_move(column), "column {} is not playable", column);
        let row = self.height - 1 - self.heights[column];
        self.cells[row * self.width + column] = Some(checker);
        self.heights[column] += 1;
    }

    /// Drops `checker` into `column`, rejecting out of range and full columns
    pub fn play_checked(&mut self, column: usize, checker: Checker) -> Result<()> {
        if column >= self.width {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 0 and {}",
                column,
                self.width - 1
            ));
        }
        if !self.allows_move(column) {
            return Err(anyhow!("Invalid move, column {} full", column));
        }
        self.add_move(column, checker);
        Ok(())
    }

    /// Removes the topmost checker of `column`, if there is one
    pub fn del_move(&mut self, column: usize) {
        if column < self.width && self.heights[column] > 0 {
            let row = self.height - self.heights[column];
            self.cells[row * self.width + column] = None;
            self.heights[column] -= 1;
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.heights.iter_mut().for_each(|height| *height = 0);
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&height| height == self.height)
    }

    /// Returns true if `checker` has four aligned anywhere on the board
    pub fn wins_for(&self, checker: Checker) -> bool {
        for row in 0..self.height {
            for column in 0..self.width {
                for &(d_row, d_column) in DIRECTIONS.iter() {
                    if self.aligned_from(row, column, d_row, d_column, checker) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn aligned_from(
        &self,
        row: usize,
        column: usize,
        d_row: isize,
        d_column: isize,
        checker: Checker,
    ) -> bool {
        (0..IN_A_ROW as isize).all(|step| {
            let r = row as isize + step * d_row;
            let c = column as isize + step * d_column;
            r >= 0
                && c >= 0
                && (r as usize) < self.height
                && (c as usize) < self.width
                && self.cells[r as usize * self.width + c as usize] == Some(checker)
        })
    }

    /// Columns, in ascending order, where `checker` would win immediately
    pub fn cols_to_win(&mut self, checker: Checker) -> Vec<usize> {
        let mut columns = Vec::new();
        for column in 0..self.width {
            if self.allows_move(column) {
                self.add_move(column, checker);
                if self.wins_for(checker) {
                    columns.push(column);
                }
                self.del_move(column);
            }
        }
        columns
    }

    /// One-ply tactical choice for `checker`: win if possible, otherwise
    /// block the opponent, otherwise the leftmost legal column
    ///
    /// Returns `None` on a full board. The board is left unchanged.
    pub fn tactical_move(&mut self, checker: Checker) -> Option<usize> {
        if let Some(&column) = self.cols_to_win(checker).first() {
            return Some(column);
        }
        if let Some(&column) = self.cols_to_win(checker.opponent()).first() {
            return Some(column);
        }
        (0..self.width).find(|&column| self.allows_move(column))
    }

    /// Plays the [`tactical_move`](Self::tactical_move) for `checker`,
    /// returning the column played
    pub fn play_tactical(&mut self, checker: Checker) -> Option<usize> {
        let column = self.tactical_move(checker)?;
        self.add_move(column, checker);
        Some(column)
    }

    /// Renders the board with the given symbols
    pub fn display_with<'a>(&'a self, symbols: &'a Symbols) -> BoardDisplay<'a> {
        BoardDisplay {
            board: self,
            symbols,
        }
    }

    /// Column indices to print under the board, aligned with the cells
    pub fn column_labels(&self) -> String {
        (0..self.width)
            .map(|column| format!(" {}", column % 10))
            .collect()
    }
}

pub struct BoardDisplay<'a> {
    board: &'a Board,
    symbols: &'a Symbols,
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.board.height {
            write!(f, "|")?;
            for column in 0..self.board.width {
                write!(f, "{}|", self.symbols.cell(self.board.cell(row, column)))?;
            }
            writeln!(f)?;
        }
        // bottom of the board
        for _ in 0..2 * self.board.width + 1 {
            write!(f, "{}", self.symbols.rule)?;
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with(&Symbols::default()))
    }
}
