//! TicTacToe on an n×n board.
//!
//! This crate provides a complete reference implementation of TicTacToe
//! demonstrating how to implement the `engine-core` Game trait.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, Player};
//! use games_tictactoe::TicTacToe;
//!
//! let game = TicTacToe::new(3);
//! let board = game.initial_board();
//! let (board, next) = game.next_state(&board, Player::One, 4);
//! assert_eq!(board.get(1, 1), 1);
//! assert_eq!(next, Player::Two);
//! ```
//!
//! Cells hold `1` (player one, drawn as `X`), `-1` (player two, `O`) or `0`.
//! The action space has `n*n + 1` entries: one per cell plus a trailing
//! pass action, legal only once the board is full.

use std::fmt::Write as _;

use engine_core::game_utils::terminal_value;
use engine_core::{ActionMask, BoardKey, Game, Player};
use thiserror::Error;

/// Errors building a board from raw cells.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Expected {expected} cells, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Invalid cell value {0} (expected 1, -1 or 0)")]
    InvalidCell(i8),
}

/// Row-major n×n grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<i8>,
}

impl Board {
    /// Create an empty board
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a board from row-major cells.
    pub fn from_cells(size: usize, cells: Vec<i8>) -> Result<Self, BoardError> {
        if cells.len() != size * size {
            return Err(BoardError::WrongLength {
                expected: size * size,
                actual: cells.len(),
            });
        }
        if let Some(&bad) = cells.iter().find(|&&c| !(-1..=1).contains(&c)) {
            return Err(BoardError::InvalidCell(bad));
        }
        Ok(Self { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.cells[row * self.size + col]
    }

    #[inline]
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    pub fn has_empty(&self) -> bool {
        self.cells.contains(&0)
    }

    /// Whether `piece` fills a whole row, column or diagonal.
    pub fn is_win(&self, piece: i8) -> bool {
        let n = self.size;
        if n == 0 {
            return false;
        }

        let rows = (0..n).any(|r| (0..n).all(|c| self.get(r, c) == piece));
        let cols = (0..n).any(|c| (0..n).all(|r| self.get(r, c) == piece));
        let diag = (0..n).all(|i| self.get(i, i) == piece);
        let anti = (0..n).all(|i| self.get(i, n - 1 - i) == piece);

        rows || cols || diag || anti
    }

    /// Winner, if any.
    pub fn winner(&self) -> Option<Player> {
        if self.is_win(Player::One.as_i8()) {
            Some(Player::One)
        } else if self.is_win(Player::Two.as_i8()) {
            Some(Player::Two)
        } else {
            None
        }
    }

    fn map(&self, f: impl Fn(i8) -> i8) -> Self {
        Self {
            size: self.size,
            cells: self.cells.iter().map(|&c| f(c)).collect(),
        }
    }
}

/// Rotate a row-major grid a quarter turn counter-clockwise.
fn rotate<T: Copy>(grid: &[T], n: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(grid.len());
    for r in 0..n {
        for c in 0..n {
            out.push(grid[c * n + (n - 1 - r)]);
        }
    }
    out
}

/// Mirror a row-major grid left to right.
fn flip<T: Copy>(grid: &[T], n: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(grid.len());
    for r in 0..n {
        for c in 0..n {
            out.push(grid[r * n + (n - 1 - c)]);
        }
    }
    out
}

/// TicTacToe rules for a fixed board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToe {
    size: usize,
}

impl TicTacToe {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the pass action.
    #[inline]
    pub fn pass_action(&self) -> usize {
        self.size * self.size
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Game for TicTacToe {
    type Board = Board;

    fn initial_board(&self) -> Board {
        Board::empty(self.size)
    }

    fn board_size(&self) -> Vec<usize> {
        vec![self.size, self.size]
    }

    fn action_size(&self) -> usize {
        self.size * self.size + 1
    }

    fn next_state(&self, board: &Board, player: Player, action: usize) -> (Board, Player) {
        if action == self.pass_action() {
            return (board.clone(), player.opponent());
        }

        debug_assert_eq!(board.cells[action], 0, "cell {action} already taken");
        let mut next = board.clone();
        next.cells[action] = player.as_i8();
        (next, player.opponent())
    }

    fn valid_moves(&self, board: &Board, _player: Player) -> ActionMask {
        let cells = &board.cells;
        let mut mask =
            ActionMask::from_fn(self.action_size(), |a| a < cells.len() && cells[a] == 0);
        if !board.has_empty() {
            mask.allow(self.pass_action());
        }
        mask
    }

    fn game_ended(&self, board: &Board, player: Player) -> f32 {
        match board.winner() {
            None if board.has_empty() => 0.0,
            winner => terminal_value(winner, player),
        }
    }

    fn canonical_form(&self, board: &Board, player: Player) -> Board {
        let sign = player.as_i8();
        board.map(|c| c * sign)
    }

    fn symmetries(&self, board: &Board, policy: &[f32]) -> Vec<(Board, Vec<f32>)> {
        debug_assert_eq!(policy.len(), self.action_size());
        let n = self.size;
        let pass = policy[self.pass_action()];

        let mut cells = board.cells.clone();
        let mut pi = policy[..n * n].to_vec();
        let mut out = Vec::with_capacity(8);

        for _ in 0..4 {
            cells = rotate(&cells, n);
            pi = rotate(&pi, n);

            for mirrored in [true, false] {
                let (c, mut p) = if mirrored {
                    (flip(&cells, n), flip(&pi, n))
                } else {
                    (cells.clone(), pi.clone())
                };
                p.push(pass);
                out.push((Board { size: n, cells: c }, p));
            }
        }

        out
    }

    fn board_identity(&self, board: &Board) -> BoardKey {
        BoardKey::from_bytes(board.cells.iter().map(|&c| c as u8).collect::<Vec<u8>>())
    }

    fn render(&self, board: &Board) -> String {
        let n = self.size;
        let mut out = String::new();

        let _ = write!(out, "   ");
        for c in 0..n {
            let _ = write!(out, "{c} ");
        }
        out.push('\n');
        let rule = "-".repeat(2 * n + 4);
        out.push_str(&rule);
        out.push('\n');

        for r in 0..n {
            let _ = write!(out, "{r} |");
            for c in 0..n {
                let piece = match board.get(r, c) {
                    1 => 'X',
                    -1 => 'O',
                    _ => '-',
                };
                let _ = write!(out, "{piece} ");
            }
            out.push_str("|\n");
        }
        out.push_str(&rule);
        out
    }
}
