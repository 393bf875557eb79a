//! Small synthetic games for exercising search and arena code.
//!
//! Compiled only for tests or with the `test-utils` feature.

use crate::game_utils::DRAW_VALUE;
use crate::typed::{ActionMask, BoardKey, Game, Player};

/// 1×3 "one in a row": the first placement on any cell wins.
///
/// Three actions, no pass. Cells hold `1`, `-1` or `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineGame;

impl Game for LineGame {
    type Board = [i8; 3];

    fn initial_board(&self) -> Self::Board {
        [0; 3]
    }

    fn board_size(&self) -> Vec<usize> {
        vec![1, 3]
    }

    fn action_size(&self) -> usize {
        3
    }

    fn next_state(
        &self,
        board: &Self::Board,
        player: Player,
        action: usize,
    ) -> (Self::Board, Player) {
        let mut next = *board;
        next[action] = player.as_i8();
        (next, player.opponent())
    }

    fn valid_moves(&self, board: &Self::Board, _player: Player) -> ActionMask {
        ActionMask::from_fn(3, |a| board[a] == 0)
    }

    fn game_ended(&self, board: &Self::Board, player: Player) -> f32 {
        let me = player.as_i8();
        if board.contains(&me) {
            1.0
        } else if board.contains(&-me) {
            -1.0
        } else {
            0.0
        }
    }

    fn canonical_form(&self, board: &Self::Board, player: Player) -> Self::Board {
        board.map(|c| c * player.as_i8())
    }

    fn symmetries(&self, board: &Self::Board, policy: &[f32]) -> Vec<(Self::Board, Vec<f32>)> {
        let mut mirrored = *board;
        mirrored.reverse();
        let mut mirrored_pi = policy.to_vec();
        mirrored_pi.reverse();
        vec![(*board, policy.to_vec()), (mirrored, mirrored_pi)]
    }

    fn board_identity(&self, board: &Self::Board) -> BoardKey {
        BoardKey::from_bytes(board.map(|c| c as u8).to_vec())
    }
}

/// Subtraction game: players alternately take one or two tokens from a
/// pile and whoever takes the last token wins.
///
/// Action `0` takes one token, action `1` takes two.
#[derive(Debug, Clone, Copy)]
pub struct NimGame {
    pub pile: u8,
}

/// Nim board: tokens left and the sign of the player who moved last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NimBoard {
    pub pile: u8,
    pub last_mover: i8,
}

impl NimGame {
    pub fn new(pile: u8) -> Self {
        Self { pile }
    }
}

impl Game for NimGame {
    type Board = NimBoard;

    fn initial_board(&self) -> Self::Board {
        NimBoard {
            pile: self.pile,
            last_mover: 0,
        }
    }

    fn board_size(&self) -> Vec<usize> {
        vec![1]
    }

    fn action_size(&self) -> usize {
        2
    }

    fn next_state(
        &self,
        board: &Self::Board,
        player: Player,
        action: usize,
    ) -> (Self::Board, Player) {
        let take = action as u8 + 1;
        let next = NimBoard {
            pile: board.pile.saturating_sub(take),
            last_mover: player.as_i8(),
        };
        (next, player.opponent())
    }

    fn valid_moves(&self, board: &Self::Board, _player: Player) -> ActionMask {
        ActionMask::from_fn(2, |a| board.pile > a as u8)
    }

    fn game_ended(&self, board: &Self::Board, player: Player) -> f32 {
        if board.pile > 0 {
            0.0
        } else if board.last_mover == player.as_i8() {
            1.0
        } else {
            -1.0
        }
    }

    fn canonical_form(&self, board: &Self::Board, player: Player) -> Self::Board {
        NimBoard {
            pile: board.pile,
            last_mover: board.last_mover * player.as_i8(),
        }
    }

    fn symmetries(&self, board: &Self::Board, policy: &[f32]) -> Vec<(Self::Board, Vec<f32>)> {
        vec![(*board, policy.to_vec())]
    }

    fn board_identity(&self, board: &Self::Board) -> BoardKey {
        BoardKey::from_bytes(vec![board.pile, board.last_mover as u8])
    }
}

/// One forced move, after which the game is drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawGame;

impl Game for DrawGame {
    type Board = bool;

    fn initial_board(&self) -> Self::Board {
        false
    }

    fn board_size(&self) -> Vec<usize> {
        vec![1]
    }

    fn action_size(&self) -> usize {
        1
    }

    fn next_state(
        &self,
        _board: &Self::Board,
        player: Player,
        _action: usize,
    ) -> (Self::Board, Player) {
        (true, player.opponent())
    }

    fn valid_moves(&self, board: &Self::Board, _player: Player) -> ActionMask {
        ActionMask::from(vec![!*board])
    }

    fn game_ended(&self, board: &Self::Board, _player: Player) -> f32 {
        if *board {
            DRAW_VALUE
        } else {
            0.0
        }
    }

    fn canonical_form(&self, board: &Self::Board, _player: Player) -> Self::Board {
        *board
    }

    fn symmetries(&self, board: &Self::Board, policy: &[f32]) -> Vec<(Self::Board, Vec<f32>)> {
        vec![(*board, policy.to_vec())]
    }

    fn board_identity(&self, board: &Self::Board) -> BoardKey {
        BoardKey::from_bytes(vec![*board as u8])
    }
}

/// Broken game whose opening position is unresolved but has no legal move
/// and no pass action.
#[derive(Debug, Clone, Copy, Default)]
pub struct StuckGame;

impl Game for StuckGame {
    type Board = ();

    fn initial_board(&self) -> Self::Board {}

    fn board_size(&self) -> Vec<usize> {
        vec![1]
    }

    fn action_size(&self) -> usize {
        2
    }

    fn next_state(
        &self,
        _board: &Self::Board,
        player: Player,
        _action: usize,
    ) -> (Self::Board, Player) {
        ((), player.opponent())
    }

    fn valid_moves(&self, _board: &Self::Board, _player: Player) -> ActionMask {
        ActionMask::none(2)
    }

    fn game_ended(&self, _board: &Self::Board, _player: Player) -> f32 {
        0.0
    }

    fn canonical_form(&self, _board: &Self::Board, _player: Player) -> Self::Board {}

    fn symmetries(&self, board: &Self::Board, policy: &[f32]) -> Vec<(Self::Board, Vec<f32>)> {
        vec![(*board, policy.to_vec())]
    }

    fn board_identity(&self, _board: &Self::Board) -> BoardKey {
        BoardKey::from_bytes(Vec::new())
    }
}
