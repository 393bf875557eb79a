//! Typed Game trait describing the rules boundary for two-player search
//!
//! The search engine and the arena only ever talk to a game through this
//! trait. Boards are opaque values owned by the game; the engine keys its
//! statistics on [`BoardKey`] values produced by [`Game::board_identity`].

use std::fmt;

/// Side to move in a strictly alternating two-player game.
///
/// `One` carries sign `+1` and `Two` carries sign `-1`. Canonical boards are
/// always evaluated as if `One` were to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Numeric sign of this side: `+1.0` for `One`, `-1.0` for `Two`.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Player::One => 1.0,
            Player::Two => -1.0,
        }
    }

    /// Integer sign, handy for boards storing pieces as `1` / `-1`.
    #[inline]
    pub fn as_i8(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    /// The other side.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl TryFrom<i8> for Player {
    type Error = InvalidPlayer;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            -1 => Ok(Player::Two),
            other => Err(InvalidPlayer(other)),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "1"),
            Player::Two => write!(f, "-1"),
        }
    }
}

/// Error returned when converting a number that is neither `1` nor `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid player sign {0}, expected 1 or -1")]
pub struct InvalidPlayer(pub i8);

/// Fixed-length legal-move mask over the whole action space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionMask(Vec<bool>);

impl ActionMask {
    /// Mask of `len` actions with nothing allowed.
    pub fn none(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// Mask of `len` actions with everything allowed.
    pub fn all(len: usize) -> Self {
        Self(vec![true; len])
    }

    /// Build a mask by evaluating `f` for every action index.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> bool) -> Self {
        Self((0..len).map(f).collect())
    }

    /// Mark `action` as legal.
    ///
    /// # Panics
    ///
    /// Panics if `action` is outside the action space.
    pub fn allow(&mut self, action: usize) {
        self.0[action] = true;
    }

    /// Whether `action` is legal. Out-of-range actions are never legal.
    #[inline]
    pub fn is_valid(&self, action: usize) -> bool {
        self.0.get(action).copied().unwrap_or(false)
    }

    /// Size of the action space this mask covers.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of legal actions.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&v| v).count()
    }

    /// True when no action is legal.
    pub fn has_none(&self) -> bool {
        !self.0.iter().any(|&v| v)
    }

    /// Iterate over legal action indices in ascending order.
    pub fn iter_valid(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| if v { Some(i) } else { None })
    }

    /// Mask value as `1.0` / `0.0`, used when multiplying policy vectors.
    #[inline]
    pub fn weight(&self, action: usize) -> f32 {
        if self.is_valid(action) {
            1.0
        } else {
            0.0
        }
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl From<Vec<bool>> for ActionMask {
    fn from(v: Vec<bool>) -> Self {
        Self(v)
    }
}

/// Stable identity of a board, used as the sole memoization key by search.
///
/// Keys compare by their full byte content, so two boards share a key only
/// when the game encodes them identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardKey(Box<[u8]>);

impl BoardKey {
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }
}

/// Rules of a two-player, zero-sum, turn-based game.
///
/// Players are [`Player::One`] and [`Player::Two`]. Every operation is a pure
/// function of its inputs: boards are never mutated in place, a new board is
/// returned instead.
///
/// # Terminal values
///
/// [`Game::game_ended`] returns `0.0` while the game is unresolved, `1.0` /
/// `-1.0` for a decisive result from the given player's point of view, and a
/// small non-zero value (see [`crate::game_utils::DRAW_VALUE`]) for a draw, so
/// callers can tell "not ended" from "drawn" with an equality test.
///
/// # Example
///
/// ```rust
/// use engine_core::typed::{ActionMask, BoardKey, Game, Player};
///
/// /// First player to take the single token wins.
/// #[derive(Debug)]
/// struct TakeOne;
///
/// impl Game for TakeOne {
///     type Board = (bool, i8); // (taken, taker sign)
///
///     fn initial_board(&self) -> Self::Board { (false, 0) }
///     fn board_size(&self) -> Vec<usize> { vec![1] }
///     fn action_size(&self) -> usize { 1 }
///     fn next_state(&self, _b: &Self::Board, p: Player, _a: usize) -> (Self::Board, Player) {
///         ((true, p.as_i8()), p.opponent())
///     }
///     fn valid_moves(&self, _b: &Self::Board, _p: Player) -> ActionMask { ActionMask::all(1) }
///     fn game_ended(&self, b: &Self::Board, p: Player) -> f32 {
///         if !b.0 { 0.0 } else if b.1 == p.as_i8() { 1.0 } else { -1.0 }
///     }
///     fn canonical_form(&self, b: &Self::Board, p: Player) -> Self::Board { (b.0, b.1 * p.as_i8()) }
///     fn symmetries(&self, b: &Self::Board, pi: &[f32]) -> Vec<(Self::Board, Vec<f32>)> {
///         vec![(*b, pi.to_vec())]
///     }
///     fn board_identity(&self, b: &Self::Board) -> BoardKey {
///         BoardKey::from_bytes(vec![b.0 as u8, b.1 as u8])
///     }
/// }
///
/// let game = TakeOne;
/// let (board, next) = game.next_state(&game.initial_board(), Player::One, 0);
/// assert_eq!(next, Player::Two);
/// assert_eq!(game.game_ended(&board, Player::One), 1.0);
/// ```
pub trait Game: fmt::Debug {
    /// Board representation. Cloned freely by callers, never mutated by them.
    type Board: Clone + fmt::Debug;

    /// Starting position.
    fn initial_board(&self) -> Self::Board;

    /// Fixed shape descriptor of boards for this game instance.
    fn board_size(&self) -> Vec<usize>;

    /// Total number of distinct actions, including a trailing pass action
    /// when the game has one.
    fn action_size(&self) -> usize;

    /// Apply `action` for `player`, returning the new board and the side to
    /// move next. `action` must be valid for `player` on `board`.
    fn next_state(
        &self,
        board: &Self::Board,
        player: Player,
        action: usize,
    ) -> (Self::Board, Player);

    /// Legal actions for `player`. Never all-false unless the board is
    /// terminal; games without legal placements expose a pass action instead.
    fn valid_moves(&self, board: &Self::Board, player: Player) -> ActionMask;

    /// `0.0` while unresolved, otherwise the outcome from `player`'s view.
    fn game_ended(&self, board: &Self::Board, player: Player) -> f32;

    /// The board as seen by [`Player::One`] when `player` is to move.
    fn canonical_form(&self, board: &Self::Board, player: Player) -> Self::Board;

    /// Board/policy pairs related by the game's symmetry group, including
    /// the identity. Used for training data augmentation.
    fn symmetries(&self, board: &Self::Board, policy: &[f32]) -> Vec<(Self::Board, Vec<f32>)>;

    /// Identity of `board`. Indistinguishable boards must map to equal keys.
    fn board_identity(&self, board: &Self::Board) -> BoardKey;

    /// Human-readable rendering for verbose arena output.
    fn render(&self, board: &Self::Board) -> String {
        format!("{board:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_player_sign_and_opponent() {
        assert_eq!(Player::One.sign(), 1.0);
        assert_eq!(Player::Two.sign(), -1.0);
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent().opponent(), Player::Two);
        assert_eq!(Player::Two.as_i8(), -1);
    }

    #[test]
    fn test_player_try_from() {
        assert_eq!(Player::try_from(1), Ok(Player::One));
        assert_eq!(Player::try_from(-1), Ok(Player::Two));
        assert_eq!(Player::try_from(0), Err(InvalidPlayer(0)));
        assert!(InvalidPlayer(3).to_string().contains("expected 1 or -1"));
    }

    #[test]
    fn test_action_mask_queries() {
        let mut mask = ActionMask::none(5);
        assert!(mask.has_none());
        mask.allow(1);
        mask.allow(3);

        assert_eq!(mask.len(), 5);
        assert_eq!(mask.count(), 2);
        assert!(mask.is_valid(3));
        assert!(!mask.is_valid(0));
        assert!(!mask.is_valid(99));
        assert_eq!(mask.iter_valid().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(mask.weight(1), 1.0);
        assert_eq!(mask.weight(2), 0.0);
    }

    #[test]
    fn test_action_mask_from_fn() {
        let mask = ActionMask::from_fn(6, |a| a % 2 == 0);
        assert_eq!(mask.as_slice(), &[true, false, true, false, true, false]);
        assert_eq!(ActionMask::all(4).count(), 4);
    }

    #[test]
    fn test_board_key_equality_is_exact() {
        let a = BoardKey::from_bytes(vec![1, 2, 3]);
        let b = BoardKey::from_bytes(vec![1, 2, 3]);
        let c = BoardKey::from_bytes(vec![1, 2, 4]);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut table = HashMap::new();
        table.insert(a, 1);
        table.insert(c, 2);
        assert_eq!(table.get(&b), Some(&1));
    }
}
