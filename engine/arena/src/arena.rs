//! Head-to-head matches between two players.

use engine_core::game_utils::{is_loss, is_win};
use engine_core::{Game, Player as Side};
use tracing::{debug, error, info};

use crate::error::ArenaError;
use crate::player::Player;
use crate::progress::progress_bar;

/// Renders a board for verbose output.
pub type BoardDisplay<'a, B> = Box<dyn Fn(&B) -> String + 'a>;

/// Tally of a series of games, from the point of view of the players as
/// they were passed to [`Arena::new`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaResult {
    pub one_won: u32,
    pub two_won: u32,
    pub draws: u32,
}

impl ArenaResult {
    pub fn total(&self) -> u32 {
        self.one_won + self.two_won + self.draws
    }

    /// Share of decisive games won by the first player, `None` if every
    /// game was drawn.
    pub fn win_rate(&self) -> Option<f32> {
        let decisive = self.one_won + self.two_won;
        (decisive > 0).then(|| self.one_won as f32 / decisive as f32)
    }

    /// Count one game result. `swapped` means the players had traded seats.
    fn record(&mut self, result: f32, swapped: bool) {
        let result = if swapped { -result } else { result };
        if is_win(result) {
            self.one_won += 1;
        } else if is_loss(result) {
            self.two_won += 1;
        } else {
            self.draws += 1;
        }
    }
}

/// Plays two agents against each other.
pub struct Arena<'a, G: Game> {
    player1: Box<dyn Player<G> + 'a>,
    player2: Box<dyn Player<G> + 'a>,
    game: &'a G,
    display: Option<BoardDisplay<'a, G::Board>>,
}

impl<'a, G: Game> Arena<'a, G> {
    pub fn new(player1: impl Player<G> + 'a, player2: impl Player<G> + 'a, game: &'a G) -> Self {
        Self {
            player1: Box::new(player1),
            player2: Box::new(player2),
            game,
            display: None,
        }
    }

    /// Builder pattern: render boards with `display` in verbose mode instead
    /// of [`Game::render`].
    pub fn with_display(mut self, display: impl Fn(&G::Board) -> String + 'a) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    /// Play one game with `player1` moving first.
    ///
    /// Returns 1 if `player1` won, -1 if `player2` won, or the game's small
    /// non-zero draw value. Every player gets `start_game` before the first
    /// move and `end_game` afterwards, even when the game is aborted
    /// (including by a failing `start_game`).
    pub fn play_game(&mut self, verbose: bool) -> Result<f32, ArenaError> {
        let outcome = self.start_players().and_then(|()| self.run_game(verbose));

        let end1 = self.player1.end_game();
        let end2 = self.player2.end_game();
        let result = outcome?;
        end1?;
        end2?;
        Ok(result)
    }

    fn start_players(&mut self) -> Result<(), ArenaError> {
        self.player1.start_game()?;
        self.player2.start_game()
    }

    fn run_game(&mut self, verbose: bool) -> Result<f32, ArenaError> {
        let game = self.game;
        let mut board = game.initial_board();
        let mut current = Side::One;
        let mut turn = 0u32;

        while game.game_ended(&board, current) == 0.0 {
            turn += 1;
            if verbose {
                let rendered = self.render(&board);
                info!(turn, player = %current, "\n{rendered}");
            }

            let canonical = game.canonical_form(&board, current);
            let action = self.seat(current).play(&canonical)?;

            let valid = game.valid_moves(&canonical, Side::One);
            if !valid.is_valid(action) {
                error!(action, player = %current, "Action is not valid");
                debug!(valid = ?valid.as_slice(), "Valid moves");
                return Err(ArenaError::InvalidAction {
                    action,
                    player: current,
                });
            }

            self.seat(current.opponent()).notify(&board, action)?;

            let (next, next_player) = game.next_state(&board, current, action);
            board = next;
            current = next_player;
        }

        let result = current.sign() * game.game_ended(&board, current);
        if verbose {
            let rendered = self.render(&board);
            info!(
                turn,
                result = game.game_ended(&board, Side::One),
                "Game over\n{rendered}"
            );
        }
        Ok(result)
    }

    /// Play `num / 2` games with `player1` first, then `num / 2` with
    /// `player2` first. An odd `num` plays one game fewer.
    pub fn play_games(&mut self, num: u32, verbose: bool) -> Result<ArenaResult, ArenaError> {
        let half = num / 2;
        let mut tally = ArenaResult::default();

        let progress = progress_bar(half as u64, "Arena.play_games (1)", "games");
        for _ in 0..half {
            let result = self.play_game(verbose)?;
            tally.record(result, false);
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        std::mem::swap(&mut self.player1, &mut self.player2);
        let second = self.play_swapped_half(half, verbose, &mut tally);
        std::mem::swap(&mut self.player1, &mut self.player2);
        second?;

        info!(
            one_won = tally.one_won,
            two_won = tally.two_won,
            draws = tally.draws,
            "Arena finished"
        );
        Ok(tally)
    }

    fn play_swapped_half(
        &mut self,
        half: u32,
        verbose: bool,
        tally: &mut ArenaResult,
    ) -> Result<(), ArenaError> {
        let progress = progress_bar(half as u64, "Arena.play_games (2)", "games");
        for _ in 0..half {
            let result = self.play_game(verbose)?;
            tally.record(result, true);
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        Ok(())
    }

    fn seat(&mut self, side: Side) -> &mut (dyn Player<G> + 'a) {
        match side {
            Side::One => self.player1.as_mut(),
            Side::Two => self.player2.as_mut(),
        }
    }

    fn render(&self, board: &G::Board) -> String {
        match &self.display {
            Some(display) => display(board),
            None => self.game.render(board),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{policy_fn, RandomPlayer};
    use engine_core::test_games::{DrawGame, LineGame};
    use engine_core::DRAW_VALUE;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn first_free() -> impl FnMut(&[i8; 3]) -> usize {
        |b: &[i8; 3]| b.iter().position(|&c| c == 0).unwrap_or(0)
    }

    #[test]
    fn test_first_mover_wins_line_game() {
        let game = LineGame;
        let mut arena = Arena::new(policy_fn(first_free()), policy_fn(first_free()), &game);
        assert_eq!(arena.play_game(false).unwrap(), 1.0);
    }

    #[test]
    fn test_play_games_swaps_seats() {
        let game = LineGame;
        let mut arena = Arena::new(policy_fn(first_free()), policy_fn(first_free()), &game);

        let result = arena.play_games(10, false).unwrap();
        // Whoever moves first wins, so each player takes one half
        assert_eq!(result, ArenaResult { one_won: 5, two_won: 5, draws: 0 });
        assert_eq!(result.total(), 10);
        assert_eq!(result.win_rate(), Some(0.5));
    }

    #[test]
    fn test_play_games_odd_count() {
        let game = LineGame;
        let mut arena = Arena::new(policy_fn(first_free()), policy_fn(first_free()), &game);
        assert_eq!(arena.play_games(5, false).unwrap().total(), 4);
    }

    #[test]
    fn test_draws_counted() {
        let game = DrawGame;
        let mut arena = Arena::new(policy_fn(|_: &bool| 0), policy_fn(|_: &bool| 0), &game);

        // Seen from the side to move after the last ply
        assert_eq!(arena.play_game(false).unwrap().abs(), DRAW_VALUE);
        let result = arena.play_games(4, false).unwrap();
        assert_eq!(result, ArenaResult { one_won: 0, two_won: 0, draws: 4 });
        assert_eq!(result.win_rate(), None);
    }

    #[test]
    fn test_random_players_tally() {
        let game = LineGame;
        let mut arena = Arena::new(
            RandomPlayer::new(&game, ChaCha20Rng::seed_from_u64(1)),
            RandomPlayer::new(&game, ChaCha20Rng::seed_from_u64(2)),
            &game,
        );
        let result = arena.play_games(10, true).unwrap();
        assert_eq!(result.total(), 10);
    }

    #[test]
    fn test_invalid_action_aborts_game() {
        let game = LineGame;
        let mut arena = Arena::new(policy_fn(|_: &[i8; 3]| 7), policy_fn(first_free()), &game);

        let err = arena.play_game(false).unwrap_err();
        assert!(matches!(
            err,
            ArenaError::InvalidAction {
                action: 7,
                player: Side::One
            }
        ));
    }

    /// Records every hook call into a shared log.
    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        action: Option<usize>,
        fail_start: bool,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Rc<RefCell<Vec<String>>>, action: Option<usize>) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                action,
                fail_start: false,
            }
        }
    }

    impl Player<LineGame> for Recorder {
        fn play(&mut self, board: &[i8; 3]) -> Result<usize, ArenaError> {
            self.log
                .borrow_mut()
                .push(format!("{} play {:?}", self.name, board));
            self.action.ok_or_else(|| ArenaError::Player("refused".to_string()))
        }

        fn start_game(&mut self) -> Result<(), ArenaError> {
            self.log.borrow_mut().push(format!("{} start", self.name));
            if self.fail_start {
                return Err(ArenaError::Player("not ready".to_string()));
            }
            Ok(())
        }

        fn notify(&mut self, board: &[i8; 3], action: usize) -> Result<(), ArenaError> {
            self.log
                .borrow_mut()
                .push(format!("{} notify {:?} {}", self.name, board, action));
            Ok(())
        }

        fn end_game(&mut self) -> Result<(), ArenaError> {
            self.log.borrow_mut().push(format!("{} end", self.name));
            Ok(())
        }
    }

    #[test]
    fn test_hooks_called_in_order() {
        let game = LineGame;
        let log = Rc::new(RefCell::new(Vec::new()));
        let p1 = Recorder::new("p1", &log, Some(2));
        let p2 = Recorder::new("p2", &log, Some(0));

        let mut arena = Arena::new(p1, p2, &game);
        assert_eq!(arena.play_game(false).unwrap(), 1.0);

        assert_eq!(
            *log.borrow(),
            vec![
                "p1 start",
                "p2 start",
                "p1 play [0, 0, 0]",
                "p2 notify [0, 0, 0] 2",
                "p1 end",
                "p2 end",
            ]
        );
    }

    #[test]
    fn test_end_game_runs_after_error() {
        let game = LineGame;
        let log = Rc::new(RefCell::new(Vec::new()));
        let p1 = Recorder::new("p1", &log, None);
        let p2 = Recorder::new("p2", &log, Some(0));

        let mut arena = Arena::new(p1, p2, &game);
        assert!(matches!(arena.play_game(false), Err(ArenaError::Player(_))));

        let log = log.borrow();
        assert_eq!(log[log.len() - 2..], ["p1 end", "p2 end"]);
    }

    #[test]
    fn test_end_game_runs_after_failed_start() {
        let game = LineGame;
        let log = Rc::new(RefCell::new(Vec::new()));
        let p1 = Recorder::new("p1", &log, Some(0));
        let mut p2 = Recorder::new("p2", &log, Some(0));
        p2.fail_start = true;

        let mut arena = Arena::new(p1, p2, &game);
        assert!(matches!(arena.play_game(false), Err(ArenaError::Player(_))));

        let expected = ["p1 start", "p2 start", "p1 end", "p2 end"];
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn test_custom_display_used_in_verbose_mode() {
        let game = LineGame;
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let players = (policy_fn(first_free()), policy_fn(first_free()));
        let mut arena = Arena::new(players.0, players.1, &game).with_display(move |b: &[i8; 3]| {
            *counter.borrow_mut() += 1;
            format!("{b:?}")
        });

        arena.play_game(true).unwrap();
        // One turn plus the final board, rendered even with no subscriber
        // listening
        assert_eq!(*calls.borrow(), 2);

        arena.play_game(false).unwrap();
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_verbose_renders_before_an_aborted_move() {
        let game = LineGame;
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let players = (policy_fn(|_: &[i8; 3]| 7), policy_fn(first_free()));
        let mut arena = Arena::new(players.0, players.1, &game).with_display(move |b: &[i8; 3]| {
            *counter.borrow_mut() += 1;
            format!("{b:?}")
        });

        // The opening board is rendered before the invalid move aborts
        assert!(arena.play_game(true).is_err());
        assert_eq!(*calls.borrow(), 1);
    }
}
