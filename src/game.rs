//! Core game state and turn logic
//!
//! A turn walks through three choices (piece, rotation, column) before
//! anything is committed. Every step returns a [`TurnOutcome`]; nothing in
//! here fails with an error.

use crate::board::Board;
use crate::mode::GameMode;
use crate::piece::Piece;
use crate::placement::{self, Placement, Preview};
use crate::pool::PiecePool;
use crate::score::{Score, penalty_rows_for};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Confirm,
    Back,
}

/// Step of the current player's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    ChoosePiece,
    ChooseRotation,
    ChooseColumn,
    /// Back was pressed while choosing a piece
    ConfirmExit,
}

/// What a single action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Still choosing
    Pending,
    /// Nothing was committed, the same player chooses again
    Retry,
    /// Exit confirmed
    BackToMenu,
    Placed { points: u32, lines: usize },
    Lost,
    /// The placement emptied the pool
    Exhausted,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Single player placed every piece
    Cleared,
    /// Single player reached the hidden rows
    ToppedOut,
    /// Index of the winning player
    Winner(usize),
    Draw,
    /// Index of the player who left
    Abandoned(usize),
}

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Over(GameResult),
}

/// One side of the table
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub board: Board,
    pub score: Score,
    pub is_computer: bool,
    /// Topped out this round
    pub lost: bool,
}

impl Player {
    fn new(name: &str, is_computer: bool) -> Self {
        Self {
            name: name.to_string(),
            board: Board::new(),
            score: Score::new(),
            is_computer,
            lost: false,
        }
    }
}

/// The main game struct
pub struct Game {
    mode: GameMode,
    pub players: Vec<Player>,
    /// Shared by every player
    pool: PiecePool,
    /// Index of the player whose turn it is
    current: usize,
    phase: TurnPhase,
    /// Pool index of the highlighted piece
    selected: usize,
    rotation: usize,
    column: usize,
    pub state: GameState,
    /// Last event text to display
    pub last_action: Option<String>,
    rng: ChaCha8Rng,
}

impl Game {
    /// Create a new game with a random computer seed
    pub fn new(mode: GameMode, base_quantity: u32) -> Self {
        Self::with_seed(mode, base_quantity, rand::random())
    }

    /// Create a new game whose computer moves are reproducible
    pub fn with_seed(mode: GameMode, base_quantity: u32, seed: u64) -> Self {
        let mut players = vec![Player::new("Player 1", false)];
        match mode {
            GameMode::Single => {}
            GameMode::TwoPlayer => players.push(Player::new("Player 2", false)),
            GameMode::VersusCom => players.push(Player::new("COM", true)),
        }

        let pool = PiecePool::new(mode.is_multiplayer(), base_quantity);
        info!(mode = mode.name(), base_quantity, seed, "session started");

        let mut game = Self {
            mode,
            players,
            pool,
            current: 0,
            phase: TurnPhase::ChoosePiece,
            selected: 0,
            rotation: 0,
            column: 0,
            state: GameState::Playing,
            last_action: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        game.begin_turn();
        game
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn pool(&self) -> &PiecePool {
        &self.pool
    }

    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// The highlighted piece, with its working shape as currently rotated
    pub fn selected_piece(&self) -> Option<&Piece> {
        self.pool.get(self.selected)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::Over(_))
    }

    /// Where the highlighted piece would land, while choosing a column
    pub fn preview(&self) -> Option<Preview> {
        if self.phase != TurnPhase::ChooseColumn || self.is_over() {
            return None;
        }
        let piece = self.selected_piece()?;
        let board = &self.players[self.current].board;
        Some(placement::preview(board, piece, self.column, self.rotation))
    }

    /// Process an action for the current human player
    pub fn handle_action(&mut self, action: Action) -> TurnOutcome {
        if self.is_over() {
            return TurnOutcome::Pending;
        }
        match self.phase {
            TurnPhase::ChoosePiece => self.choose_piece(action),
            TurnPhase::ChooseRotation => self.choose_rotation(action),
            TurnPhase::ChooseColumn => self.choose_column(action),
            TurnPhase::ConfirmExit => self.confirm_exit(action),
        }
    }

    fn choose_piece(&mut self, action: Action) -> TurnOutcome {
        match action {
            Action::Down | Action::Left => {
                if let Some(next) = self.pool.next_available(self.selected) {
                    self.selected = next;
                }
                TurnOutcome::Pending
            }
            Action::Up | Action::Right => {
                if let Some(prev) = self.pool.previous_available(self.selected) {
                    self.selected = prev;
                }
                TurnOutcome::Pending
            }
            Action::Confirm => {
                let Some(piece) = self.pool.get(self.selected) else {
                    return self.retry();
                };
                if !piece.is_available() {
                    self.last_action = Some(format!("No {} pieces left", piece.kind.name()));
                    return self.retry();
                }
                self.rotation = 0;
                self.column = 0;
                self.phase = if piece.rotation_count() > 1 {
                    TurnPhase::ChooseRotation
                } else {
                    TurnPhase::ChooseColumn
                };
                TurnOutcome::Pending
            }
            Action::Back => {
                self.phase = TurnPhase::ConfirmExit;
                self.last_action = Some("Press back again to leave the game".to_string());
                TurnOutcome::Pending
            }
        }
    }

    fn choose_rotation(&mut self, action: Action) -> TurnOutcome {
        let Some(piece) = self.pool.get_mut(self.selected) else {
            return self.retry();
        };
        let count = piece.rotation_count();
        match action {
            Action::Up | Action::Right => {
                piece.rotate_right(1);
                self.rotation = (self.rotation + 1) % count;
                TurnOutcome::Pending
            }
            Action::Down | Action::Left => {
                piece.rotate_left(1);
                self.rotation = (self.rotation + count - 1) % count;
                TurnOutcome::Pending
            }
            Action::Confirm => {
                self.column = 0;
                self.phase = TurnPhase::ChooseColumn;
                TurnOutcome::Pending
            }
            Action::Back => self.retry(),
        }
    }

    fn choose_column(&mut self, action: Action) -> TurnOutcome {
        let max_column = self.max_column();
        match action {
            Action::Right => {
                self.column = if self.column >= max_column { 0 } else { self.column + 1 };
                TurnOutcome::Pending
            }
            Action::Left => {
                self.column = if self.column == 0 { max_column } else { self.column - 1 };
                TurnOutcome::Pending
            }
            Action::Up | Action::Down => TurnOutcome::Pending,
            Action::Confirm => self.commit(),
            Action::Back => self.retry(),
        }
    }

    fn confirm_exit(&mut self, action: Action) -> TurnOutcome {
        if action == Action::Back {
            info!(player = self.current, "game abandoned");
            self.state = GameState::Over(GameResult::Abandoned(self.current));
            TurnOutcome::BackToMenu
        } else {
            self.last_action = None;
            self.retry()
        }
    }

    /// Rightmost column for the piece as currently rotated
    fn max_column(&self) -> usize {
        let cols = self.players[self.current].board.cols();
        let width = self.selected_piece().map_or(1, Piece::width);
        cols.saturating_sub(width)
    }

    /// Undo the uncommitted choices and restart the turn
    fn retry(&mut self) -> TurnOutcome {
        if let Some(piece) = self.pool.get_mut(self.selected) {
            piece.reset_shape();
        }
        self.phase = TurnPhase::ChoosePiece;
        self.rotation = 0;
        self.column = 0;
        if !self.pool.get(self.selected).is_some_and(Piece::is_available) {
            self.selected = self.pool.first_available().unwrap_or(0);
        }
        TurnOutcome::Retry
    }

    fn begin_turn(&mut self) {
        self.phase = TurnPhase::ChoosePiece;
        self.selected = self.pool.first_available().unwrap_or(0);
        self.rotation = 0;
        self.column = 0;
    }

    /// Drop the chosen piece into the current player's field
    fn commit(&mut self) -> TurnOutcome {
        let player = self.current;
        let Some(piece) = self.pool.get_mut(self.selected) else {
            return self.retry();
        };
        let kind = piece.kind;
        let placement = placement::insert(
            &mut self.players[player].board,
            piece,
            self.column,
            self.rotation,
        );
        let landing = *placement.landing();
        let name = self.players[player].name.clone();
        let outcome = match placement {
            Placement::Lost(_) => {
                self.players[player].lost = true;
                self.last_action = Some(format!("{} topped out", name));
                TurnOutcome::Lost
            }
            Placement::Placed(_) => {
                let points = self.players[player].score.add_placement(landing.lines_cleared);
                self.last_action = Some(match Score::clear_name(landing.lines_cleared) {
                    Some(clear) => format!("{}: {}! +{}", name, clear, points),
                    None => format!("{} placed {}", name, kind.name()),
                });
                self.retaliate(player, landing.lines_cleared);
                if self.pool.pieces_available() {
                    TurnOutcome::Placed {
                        points,
                        lines: landing.lines_cleared,
                    }
                } else {
                    TurnOutcome::Exhausted
                }
            }
        };

        self.finish_turn();
        outcome
    }

    /// Invert the opponent's bottom rows after a big clear
    fn retaliate(&mut self, player: usize, lines: usize) {
        if !self.mode.is_multiplayer() {
            return;
        }
        let rows = penalty_rows_for(lines);
        if rows == 0 {
            return;
        }
        let opponent = 1 - player;
        self.players[opponent].board.invert_rows(rows);
        debug!(player, opponent, rows, "penalty rows applied");
        if let Some(text) = &mut self.last_action {
            text.push_str(&format!(" ({} rows inverted)", rows));
        }
    }

    fn finish_turn(&mut self) {
        if !self.mode.is_multiplayer() {
            let player = &self.players[0];
            if player.lost {
                self.end(GameResult::ToppedOut);
            } else if !self.pool.pieces_available() {
                self.end(GameResult::Cleared);
            } else {
                self.begin_turn();
            }
            return;
        }

        if self.current == 0 && self.pool.pieces_available() {
            self.current = 1;
            self.begin_turn();
            if self.players[1].is_computer {
                self.play_computer_turn();
            }
        } else {
            self.end_round();
        }
    }

    /// Decide the session once both players had their move
    fn end_round(&mut self) {
        let result = match (self.players[0].lost, self.players[1].lost) {
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Winner(1)),
            (false, true) => Some(GameResult::Winner(0)),
            (false, false) if !self.pool.pieces_available() => {
                let (a, b) = (self.players[0].score.points, self.players[1].score.points);
                Some(match a.cmp(&b) {
                    std::cmp::Ordering::Greater => GameResult::Winner(0),
                    std::cmp::Ordering::Less => GameResult::Winner(1),
                    std::cmp::Ordering::Equal => GameResult::Draw,
                })
            }
            (false, false) => None,
        };

        match result {
            Some(result) => self.end(result),
            None => {
                self.current = 0;
                self.begin_turn();
            }
        }
    }

    /// Random legal move for the computer player
    fn play_computer_turn(&mut self) {
        let Some(selected) = self.pool.random_available(&mut self.rng) else {
            self.end_round();
            return;
        };
        let rotation_count = self.pool.get(selected).map_or(1, Piece::rotation_count);
        let cols = self.players[self.current].board.cols();

        self.selected = selected;
        self.rotation = self.rng.gen_range(0..rotation_count);
        self.column = self.rng.gen_range(0..cols);
        debug!(
            piece = selected,
            rotation = self.rotation,
            column = self.column,
            "computer move"
        );
        self.commit();
    }

    fn end(&mut self, result: GameResult) {
        info!(
            ?result,
            scores = ?self.players.iter().map(|p| p.score.points).collect::<Vec<_>>(),
            "session ended"
        );
        self.state = GameState::Over(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PENALTY_CODE;

    const SEED: u64 = 42;

    fn drain_all_but(game: &mut Game, keep: usize, quantity: u32) {
        for idx in 0..7 {
            if let Some(piece) = game.pool.get_mut(idx) {
                piece.quantity = if idx == keep { quantity } else { 0 };
            }
        }
        game.begin_turn();
    }

    fn fill_row_except(board: &mut Board, row: usize, skip: usize) {
        for col in 0..board.cols() {
            if col != skip {
                board.set(row, col, PENALTY_CODE);
            }
        }
    }

    /// Confirm every default choice until something is committed
    fn place_default(game: &mut Game) -> TurnOutcome {
        for _ in 0..3 {
            let outcome = game.handle_action(Action::Confirm);
            if outcome != TurnOutcome::Pending {
                return outcome;
            }
        }
        TurnOutcome::Pending
    }

    /// Select the I piece, stand it up and drop it at column 0
    fn place_vertical_line(game: &mut Game) -> TurnOutcome {
        game.handle_action(Action::Down);
        assert_eq!(game.selected(), 1);
        game.handle_action(Action::Confirm);
        game.handle_action(Action::Up);
        game.handle_action(Action::Confirm);
        assert_eq!(game.phase(), TurnPhase::ChooseColumn);
        game.handle_action(Action::Confirm)
    }

    #[test]
    fn test_new_single_game() {
        let game = Game::with_seed(GameMode::Single, 20, SEED);
        assert_eq!(game.players.len(), 1);
        assert_eq!(game.phase(), TurnPhase::ChoosePiece);
        assert_eq!(game.selected(), 0);
        assert!(game.pool().iter().all(|p| p.quantity == 20));
        assert_eq!(game.state, GameState::Playing);
    }

    #[test]
    fn test_multiplayer_pool_is_doubled() {
        let game = Game::with_seed(GameMode::TwoPlayer, 20, SEED);
        assert_eq!(game.players.len(), 2);
        assert!(game.pool().iter().all(|p| p.quantity == 40));
    }

    #[test]
    fn test_piece_navigation_wraps() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        game.handle_action(Action::Down);
        assert_eq!(game.selected(), 1);
        game.handle_action(Action::Up);
        game.handle_action(Action::Up);
        assert_eq!(game.selected(), 6);
    }

    #[test]
    fn test_back_out_of_rotation_changes_nothing() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        game.handle_action(Action::Confirm);
        assert_eq!(game.phase(), TurnPhase::ChooseRotation);
        game.handle_action(Action::Right);
        assert_eq!(game.rotation(), 1);

        assert_eq!(game.handle_action(Action::Back), TurnOutcome::Retry);
        assert_eq!(game.phase(), TurnPhase::ChoosePiece);
        let piece = game.selected_piece().unwrap();
        assert_eq!(piece.shape(), piece.base_shape());
        assert_eq!(piece.quantity, 20);
        assert!(game.players[0].board.is_empty());
    }

    #[test]
    fn test_back_out_of_column_changes_nothing() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        game.handle_action(Action::Confirm);
        game.handle_action(Action::Confirm);
        game.handle_action(Action::Right);
        assert_eq!(game.handle_action(Action::Back), TurnOutcome::Retry);
        assert_eq!(game.column(), 0);
        assert_eq!(game.pool().remaining(), 140);
    }

    #[test]
    fn test_rotation_left_wraps() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        game.handle_action(Action::Confirm);
        game.handle_action(Action::Left);
        assert_eq!(game.rotation(), 3);
    }

    #[test]
    fn test_exit_needs_two_backs() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        assert_eq!(game.handle_action(Action::Back), TurnOutcome::Pending);
        assert_eq!(game.phase(), TurnPhase::ConfirmExit);
        assert_eq!(game.handle_action(Action::Confirm), TurnOutcome::Retry);
        assert_eq!(game.state, GameState::Playing);

        game.handle_action(Action::Back);
        assert_eq!(game.handle_action(Action::Back), TurnOutcome::BackToMenu);
        assert_eq!(game.state, GameState::Over(GameResult::Abandoned(0)));
    }

    #[test]
    fn test_square_skips_rotation() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        for _ in 0..4 {
            game.handle_action(Action::Down);
        }
        assert_eq!(game.selected(), 4);
        game.handle_action(Action::Confirm);
        assert_eq!(game.phase(), TurnPhase::ChooseColumn);

        game.handle_action(Action::Right);
        game.handle_action(Action::Right);
        let outcome = game.handle_action(Action::Confirm);
        assert_eq!(outcome, TurnOutcome::Placed { points: 0, lines: 0 });
        assert_eq!(game.players[0].board.get(18, 2), Some(5));
        assert_eq!(game.pool().get(4).unwrap().quantity, 19);
        assert_eq!(game.phase(), TurnPhase::ChoosePiece);
    }

    #[test]
    fn test_column_wraps_within_width() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        drain_all_but(&mut game, 4, 5);
        game.handle_action(Action::Confirm);
        game.handle_action(Action::Left);
        assert_eq!(game.column(), 8);
        game.handle_action(Action::Right);
        assert_eq!(game.column(), 0);
    }

    #[test]
    fn test_preview_only_while_choosing_column() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        assert!(game.preview().is_none());
        drain_all_but(&mut game, 4, 5);
        game.handle_action(Action::Confirm);
        let preview = game.preview().unwrap();
        assert_eq!(preview.placement.landing().row, 17);
        assert!(game.players[0].board.is_empty());
    }

    #[test]
    fn test_confirm_on_exhausted_piece_retries() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        game.pool.get_mut(0).unwrap().quantity = 0;
        game.selected = 0;
        assert_eq!(game.handle_action(Action::Confirm), TurnOutcome::Retry);
        assert_eq!(game.selected(), 1);
        assert_eq!(game.phase(), TurnPhase::ChoosePiece);
    }

    #[test]
    fn test_single_player_wins_when_pool_empties() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        drain_all_but(&mut game, 4, 1);
        assert_eq!(place_default(&mut game), TurnOutcome::Exhausted);
        assert_eq!(game.state, GameState::Over(GameResult::Cleared));
    }

    #[test]
    fn test_single_player_tops_out() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        for row in 4..19 {
            game.players[0].board.set(row, 0, 3);
        }
        assert_eq!(place_vertical_line(&mut game), TurnOutcome::Lost);
        assert_eq!(game.state, GameState::Over(GameResult::ToppedOut));
    }

    #[test]
    fn test_losing_move_scores_nothing() {
        let mut game = Game::with_seed(GameMode::Single, 20, SEED);
        let board = &mut game.players[0].board;
        for row in 1..19 {
            board.set(row, 0, 3);
        }
        fill_row_except(board, 18, 5);

        game.handle_action(Action::Down);
        game.handle_action(Action::Confirm);
        game.handle_action(Action::Up);
        game.handle_action(Action::Confirm);
        for _ in 0..5 {
            game.handle_action(Action::Right);
        }
        assert_eq!(game.column(), 5);
        assert_eq!(game.handle_action(Action::Confirm), TurnOutcome::Lost);

        let score = &game.players[0].score;
        assert_eq!(score.points, 0);
        assert_eq!(score.lines, 0);
        assert_eq!(game.state, GameState::Over(GameResult::ToppedOut));
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::with_seed(GameMode::TwoPlayer, 20, SEED);
        assert_eq!(game.current_player(), 0);
        place_default(&mut game);
        assert_eq!(game.current_player(), 1);
        place_default(&mut game);
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.players[0].score.pieces, 1);
        assert_eq!(game.players[1].score.pieces, 1);
    }

    #[test]
    fn test_triple_inverts_opponent_rows() {
        let mut game = Game::with_seed(GameMode::TwoPlayer, 20, SEED);
        for row in 16..19 {
            fill_row_except(&mut game.players[0].board, row, 0);
        }

        let outcome = place_vertical_line(&mut game);
        assert_eq!(outcome, TurnOutcome::Placed { points: 6, lines: 3 });
        let opponent = &game.players[1].board;
        for row in 16..19 {
            assert!(opponent.row(row).unwrap().iter().all(|&c| c == PENALTY_CODE));
        }
        assert!(opponent.is_empty_row(15));
    }

    #[test]
    fn test_double_does_not_retaliate() {
        let mut game = Game::with_seed(GameMode::TwoPlayer, 20, SEED);
        for row in 17..19 {
            fill_row_except(&mut game.players[0].board, row, 0);
        }
        let outcome = place_vertical_line(&mut game);
        assert_eq!(outcome, TurnOutcome::Placed { points: 3, lines: 2 });
        assert!(game.players[1].board.is_empty());
    }

    #[test]
    fn test_second_player_still_moves_after_loss() {
        let mut game = Game::with_seed(GameMode::TwoPlayer, 20, SEED);
        for row in 4..19 {
            game.players[0].board.set(row, 0, 3);
        }
        assert_eq!(place_vertical_line(&mut game), TurnOutcome::Lost);
        assert_eq!(game.state, GameState::Playing);
        assert_eq!(game.current_player(), 1);

        place_default(&mut game);
        assert_eq!(game.state, GameState::Over(GameResult::Winner(1)));
    }

    #[test]
    fn test_both_lost_is_draw() {
        let mut game = Game::with_seed(GameMode::TwoPlayer, 20, SEED);
        for player in &mut game.players {
            for row in 4..19 {
                player.board.set(row, 0, 3);
            }
        }
        place_vertical_line(&mut game);
        place_vertical_line(&mut game);
        assert_eq!(game.state, GameState::Over(GameResult::Draw));
    }

    #[test]
    fn test_exhausted_pool_compares_scores() {
        let mut game = Game::with_seed(GameMode::TwoPlayer, 20, SEED);
        drain_all_but(&mut game, 4, 1);
        game.players[1].score.points = 3;
        assert_eq!(place_default(&mut game), TurnOutcome::Exhausted);
        assert_eq!(game.state, GameState::Over(GameResult::Winner(1)));
    }

    #[test]
    fn test_exhausted_pool_with_equal_scores_is_draw() {
        let mut game = Game::with_seed(GameMode::TwoPlayer, 20, SEED);
        drain_all_but(&mut game, 4, 2);
        place_default(&mut game);
        assert_eq!(game.current_player(), 1);
        assert_eq!(place_default(&mut game), TurnOutcome::Exhausted);
        assert_eq!(game.state, GameState::Over(GameResult::Draw));
    }

    #[test]
    fn test_computer_answers_every_move() {
        let mut game = Game::with_seed(GameMode::VersusCom, 20, SEED);
        place_default(&mut game);
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.players[1].score.pieces, 1);
        assert_eq!(game.pool().remaining(), 280 - 2);
        assert!(!game.players[1].board.is_empty());
    }

    #[test]
    fn test_computer_is_reproducible() {
        let mut a = Game::with_seed(GameMode::VersusCom, 20, 7);
        let mut b = Game::with_seed(GameMode::VersusCom, 20, 7);
        for _ in 0..10 {
            place_default(&mut a);
            place_default(&mut b);
        }
        assert_eq!(a.players[1].board, b.players[1].board);
        assert_eq!(a.players[1].score, b.players[1].score);
    }

    #[test]
    fn test_versus_com_always_finishes() {
        let mut game = Game::with_seed(GameMode::VersusCom, 3, 99);
        for _ in 0..100 {
            if game.is_over() {
                break;
            }
            game.handle_action(Action::Right);
            place_default(&mut game);
        }
        assert!(game.is_over());
        assert!(!matches!(game.state, GameState::Over(GameResult::Abandoned(_))));
    }
}
