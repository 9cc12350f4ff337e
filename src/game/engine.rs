use tracing::{debug, info};

use super::{Board, Cell, Player, LINE_LENGTH};
use crate::error::{InvalidDimension, MoveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Tie,
}

impl GameStatus {
    /// Won or Tie. No further moves are accepted once terminal.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// What a successful drop did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Continue,
    Won(Player),
    Tie,
}

/// Where a piece landed and the outcome of placing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub player: Player,
    pub outcome: MoveOutcome,
}

/// Board and turn state for a single game.
///
/// Each `drop_piece` either applies fully or fails without touching any
/// state. A finished engine stays finished; start a new game by building a
/// new engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    current_player: Player,
    status: GameStatus,
}

impl GameEngine {
    /// Create a game on an empty `width` x `height` board
    pub fn new(width: usize, height: usize) -> Result<Self, InvalidDimension> {
        let board = Board::new(width, height)?;
        debug!(width, height, "new game");
        Ok(GameEngine {
            board,
            current_player: Player::FIRST,
            status: GameStatus::InProgress,
        })
    }

    /// Player whose turn it is. After the game ends this is the player who
    /// made the final move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read-only cell query; `None` for coordinates off the board
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.board.get(row, column)
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn moves_played(&self) -> usize {
        self.board.occupied_count()
    }

    /// Get list of legal columns (not full); empty once the game is over
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// The four cells that decided the game, if it was won
    pub fn winning_line(&self) -> Option<[(usize, usize); LINE_LENGTH]> {
        match self.status {
            GameStatus::Won(player) => self.board.winning_line(player),
            _ => None,
        }
    }

    /// Drop the current player's piece into `column`.
    pub fn drop_piece(&mut self, column: usize) -> Result<Placement, MoveError> {
        if self.is_terminal() {
            debug!(column, "move rejected, game already over");
            return Err(MoveError::GameAlreadyOver);
        }

        let player = self.current_player;
        let row = self.board.place(column, player).map_err(|e| {
            debug!(column, error = %e, "move rejected");
            e
        })?;
        debug!(?player, row, column, "piece placed");

        // Only the mover can have completed a line with this drop.
        let outcome = if self.board.has_four_in_a_row(player) {
            self.status = GameStatus::Won(player);
            info!(?player, moves = self.moves_played(), "game won");
            MoveOutcome::Won(player)
        } else if self.board.is_full() {
            self.status = GameStatus::Tie;
            info!(moves = self.moves_played(), "game tied");
            MoveOutcome::Tie
        } else {
            self.current_player = player.other();
            MoveOutcome::Continue
        };

        Ok(Placement {
            row,
            column,
            player,
            outcome,
        })
    }
}

impl Default for GameEngine {
    /// Standard 7 x 6 game
    fn default() -> Self {
        GameEngine {
            board: Board::default(),
            current_player: Player::FIRST,
            status: GameStatus::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Moves that fill a 7 x 6 board with alternating players and no line of four.
    const TIE_7X6: [usize; 42] = [
        0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 4, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4,
        4, 5, 5, 5, 5, 5, 5, 6, 6, 6, 6, 6, 6,
    ];

    /// Same for the minimum 4 x 4 board.
    const TIE_4X4: [usize; 16] = [0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 3, 3, 2, 3];

    fn play(engine: &mut GameEngine, columns: &[usize]) -> Placement {
        let mut last = None;
        for &col in columns {
            last = Some(engine.drop_piece(col).unwrap());
        }
        last.expect("at least one move")
    }

    #[test]
    fn test_initial_state() {
        let engine = GameEngine::default();
        assert_eq!(engine.current_player(), Player::One);
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.width(), 7);
        assert_eq!(engine.height(), 6);
        assert_eq!(engine.legal_columns().len(), 7);
        assert_eq!(engine.moves_played(), 0);
    }

    #[test]
    fn test_new_matches_default() {
        assert_eq!(GameEngine::new(7, 6).unwrap(), GameEngine::default());
    }

    #[test]
    fn test_drop_piece() {
        let mut engine = GameEngine::default();
        let placement = engine.drop_piece(3).unwrap();

        assert_eq!(
            placement,
            Placement {
                row: 5,
                column: 3,
                player: Player::One,
                outcome: MoveOutcome::Continue,
            }
        );
        assert_eq!(engine.current_player(), Player::Two);
        assert_eq!(engine.cell(5, 3), Some(Cell::Occupied(Player::One)));
        assert_eq!(engine.cell(4, 3), Some(Cell::Empty));
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let engine = GameEngine::default();
        assert_eq!(engine.cell(6, 0), None);
        assert_eq!(engine.cell(0, 7), None);
    }

    #[test]
    fn test_vertical_win_on_minimum_board() {
        let mut engine = GameEngine::new(4, 4).unwrap();
        let placement = play(&mut engine, &[0, 1, 0, 1, 0, 1, 0]);

        assert_eq!(placement.row, 0);
        assert_eq!(placement.column, 0);
        assert_eq!(placement.outcome, MoveOutcome::Won(Player::One));
        assert_eq!(engine.status(), GameStatus::Won(Player::One));
        assert_eq!(
            engine.winning_line(),
            Some([(0, 0), (1, 0), (2, 0), (3, 0)])
        );
        // The winner keeps the turn marker
        assert_eq!(engine.current_player(), Player::One);
    }

    #[test]
    fn test_second_player_can_win() {
        let mut engine = GameEngine::default();
        let placement = play(&mut engine, &[0, 1, 0, 2, 6, 3, 6, 4]);
        assert_eq!(placement.outcome, MoveOutcome::Won(Player::Two));
        assert_eq!(engine.status(), GameStatus::Won(Player::Two));
    }

    #[test]
    fn test_diagonal_win() {
        let mut engine = GameEngine::default();
        // One builds a "/" from (5,0) to (2,3)
        let placement = play(&mut engine, &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);
        assert_eq!(placement.row, 2);
        assert_eq!(placement.outcome, MoveOutcome::Won(Player::One));
    }

    #[test]
    fn test_full_board_without_line_is_tie() {
        let mut engine = GameEngine::default();
        for (i, &col) in TIE_7X6.iter().enumerate() {
            let placement = engine.drop_piece(col).unwrap();
            if i + 1 < TIE_7X6.len() {
                assert_eq!(placement.outcome, MoveOutcome::Continue);
            } else {
                assert_eq!(placement.outcome, MoveOutcome::Tie);
            }
        }
        assert_eq!(engine.status(), GameStatus::Tie);
        assert!(engine.board().is_full());
        assert!(engine.legal_columns().is_empty());
        assert_eq!(engine.winning_line(), None);
    }

    #[test]
    fn test_tie_on_minimum_board() {
        let mut engine = GameEngine::new(4, 4).unwrap();
        let placement = play(&mut engine, &TIE_4X4);
        assert_eq!(placement.outcome, MoveOutcome::Tie);
        assert_eq!(engine.status(), GameStatus::Tie);
    }

    #[test]
    fn test_invalid_dimension() {
        assert_eq!(
            GameEngine::new(3, 6),
            Err(InvalidDimension {
                width: 3,
                height: 6
            })
        );
        assert!(GameEngine::new(7, 2).is_err());
    }

    #[test]
    fn test_invalid_column() {
        let mut engine = GameEngine::default();
        let before = engine.clone();
        assert_eq!(
            engine.drop_piece(10),
            Err(MoveError::InvalidColumn {
                column: 10,
                width: 7
            })
        );
        assert_eq!(engine, before);
    }

    #[test]
    fn test_full_column_leaves_state_unchanged() {
        let mut engine = GameEngine::default();
        play(&mut engine, &[0, 0, 0, 0, 0, 0]);
        let before = engine.clone();

        assert_eq!(
            engine.drop_piece(0),
            Err(MoveError::ColumnFull { column: 0 })
        );
        assert_eq!(engine, before);
        assert_eq!(engine.current_player(), Player::One);
    }

    #[test]
    fn test_moves_after_game_over_are_rejected() {
        let mut engine = GameEngine::new(4, 4).unwrap();
        play(&mut engine, &[0, 1, 0, 1, 0, 1, 0]);
        let before = engine.clone();

        assert_eq!(engine.drop_piece(2), Err(MoveError::GameAlreadyOver));
        // Game-over takes precedence over a bad column
        assert_eq!(engine.drop_piece(99), Err(MoveError::GameAlreadyOver));
        assert_eq!(engine, before);
        assert!(engine.legal_columns().is_empty());
    }

    #[test]
    fn test_random_games_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let width = rng.random_range(4..=9);
            let height = rng.random_range(4..=8);
            let mut engine = GameEngine::new(width, height).unwrap();
            let mut expected = Player::One;

            while !engine.is_terminal() {
                let snapshot = engine.board().clone();

                // Occasionally poke at an illegal column; nothing may change
                if rng.random_bool(0.2) {
                    let full: Vec<usize> =
                        (0..width).filter(|&c| snapshot.is_column_full(c)).collect();
                    let bad = if !full.is_empty() && rng.random_bool(0.5) {
                        full[rng.random_range(0..full.len())]
                    } else {
                        width + rng.random_range(0..3)
                    };
                    assert!(engine.drop_piece(bad).is_err());
                    assert_eq!(engine.board(), &snapshot);
                    assert_eq!(engine.current_player(), expected);
                    continue;
                }

                let legal = engine.legal_columns();
                let col = legal[rng.random_range(0..legal.len())];
                let placement = engine.drop_piece(col).unwrap();
                assert_eq!(placement.player, expected);

                // No piece is ever overwritten
                for row in 0..height {
                    for c in 0..width {
                        let old = snapshot.get(row, c).unwrap();
                        let new = engine.cell(row, c).unwrap();
                        if (row, c) == (placement.row, placement.column) {
                            assert_eq!(old, Cell::Empty);
                            assert_eq!(new, Cell::Occupied(expected));
                        } else {
                            assert_eq!(old, new);
                        }
                    }
                }

                match placement.outcome {
                    MoveOutcome::Continue => {
                        expected = expected.other();
                        assert_eq!(engine.current_player(), expected);
                        assert_eq!(engine.status(), GameStatus::InProgress);
                    }
                    MoveOutcome::Won(p) => {
                        assert_eq!(p, expected);
                        assert_eq!(engine.status(), GameStatus::Won(p));
                        assert!(engine.board().has_four_in_a_row(p));
                    }
                    MoveOutcome::Tie => {
                        assert_eq!(engine.status(), GameStatus::Tie);
                        assert!(engine.board().is_full());
                    }
                }
            }

            let finished = engine.clone();
            assert_eq!(engine.drop_piece(0), Err(MoveError::GameAlreadyOver));
            assert_eq!(engine, finished);
        }
    }
}
