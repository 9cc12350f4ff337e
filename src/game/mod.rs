//! Core Connect Four rules: board representation, player identifiers, and
//! the game engine state machine.

mod board;
mod engine;
mod player;

pub use board::{Board, Cell, DEFAULT_HEIGHT, DEFAULT_WIDTH, LINE_LENGTH};
pub use engine::{GameEngine, GameStatus, MoveOutcome, Placement};
pub use player::Player;
