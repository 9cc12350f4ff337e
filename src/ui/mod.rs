//! Front ends that drive a [`GameEngine`](crate::game::GameEngine): a
//! ratatui terminal app and a plain line-based mode.

mod app;
mod game_view;
pub mod plain;

pub use app::App;
