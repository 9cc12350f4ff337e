use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameEngine, MoveOutcome};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    config: AppConfig,
    engine: GameEngine,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    /// Build the app around a fresh game. `config` must already be validated.
    pub fn new(config: AppConfig, engine: GameEngine) -> Self {
        let selected_column = engine.width() / 2;
        App {
            config,
            engine,
            selected_column,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.engine.width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < self.engine.width() {
                    self.selected_column = column;
                }
                self.drop_piece(column);
            }
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    /// Replace the finished (or abandoned) game with a brand-new engine
    fn restart(&mut self) {
        match self.config.new_game() {
            Ok(engine) => {
                self.selected_column = engine.width() / 2;
                self.engine = engine;
                self.message = Some("New game started!".to_string());
            }
            Err(e) => {
                self.message = Some(format!("Cannot start a new game: {e}"));
            }
        }
    }

    /// Drop the current player's piece in `column`
    fn drop_piece(&mut self, column: usize) {
        match self.engine.drop_piece(column) {
            Ok(placement) => {
                self.message = match placement.outcome {
                    MoveOutcome::Won(player) => {
                        Some(format!("{} won!", self.config.player(player).name))
                    }
                    MoveOutcome::Tie => Some("Tie!".to_string()),
                    MoveOutcome::Continue => None,
                };
            }
            Err(MoveError::ColumnFull { .. }) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn { .. }) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameAlreadyOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.engine,
            &self.config,
            self.selected_column,
            self.message.as_deref(),
        );
    }
}
