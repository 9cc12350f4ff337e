//! Line-oriented front end: one column number per input line, board printed
//! as text. Works over any reader/writer pair, so it can be scripted.

use std::io::{self, BufRead, Write};

use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameEngine, GameStatus, MoveOutcome, Player};

fn symbol(player: Player) -> char {
    match player {
        Player::One => 'X',
        Player::Two => 'O',
    }
}

/// Play until the game ends, the input runs out, or the user types `q`.
/// Returns the status of the game being played at that point.
pub fn run<R: BufRead, W: Write>(
    config: &AppConfig,
    mut engine: GameEngine,
    input: R,
    out: &mut W,
) -> io::Result<GameStatus> {
    let mut lines = input.lines();

    write!(out, "{}", engine.board())?;
    loop {
        let player = engine.current_player();
        write!(
            out,
            "{} ({}), choose a column [1-{}]: ",
            config.player(player).name,
            symbol(player),
            engine.width()
        )?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(engine.status());
        };
        let line = line?;

        match line.trim() {
            "q" => return Ok(engine.status()),
            "r" => {
                engine = config
                    .new_game()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                writeln!(out, "New game started!")?;
                write!(out, "{}", engine.board())?;
                continue;
            }
            _ => {}
        }

        let Some(column) = line
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
        else {
            writeln!(out, "Please enter a number between 1 and {}.", engine.width())?;
            continue;
        };

        match engine.drop_piece(column) {
            Ok(placement) => {
                write!(out, "{}", engine.board())?;
                match placement.outcome {
                    MoveOutcome::Continue => {}
                    MoveOutcome::Won(winner) => {
                        writeln!(out, "{} won!", config.player(winner).name)?;
                        return Ok(engine.status());
                    }
                    MoveOutcome::Tie => {
                        writeln!(out, "Tie!")?;
                        return Ok(engine.status());
                    }
                }
            }
            Err(MoveError::InvalidColumn { width, .. }) => {
                writeln!(out, "Please enter a number between 1 and {width}.")?;
            }
            Err(MoveError::ColumnFull { column }) => {
                writeln!(out, "Column {} is full.", column + 1)?;
            }
            Err(MoveError::GameAlreadyOver) => {
                writeln!(out, "The game is already over.")?;
                return Ok(engine.status());
            }
        }
    }
}
