use crate::config::AppConfig;
use crate::game::{Cell, GameEngine, GameStatus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    engine: &GameEngine,
    config: &AppConfig,
    selected_column: usize,
    message: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                       // Header
            Constraint::Min(engine.height() as u16 + 4), // Board
            Constraint::Length(3),                       // Message
            Constraint::Length(3),                       // Controls
        ])
        .split(frame.area());

    render_header(frame, engine, config, chunks[0]);
    frame.render_widget(
        Paragraph::new(board_lines(engine, config, selected_column)).alignment(Alignment::Center),
        chunks[1],
    );
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, engine: &GameEngine, config: &AppConfig, area: Rect) {
    let (status, color) = match engine.status() {
        GameStatus::InProgress => {
            let player = config.player(engine.current_player());
            (format!("Current Player: {}", player.name), player.color())
        }
        GameStatus::Won(winner) => {
            let player = config.player(winner);
            (format!("Game Over  |  {} won", player.name), player.color())
        }
        GameStatus::Tie => ("Game Over  |  Tie".to_string(), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

/// Column labels, framed grid, and the selection marker underneath.
fn board_lines(engine: &GameEngine, config: &AppConfig, selected_column: usize) -> Vec<Line<'static>> {
    let width = engine.width();
    let winning = engine.winning_line();
    let mut lines = Vec::with_capacity(engine.height() + 4);

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..width {
        let label = format!(" {} ", (col + 1) % 10);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    let rule = "═".repeat(width * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..engine.height() {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..width {
            let span = match engine.cell(row, col).and_then(Cell::player) {
                Some(player) => {
                    let mut style = Style::default().fg(config.player(player).color());
                    if winning.is_some_and(|line| line.contains(&(row, col))) {
                        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    }
                    Span::styled(" ● ", style)
                }
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
            };
            row_spans.push(span);
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..width {
        if col == selected_column && !engine.is_terminal() {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    lines
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←/→: Move  |  Enter/1-9: Drop  |  R: New game  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
