use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::game::{Cell, GameSession, GridGeometry};
use crate::metrics::RunStats;

const HEAD_SYMBOL: &str = "■";
const BODY_SYMBOL: &str = "□";
const FOOD_SYMBOL: &str = "●";
const EMPTY_SYMBOL: &str = "·";

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R>(&self, frame: &mut Frame, session: &GameSession<R>, stats: &RunStats) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(3), // Footer
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(session, stats), header);

        // Center the board in the game area
        let (width, height) = session.geometry().display_size();
        let [board_area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(body);
        let [board_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(board_area);
        frame.render_widget(Board { session }, board_area);

        if let Some(message) = session.message() {
            self.render_game_over(frame, board_area, message, stats);
        }

        frame.render_widget(self.render_controls(), footer);
    }

    fn render_stats<R>(&self, session: &GameSession<R>, stats: &RunStats) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                session.score().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(stats.round_clock(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(stats.games_played().to_string(), value),
            Span::raw("    "),
            Span::styled("Eaten: ", label),
            Span::styled(stats.food_eaten().to_string(), value),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_game_over(&self, frame: &mut Frame, board: Rect, message: &str, stats: &RunStats) {
        let mut lines: Vec<Line> = message
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(Color::White))))
            .collect();
        if let Some(score) = stats.last_score() {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        let width = lines.iter().map(Line::width).max().unwrap_or(0) as u16 + 4;
        let height = lines.len() as u16 + 2;
        let [popup] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(board);
        let [popup] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(popup);

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Game Over "),
            ),
            popup,
        );
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// The grid, food and snake, laid out by the session's geometry
struct Board<'a, R> {
    session: &'a GameSession<R>,
}

impl<R> Widget for Board<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = self.session.geometry();

        if geometry.margin > 0 {
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake ")
                .render(area, buf);
        }

        let empty = Style::default().fg(Color::DarkGray);
        for cell in geometry.cells() {
            draw_cell(buf, area, geometry, cell, EMPTY_SYMBOL, empty);
        }

        draw_cell(
            buf,
            area,
            geometry,
            self.session.food().position(),
            FOOD_SYMBOL,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        );

        let snake = self.session.snake();
        let body = Style::default().fg(Color::Green);
        for cell in snake.body().skip(1) {
            draw_cell(buf, area, geometry, cell, BODY_SYMBOL, body);
        }
        // Head last so it stays visible when it overlaps the body
        draw_cell(
            buf,
            area,
            geometry,
            snake.head(),
            HEAD_SYMBOL,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    }
}

fn draw_cell(
    buf: &mut Buffer,
    area: Rect,
    geometry: &GridGeometry,
    cell: Cell,
    symbol: &str,
    style: Style,
) {
    let Some((dx, dy)) = geometry.to_display(cell) else {
        return;
    };
    let x = area.x.saturating_add(dx);
    let y = area.y.saturating_add(dy);
    if x < area.right() && y < area.bottom() {
        buf.set_string(x, y, symbol, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    fn symbol_at(buf: &Buffer, area: Rect, geometry: &GridGeometry, cell: Cell) -> String {
        let (dx, dy) = geometry.to_display(cell).unwrap();
        buf[(area.x + dx, area.y + dy)].symbol().to_string()
    }

    #[test]
    fn test_board_draws_snake_and_food() {
        let session = GameSession::seeded(&GameConfig::default(), 5).unwrap();
        let geometry = *session.geometry();
        let (width, height) = geometry.display_size();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);

        Board { session: &session }.render(area, &mut buf);

        assert_eq!(symbol_at(&buf, area, &geometry, Cell::new(6, 9)), HEAD_SYMBOL);
        assert_eq!(symbol_at(&buf, area, &geometry, Cell::new(5, 9)), BODY_SYMBOL);
        assert_eq!(symbol_at(&buf, area, &geometry, Cell::new(4, 9)), BODY_SYMBOL);
        assert_eq!(
            symbol_at(&buf, area, &geometry, session.food().position()),
            FOOD_SYMBOL
        );
    }

    #[test]
    fn test_full_frame_renders() {
        let session = GameSession::seeded(&GameConfig::default(), 5).unwrap();
        let stats = RunStats::new(Instant::now());
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &session, &stats))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Score: 0"));
        assert!(content.contains("Games: 0"));
        assert!(content.contains(HEAD_SYMBOL));
        assert!(!content.contains("Game Over!"));
    }

    #[test]
    fn test_game_over_popup() {
        let config = GameConfig {
            initial_body: vec![Cell::new(24, 5), Cell::new(23, 5), Cell::new(22, 5)],
            ..Default::default()
        };
        let mut session = GameSession::seeded(&config, 5).unwrap();
        let outcome = session.update().unwrap();
        assert!(!session.is_running());

        let now = Instant::now();
        let mut stats = RunStats::new(now);
        stats.record(&outcome, now);
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &session, &stats))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Game Over!"));
        assert!(content.contains("Final Score: 0"));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let session = GameSession::seeded(&GameConfig::default(), 5).unwrap();
        let stats = RunStats::new(Instant::now());
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &session, &stats))
            .unwrap();
    }
}
