use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Cell, Position, Snapshot};

const TITLE: &str = "🐍 Modern Snake Game 🐍";

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Game area
                Constraint::Length(2), // Scores
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_title(), chunks[0]);

        // Each cell is two characters wide, plus the border
        let width = (snapshot.grid_size as u16).saturating_mul(2).saturating_add(2);
        let height = (snapshot.grid_size as u16).saturating_add(2);
        let game_area = centered(chunks[1], width, height);
        frame.render_widget(self.render_grid(snapshot), game_area);

        frame.render_widget(self.render_scores(snapshot), chunks[2]);
        frame.render_widget(self.render_controls(snapshot), chunks[3]);

        // The modal sits on top of the final board, like a dialog
        if snapshot.game_over {
            let modal_area = centered(frame.area(), 30, 9);
            frame.render_widget(Clear, modal_area);
            frame.render_widget(self.render_game_over(snapshot), modal_area);
        }
    }

    fn render_title(&self) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let mut lines = Vec::with_capacity(snapshot.grid_size);

        for y in 0..snapshot.grid_size {
            let mut spans = Vec::with_capacity(snapshot.grid_size);

            for x in 0..snapshot.grid_size {
                let pos = Position::new(x as i32, y as i32);

                let cell = match snapshot.cell_at(pos) {
                    Cell::SnakeHead => Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Cell::SnakeBody => Span::styled("■ ", Style::default().fg(Color::Green)),
                    Cell::Food => Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Cell::Empty => Span::styled("· ", Style::default().fg(Color::DarkGray)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_scores(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(snapshot.score.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", label),
                Span::styled(snapshot.high_score.to_string(), value),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let text = vec![
            Line::from(vec![Span::styled(
                "Game Over!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!("Your Score: {}", snapshot.score)),
            Line::from(format!("High Score: {}", snapshot.high_score)),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " R ",
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Restart"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
        ];
        if snapshot.game_over {
            spans.push(Span::styled("R", Style::default().fg(Color::Green)));
            spans.push(Span::raw(" to restart | "));
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
