use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{CollisionType, FoodKind, Position, Snapshot};
use crate::metrics::SessionMetrics;

/// Entries of the game-over menu, in display order
pub const MENU_ITEMS: [&str; 2] = ["Restart", "Quit"];

/// Everything drawn next to the board that does not live in the session
pub struct Hud<'a> {
    pub leaderboard: &'a [u32],
    pub metrics: &'a SessionMetrics,
    /// Highlighted game-over menu entry
    pub menu_selection: usize,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board and side panel
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, hud), chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(28)])
            .split(chunks[1]);

        frame.render_widget(self.render_grid(snapshot), body[0]);
        frame.render_widget(self.render_side_panel(snapshot, hud), body[1]);

        if snapshot.is_over {
            let area = centered(body[0], 40, 11);
            frame.render_widget(Clear, area);
            frame.render_widget(self.render_game_over(snapshot, hud.menu_selection), area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..snapshot.board.height {
            let spans: Vec<Span> = (0..snapshot.board.width)
                .map(|x| cell_span(snapshot, Position::new(x, y)))
                .collect();
            lines.push(Line::from(spans));
        }

        let title = if snapshot.paused {
            " Snake (paused) "
        } else {
            " Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, hud: &Hud) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Points: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Difficulty: ", label),
            Span::styled(snapshot.level.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{:.1}", snapshot.speed), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(hud.metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_side_panel(&self, snapshot: &Snapshot, hud: &Hud) -> Paragraph<'_> {
        let heading = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from(Span::styled("Effects", heading))];

        let mut any_active = false;
        for kind in [FoodKind::SpeedUp, FoodKind::SlowDown, FoodKind::DoublePoints] {
            let remaining = snapshot.effects.remaining(kind);
            if remaining > 0.0 {
                any_active = true;
                lines.push(Line::from(vec![
                    Span::styled("■ ", Style::default().fg(food_color(kind))),
                    Span::raw(format!("{} {:.1}s", kind.label(), remaining)),
                ]));
            }
        }
        if !any_active {
            lines.push(Line::from(Span::styled(
                "none",
                Style::default().fg(Color::DarkGray),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Leader Board", heading)));
        for (rank, score) in hud.leaderboard.iter().enumerate() {
            lines.push(Line::from(format!("#{}: {}", rank + 1, score)));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Food", heading)));
        for kind in FoodKind::ALL {
            lines.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(food_color(kind))),
                Span::raw(kind.label()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "Games: {}  Best: {}",
            hud.metrics.games_played, hud.metrics.best_score
        )));

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot, selection: usize) -> Paragraph<'_> {
        let reason = match snapshot.collision {
            Some(CollisionType::Wall) => "Hit the wall",
            Some(CollisionType::SelfCollision) => "Bit your own tail",
            Some(CollisionType::Obstacle) => "Crashed into an obstacle",
            None => "",
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Your Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let style = if i == selection {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            text.push(Line::from(Span::styled(*item, style)));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P/Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_span(snapshot: &Snapshot, pos: Position) -> Span<'static> {
    if snapshot.snake.first() == Some(&pos) {
        // Snake head - distinct color
        Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else if snapshot.snake.contains(&pos) {
        Span::styled("□ ", Style::default().fg(Color::Green))
    } else if let Some(food) = snapshot.food.filter(|food| food.position == pos) {
        Span::styled(
            "● ",
            Style::default()
                .fg(food_color(food.kind))
                .add_modifier(Modifier::BOLD),
        )
    } else if snapshot.obstacles.contains(&pos) {
        Span::styled("█ ", Style::default().fg(Color::Gray))
    } else {
        Span::styled(". ", Style::default().fg(Color::DarkGray))
    }
}

fn food_color(kind: FoodKind) -> Color {
    match kind {
        FoodKind::Normal => Color::Red,
        FoodKind::SpeedUp => Color::LightBlue,
        FoodKind::SlowDown => Color::Magenta,
        FoodKind::DoublePoints => Color::Yellow,
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
