//! Shared layout pieces: bordered game frame, status bar, info panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the info panel on the right.
pub const INFO_PANEL_WIDTH: u16 = 24;

/// Minimum play-area height before the status bar is squeezed out.
const PLAY_AREA_MIN_HEIGHT: u16 = 6;

/// Areas inside the outer game border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    /// Play field - top left
    pub content: Rect,
    /// Two lines under the play field
    pub status_bar: Rect,
    /// Right-hand column
    pub info_panel: Rect,
}

fn outer_block(title: &str, border_color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

/// Split `area` the way [`create_game_layout`] does, without drawing.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │   [content area]                │  [info]     │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn split_game_layout(area: Rect) -> GameLayout {
    let inner = outer_block("", Color::Reset).inner(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(INFO_PANEL_WIDTH)])
        .split(inner);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(PLAY_AREA_MIN_HEIGHT), Constraint::Length(2)])
        .split(columns[0]);

    GameLayout {
        content: left[0],
        status_bar: left[1],
        info_panel: columns[1],
    }
}

/// Clear `area`, draw the outer border, and return the inner layout.
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
) -> GameLayout {
    frame.render_widget(Clear, area);
    frame.render_widget(outer_block(title, border_color), area);
    split_game_layout(area)
}

/// Status message over a dimmed line of key hints.
pub fn render_status_bar(frame: &mut Frame, area: Rect, status: Line, hints: &str) {
    let lines = vec![status, Line::styled(hints, Style::default().fg(Color::DarkGray))];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Bordered " Info " panel; returns the inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A `label: value` row for the info panel.
pub fn info_row(label: &str, value: String, value_color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(value_color)),
    ])
}
