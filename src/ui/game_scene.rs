//! Title screen and in-game scene.

use super::canvas::{CellCanvas, CellSize};
use super::common::{
    create_game_layout, info_row, render_info_panel_frame, render_status_bar, GameLayout,
};
use crate::app::App;
use crate::game::{render_session, Phase, Session};
use rand::Rng;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE: &str = " Skyhop ";

/// Render the title screen shown before the first session.
pub fn render_title<R: Rng>(frame: &mut Frame, area: Rect, app: &App<R>) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            "S K Y H O P",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Flap through the gaps. Touching a pipe or the ground ends the run.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Space/S]", Style::default().fg(Color::White)),
            Span::styled(" Start  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Q]", Style::default().fg(Color::White)),
            Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Profile: {}", profile_label(&app.session)),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let height = lines.len() as u16;
    let y = inner.y + inner.height.saturating_sub(height) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(inner.x, y, inner.width, height.min(inner.height)),
    );
}

/// Render the running (or finished) session.
pub fn render_game<R: Rng>(frame: &mut Frame, area: Rect, app: &App<R>, cell: CellSize) {
    let session = &app.session;
    let border = match session.phase {
        Phase::Playing => Color::Cyan,
        Phase::GameOver => Color::Red,
    };
    let GameLayout {
        content,
        status_bar,
        info_panel,
    } = create_game_layout(frame, area, TITLE, border);

    render_play_area(frame, content, session, cell);
    render_status(frame, status_bar, session);
    render_info_panel(frame, info_panel, app);
}

fn render_play_area(frame: &mut Frame, area: Rect, session: &Session, cell: CellSize) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let mut canvas = CellCanvas::new(area.width, area.height, cell);
    render_session(session, &mut canvas);
    frame.render_widget(Paragraph::new(canvas.lines()), area);
}

fn render_status(frame: &mut Frame, area: Rect, session: &Session) {
    let (status, hints) = match session.crash {
        Some(cause) if session.phase == Phase::GameOver => (
            Line::styled(
                format!("Crashed: {}. Final score {}.", cause.describe(), session.score),
                Style::default().fg(Color::Red),
            ),
            "[R/Enter] Restart  [Q] Quit",
        ),
        _ => (
            Line::styled(
                format!("Score: {}", session.score),
                Style::default().fg(Color::Green),
            ),
            "[Space/W/Up] Flap  [R] Restart  [Q] Quit",
        ),
    };
    render_status_bar(frame, area, status, hints);
}

fn render_info_panel<R: Rng>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let session = &app.session;
    let tuning = &session.tuning;
    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", profile_label(session)),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        info_row("Score", session.score.to_string(), Color::White),
        info_row("Best", app.best_score.to_string(), Color::Yellow),
        info_row("Run", app.runs.to_string(), Color::White),
        info_row("Frame", session.frame.to_string(), Color::White),
        Line::from(""),
        info_row("Gravity", format!("{:.2}", tuning.gravity), Color::Green),
        info_row("Flap", format!("{:.1}", tuning.flap_impulse), Color::Green),
        info_row("Speed", format!("{:.1}", tuning.scroll_speed), Color::Green),
        info_row("Gap", format!("{:.0}", tuning.gap_height), Color::Green),
        info_row(
            "Field",
            format!(
                "{:.0}x{:.0}",
                session.viewport.width, session.viewport.height
            ),
            Color::DarkGray,
        ),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn profile_label(session: &Session) -> &'static str {
    session.profile.map(|p| p.name()).unwrap_or("Custom")
}
