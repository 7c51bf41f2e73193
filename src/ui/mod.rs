//! Terminal presentation built on ratatui.

pub mod canvas;
pub mod common;
pub mod game_scene;

use crate::app::{App, Screen};
use crate::game::Viewport;
use canvas::CellSize;
use rand::Rng;
use ratatui::{layout::Rect, Frame};

/// Draw the current screen.
pub fn draw<R: Rng>(frame: &mut Frame, app: &App<R>, cell: CellSize) {
    let area = frame.size();
    match app.screen {
        Screen::Title => game_scene::render_title(frame, area, app),
        Screen::Game => game_scene::render_game(frame, area, app, cell),
    }
}

/// Play-field size for a terminal of the given area.
pub fn viewport_for(area: Rect, cell: CellSize) -> Viewport {
    let content = common::split_game_layout(area).content;
    Viewport::new(
        content.width as f64 * cell.width,
        content.height as f64 * cell.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DeviceProfile, Session};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    const CELL: CellSize = CellSize {
        width: 10.0,
        height: 20.0,
    };

    fn app_for(cols: u16, rows: u16) -> App<StdRng> {
        let viewport = viewport_for(Rect::new(0, 0, cols, rows), CELL);
        let session = Session::with_tuning(viewport, DeviceProfile::Standard.tuning());
        App::new(session, StdRng::seed_from_u64(3))
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_viewport_matches_play_area() {
        let viewport = viewport_for(Rect::new(0, 0, 100, 30), CELL);
        assert_eq!(viewport, Viewport::new(740.0, 520.0));
    }

    #[test]
    fn test_title_screen() {
        let app = app_for(100, 30);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &app, CELL)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("S K Y H O P"));
        assert!(text.contains("[Space/S]"));
    }

    #[test]
    fn test_game_screen_shows_score_and_player() {
        let mut app = app_for(100, 30);
        app.start();
        app.session.score = 7;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &app, CELL)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Score: 7"));
        assert!(text.contains('►'));
        assert!(text.contains(" Info "));
        assert!(text.contains("[Space/W/Up] Flap  [R] Restart  [Q] Quit"));
    }

    #[test]
    fn test_game_over_screen() {
        let mut app = app_for(100, 30);
        app.start();
        app.session.player.y = app.session.viewport.height;
        app.tick(16);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &app, CELL)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Game Over!"));
        assert!(text.contains("Crashed: hit the ground"));
        assert!(text.contains("[R/Enter] Restart"));
    }
}
