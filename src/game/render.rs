//! Drawing a session onto any display surface.
//!
//! The simulation never reads back from the surface except for its size; a
//! host supplies a [`Surface`] and calls [`render_session`] once per frame.

use super::logic::Session;
use super::types::{Bounds, PlayerPose, Viewport};
use crate::constants::{SCORE_TEXT_X, SCORE_TEXT_Y, SUMMARY_LINE_SPACING};

/// Drawable resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Player(PlayerPose),
    /// Solid region above a gap.
    ObstacleTop,
    /// Solid region below a gap.
    ObstacleBottom,
}

/// Text roles; the surface chooses how each looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Running score in the corner.
    Hud,
    /// Large centred game-over text.
    Banner,
}

/// Display boundary used by the renderer.
pub trait Surface {
    /// Drawable area in virtual pixels.
    fn size(&self) -> Viewport;
    fn clear(&mut self);
    fn draw_sprite(&mut self, sprite: Sprite, bounds: Bounds);
    /// Draw `text` with its left edge at `x` on the line containing `y`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle);
}

/// Draw background, player, obstacles and the score. A finished session also
/// gets the game-over summary.
pub fn render_session<S: Surface + ?Sized>(session: &Session, surface: &mut S) {
    let Viewport { width, height } = surface.size();

    surface.clear();
    surface.draw_sprite(Sprite::Background, Bounds::new(0.0, 0.0, width, height));
    surface.draw_sprite(
        Sprite::Player(session.player.pose()),
        session.player.bounds(),
    );

    for obstacle in &session.obstacles {
        surface.draw_sprite(Sprite::ObstacleTop, obstacle.upper_bounds());
        surface.draw_sprite(
            Sprite::ObstacleBottom,
            obstacle.lower_bounds(Viewport::new(width, height)),
        );
    }

    if session.is_over() {
        surface.draw_text("Game Over!", width / 4.0, height / 2.0, TextStyle::Banner);
        surface.draw_text(
            &format!("Score: {}", session.score),
            width / 3.0,
            height / 2.0 + SUMMARY_LINE_SPACING,
            TextStyle::Banner,
        );
    } else {
        surface.draw_text(
            &format!("Score: {}", session.score),
            SCORE_TEXT_X,
            SCORE_TEXT_Y,
            TextStyle::Hud,
        );
    }
}
