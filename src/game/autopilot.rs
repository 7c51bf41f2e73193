//! A simple bot that plays a session, used by the headless simulator.

use super::logic::Session;

/// Vertical slack below the target line before the bot flaps.
const SLACK: f64 = 10.0;

/// Line the bot tries to keep the player's centre on: the middle of the next
/// gap still ahead of the player, or the middle of the view when none is.
pub fn target_line(session: &Session) -> f64 {
    session
        .obstacles
        .iter()
        .find(|obstacle| !obstacle.is_passed_by(&session.player))
        .map(|obstacle| (obstacle.gap_top + obstacle.gap_bottom) / 2.0)
        .unwrap_or(session.viewport.height / 2.0)
}

/// Flap while falling and below the target line.
pub fn wants_flap(session: &Session) -> bool {
    let player = &session.player;
    let centre = player.y + player.height / 2.0;
    player.velocity > 0.0 && centre > target_line(session) + SLACK
}
