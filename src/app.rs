//! Application lifecycle: title screen, start/restart, and the running session.

use crate::game::{Phase, Session, StepEvent, StepReport, Viewport};
use crate::input::GameInput;
use log::{debug, info};
use rand::Rng;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Before the first start.
    Title,
    Game,
}

/// Owns the session and the random source that feeds it.
pub struct App<R: Rng> {
    pub screen: Screen,
    pub session: Session,
    /// Best score across sessions in this process.
    pub best_score: u32,
    /// Sessions started so far.
    pub runs: u32,
    pub should_quit: bool,
    rng: R,
}

impl<R: Rng> App<R> {
    pub fn new(session: Session, rng: R) -> Self {
        Self {
            screen: Screen::Title,
            session,
            best_score: 0,
            runs: 0,
            should_quit: false,
            rng,
        }
    }

    /// React to one input. Resize is handled by the host, which knows how
    /// terminal cells map to the play field.
    pub fn handle_input(&mut self, input: GameInput) {
        match (self.screen, input) {
            (_, GameInput::Quit) => {
                info!("quit requested");
                self.should_quit = true;
            }
            (Screen::Title, GameInput::Flap | GameInput::Start | GameInput::Restart) => {
                self.start();
            }
            (Screen::Game, GameInput::Flap) => self.session.request_flap(),
            (Screen::Game, GameInput::Start | GameInput::Restart) => {
                // Start is a no-op mid-run; restart always begins afresh.
                if input == GameInput::Restart || self.session.is_over() {
                    self.start();
                }
            }
            (_, GameInput::Resize { .. }) => {}
        }
    }

    /// Enter the game screen with a freshly reset session.
    pub fn start(&mut self) {
        self.session.restart();
        self.screen = Screen::Game;
        self.runs += 1;
        info!(
            "session {} started: viewport {:.0}x{:.0}, profile {}",
            self.runs,
            self.session.viewport.width,
            self.session.viewport.height,
            self.session.profile.map(|p| p.name()).unwrap_or("fixed"),
        );
    }

    pub fn resize(&mut self, viewport: Viewport) {
        debug!(
            "viewport resized to {:.0}x{:.0}",
            viewport.width, viewport.height
        );
        self.session.resize(viewport);
    }

    /// Advance the session by elapsed wall-clock time.
    pub fn tick(&mut self, dt_ms: u64) -> StepReport {
        if self.screen != Screen::Game || self.session.phase != Phase::Playing {
            return StepReport::default();
        }

        let report = self.session.advance(dt_ms, &mut self.rng);
        for event in &report.events {
            match event {
                StepEvent::Crashed { cause } => {
                    self.best_score = self.best_score.max(self.session.score);
                    info!(
                        "session {} over: {} after {} frames, score {} (best {})",
                        self.runs,
                        cause.describe(),
                        self.session.frame,
                        self.session.score,
                        self.best_score
                    );
                }
                StepEvent::Scored { score } => debug!("scored, now {}", score),
                StepEvent::Spawned {
                    gap_top,
                    gap_bottom,
                } => debug!("obstacle spawned, gap {:.0}..{:.0}", gap_top, gap_bottom),
                StepEvent::Flapped | StepEvent::Expired => {}
            }
        }
        report
    }
}
