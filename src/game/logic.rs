//! Per-frame simulation for a Skyhop session.

use super::types::{
    CrashCause, DeviceProfile, Obstacle, Phase, Player, Tuning, TuningSource, Viewport,
};
use crate::constants::{FRAME_MS, MAX_FRAME_DELTA_MS};
use rand::Rng;
use std::collections::VecDeque;

/// A single thing that happened during a simulation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepEvent {
    /// A queued flap was applied.
    Flapped,
    /// A new obstacle entered at the right edge.
    Spawned { gap_top: f64, gap_bottom: f64 },
    /// The oldest obstacle left the view.
    Expired,
    /// The player passed an obstacle; carries the new score.
    Scored { score: u32 },
    /// The session ended.
    Crashed { cause: CrashCause },
}

/// Events produced by one or more frames, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub frames: u32,
    pub events: Vec<StepEvent>,
}

impl StepReport {
    pub fn crash(&self) -> Option<CrashCause> {
        self.events.iter().find_map(|event| match event {
            StepEvent::Crashed { cause } => Some(*cause),
            _ => None,
        })
    }

    pub fn points(&self) -> u32 {
        self.events
            .iter()
            .filter(|event| matches!(event, StepEvent::Scored { .. }))
            .count() as u32
    }

    fn merge(&mut self, other: StepReport) {
        self.frames += other.frames;
        self.events.extend(other.events);
    }
}

/// One play-through, from start or restart until the next crash.
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    pub crash: Option<CrashCause>,
    pub viewport: Viewport,

    pub player: Player,
    /// Active obstacles, oldest (leftmost) first.
    pub obstacles: VecDeque<Obstacle>,

    /// Frames simulated since the session started.
    pub frame: u64,
    pub score: u32,

    /// Flap input waiting to be consumed by the next frame.
    pub flap_requested: bool,
    /// Wall-clock time not yet turned into whole frames.
    pub accumulated_ms: u64,
    pub frame_ms: u64,

    // Fixed for the session; re-resolved on restart.
    pub profile: Option<DeviceProfile>,
    pub tuning: Tuning,
    pub source: TuningSource,
}

impl Session {
    /// Start a new session in the `Playing` state.
    pub fn new(viewport: Viewport, source: TuningSource) -> Self {
        let (profile, tuning) = source.resolve(viewport);
        Self {
            phase: Phase::Playing,
            crash: None,
            viewport,
            player: Player::centered(viewport, &tuning),
            obstacles: VecDeque::new(),
            frame: 0,
            score: 0,
            flap_requested: false,
            accumulated_ms: 0,
            frame_ms: FRAME_MS,
            profile,
            tuning,
            source,
        }
    }

    /// Start a session with exactly the given tunables.
    pub fn with_tuning(viewport: Viewport, tuning: Tuning) -> Self {
        Self::new(viewport, TuningSource::Fixed(tuning))
    }

    pub fn with_frame_ms(mut self, frame_ms: u64) -> Self {
        self.frame_ms = frame_ms.max(1);
        self
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Queue a flap for the next frame. Repeated requests before that frame
    /// collapse into one.
    pub fn request_flap(&mut self) {
        if self.phase == Phase::Playing {
            self.flap_requested = true;
        }
    }

    /// Reset every piece of mutable state and re-enter `Playing`. Tunables
    /// are resolved again for the current viewport.
    pub fn restart(&mut self) {
        let (profile, tuning) = self.source.resolve(self.viewport);
        self.profile = profile;
        self.tuning = tuning;
        self.phase = Phase::Playing;
        self.crash = None;
        self.player = Player::centered(self.viewport, &tuning);
        self.obstacles.clear();
        self.frame = 0;
        self.score = 0;
        self.flap_requested = false;
        self.accumulated_ms = 0;
    }

    /// Track a new play-field size. Tunables stay as they are until restart.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Feed elapsed wall-clock time and run as many whole frames as it covers.
    pub fn advance<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> StepReport {
        let mut report = StepReport::default();
        if self.is_over() {
            return report;
        }

        self.accumulated_ms += dt_ms.min(MAX_FRAME_DELTA_MS);

        while self.accumulated_ms >= self.frame_ms {
            self.accumulated_ms -= self.frame_ms;
            report.merge(self.step(rng));

            if self.is_over() {
                self.accumulated_ms = 0;
                break;
            }
        }

        report
    }

    /// Simulate exactly one frame. Does nothing once the session is over.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> StepReport {
        let mut report = StepReport::default();
        if self.is_over() {
            return report;
        }
        report.frames = 1;

        // 1. Consume the buffered flap
        if std::mem::take(&mut self.flap_requested) {
            self.player.velocity = self.tuning.flap_impulse;
            report.events.push(StepEvent::Flapped);
        }

        // 2. Gravity
        self.player.velocity += self.tuning.gravity;
        self.player.y += self.player.velocity;

        // 3. Floor
        let floor = self.viewport.height - self.player.height;
        if self.player.y >= floor {
            self.player.y = floor;
            self.end(CrashCause::Floor, &mut report);
            return report;
        }

        // 4. Spawn on the interval, counting from frame 0
        if self.frame % self.tuning.spawn_interval.max(1) == 0 {
            let obstacle = self.spawn_obstacle(rng);
            report.events.push(StepEvent::Spawned {
                gap_top: obstacle.gap_top,
                gap_bottom: obstacle.gap_bottom,
            });
        }
        self.frame += 1;

        // 5. Scroll, then retire everything past the left edge. Without a
        // resize every obstacle spawns at the same x, so this only ever takes
        // from the front; a shrink can spawn newer obstacles left of older ones.
        for obstacle in &mut self.obstacles {
            obstacle.x -= self.tuning.scroll_speed;
        }
        let before = self.obstacles.len();
        self.obstacles.retain(|obstacle| !obstacle.is_offscreen());
        for _ in self.obstacles.len()..before {
            report.events.push(StepEvent::Expired);
        }

        // 6. Collisions
        if self
            .obstacles
            .iter()
            .any(|obstacle| obstacle.collides_with(&self.player))
        {
            self.end(CrashCause::Obstacle, &mut report);
            return report;
        }

        // 7. Scoring
        for obstacle in &mut self.obstacles {
            if !obstacle.scored && obstacle.is_passed_by(&self.player) {
                obstacle.scored = true;
                self.score += 1;
                report.events.push(StepEvent::Scored { score: self.score });
            }
        }

        report
    }

    /// Append an obstacle at the right edge with a random, reachable gap.
    pub fn spawn_obstacle<R: Rng>(&mut self, rng: &mut R) -> Obstacle {
        let (gap_top, gap_bottom) = roll_gap(self.viewport, &self.tuning, rng);
        let obstacle = Obstacle {
            x: self.viewport.width,
            width: self.tuning.obstacle_width,
            gap_top,
            gap_bottom,
            scored: false,
        };
        self.obstacles.push_back(obstacle);
        obstacle
    }

    fn end(&mut self, cause: CrashCause, report: &mut StepReport) {
        self.phase = Phase::GameOver;
        self.crash = Some(cause);
        self.flap_requested = false;
        report.events.push(StepEvent::Crashed { cause });
    }
}

/// Pick a gap whose top sits `margin + k` pixels down, with `k` uniform over
/// whole pixels in `[0, height / 4)`. The range is narrowed so the gap's
/// bottom stays at least `margin` above the floor.
pub fn roll_gap<R: Rng>(viewport: Viewport, tuning: &Tuning, rng: &mut R) -> (f64, f64) {
    let margin = tuning.gap_margin;
    let spread = (viewport.height / 4.0).floor();
    let room = (viewport.height - margin - tuning.gap_height - margin + 1.0).floor();
    let slots = spread.min(room).max(0.0) as u32;

    let offset = if slots > 0 {
        rng.gen_range(0..slots) as f64
    } else {
        0.0
    };
    let gap_top = margin + offset;
    (gap_top, gap_top + tuning.gap_height)
}
