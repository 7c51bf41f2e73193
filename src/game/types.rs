//! Skyhop data structures: the player, obstacles, and session tunables.

use crate::constants::COMPACT_WIDTH_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of the play field in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Tunables that stay fixed for the lifetime of one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Velocity change per frame (positive = downward).
    pub gravity: f64,
    /// Velocity set by a flap (negative = upward). Replaces, not adds.
    pub flap_impulse: f64,
    /// Horizontal obstacle movement per frame.
    pub scroll_speed: f64,
    /// Frames between obstacle spawns.
    pub spawn_interval: u64,
    pub obstacle_width: f64,
    /// Height of the passable corridor.
    pub gap_height: f64,
    /// Minimum distance between the top edge and the gap, and between the gap and the floor.
    pub gap_margin: f64,
    pub player_x: f64,
    pub player_width: f64,
    pub player_height: f64,
}

/// Environment class the tunables are picked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceProfile {
    /// Wide play field.
    Standard,
    /// Narrow play field: heavier gravity, weaker flap, slower scroll.
    Compact,
}

impl DeviceProfile {
    /// Pick the profile for a play field of the given width.
    pub fn for_width(width: f64) -> Self {
        if width < COMPACT_WIDTH_THRESHOLD {
            Self::Compact
        } else {
            Self::Standard
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Compact => "Compact",
        }
    }

    pub fn tuning(&self) -> Tuning {
        let (gravity, flap_impulse, scroll_speed) = match self {
            Self::Standard => (0.6, -10.0, 2.0),
            Self::Compact => (0.8, -9.0, 1.2),
        };
        Tuning {
            gravity,
            flap_impulse,
            scroll_speed,
            spawn_interval: 150,
            obstacle_width: 90.0,
            gap_height: 200.0,
            gap_margin: 50.0,
            player_x: 50.0,
            player_width: 50.0,
            player_height: 50.0,
        }
    }
}

/// Profile requested by the user; `Auto` defers to the viewport width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSelection {
    #[default]
    Auto,
    Standard,
    Compact,
}

impl ProfileSelection {
    pub fn resolve(&self, viewport: Viewport) -> DeviceProfile {
        match self {
            Self::Auto => DeviceProfile::for_width(viewport.width),
            Self::Standard => DeviceProfile::Standard,
            Self::Compact => DeviceProfile::Compact,
        }
    }
}

impl FromStr for ProfileSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "standard" => Ok(Self::Standard),
            "compact" => Ok(Self::Compact),
            other => Err(format!(
                "unknown profile '{}' (expected auto, standard or compact)",
                other
            )),
        }
    }
}

impl fmt::Display for ProfileSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Auto => "auto",
            Self::Standard => "standard",
            Self::Compact => "compact",
        };
        f.write_str(s)
    }
}

/// Per-field replacements layered on top of a profile's tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuningOverrides {
    pub gravity: Option<f64>,
    pub flap_impulse: Option<f64>,
    pub scroll_speed: Option<f64>,
    pub spawn_interval: Option<u64>,
    pub obstacle_width: Option<f64>,
    pub gap_height: Option<f64>,
}

impl TuningOverrides {
    pub fn apply(&self, base: Tuning) -> Tuning {
        Tuning {
            gravity: self.gravity.unwrap_or(base.gravity),
            flap_impulse: self.flap_impulse.unwrap_or(base.flap_impulse),
            scroll_speed: self.scroll_speed.unwrap_or(base.scroll_speed),
            spawn_interval: self.spawn_interval.unwrap_or(base.spawn_interval),
            obstacle_width: self.obstacle_width.unwrap_or(base.obstacle_width),
            gap_height: self.gap_height.unwrap_or(base.gap_height),
            ..base
        }
    }
}

/// Where a session gets its tunables from on start and on every restart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TuningSource {
    /// Use exactly these values regardless of viewport.
    Fixed(Tuning),
    /// Resolve a profile from the viewport, then apply overrides.
    Profile {
        selection: ProfileSelection,
        overrides: TuningOverrides,
    },
}

impl TuningSource {
    pub fn resolve(&self, viewport: Viewport) -> (Option<DeviceProfile>, Tuning) {
        match self {
            Self::Fixed(tuning) => (None, *tuning),
            Self::Profile {
                selection,
                overrides,
            } => {
                let profile = selection.resolve(viewport);
                (Some(profile), overrides.apply(profile.tuning()))
            }
        }
    }
}

/// The player-controlled sprite. Only `y` and `velocity` change during play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity in virtual pixels per frame (positive = downward).
    pub velocity: f64,
}

impl Player {
    /// A motionless player centred vertically in the viewport.
    pub fn centered(viewport: Viewport, tuning: &Tuning) -> Self {
        Self {
            x: tuning.player_x,
            y: viewport.height / 2.0,
            width: tuning.player_width,
            height: tuning.player_height,
            velocity: 0.0,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn pose(&self) -> PlayerPose {
        if self.velocity < -0.5 {
            PlayerPose::Rising
        } else if self.velocity > 4.0 {
            PlayerPose::Diving
        } else {
            PlayerPose::Gliding
        }
    }
}

/// Coarse motion state used to pick the player's sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPose {
    Rising,
    Gliding,
    Diving,
}

/// A gated obstacle: solid above `gap_top` and below `gap_bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Left edge (float for smooth scrolling).
    pub x: f64,
    pub width: f64,
    pub gap_top: f64,
    pub gap_bottom: f64,
    /// Whether the player has passed this obstacle (for scoring).
    pub scored: bool,
}

impl Obstacle {
    pub fn trailing_edge(&self) -> f64 {
        self.x + self.width
    }

    /// True once the obstacle has scrolled entirely past the left edge.
    pub fn is_offscreen(&self) -> bool {
        self.trailing_edge() < 0.0
    }

    /// True once the obstacle is entirely behind the player's left edge.
    pub fn is_passed_by(&self, player: &Player) -> bool {
        self.trailing_edge() < player.x
    }

    pub fn collides_with(&self, player: &Player) -> bool {
        let overlaps_horizontally =
            player.x + player.width > self.x && player.x < self.x + self.width;
        let outside_gap = player.y < self.gap_top || player.y + player.height > self.gap_bottom;
        overlaps_horizontally && outside_gap
    }

    /// Solid region above the gap.
    pub fn upper_bounds(&self) -> Bounds {
        Bounds::new(self.x, 0.0, self.width, self.gap_top)
    }

    /// Solid region below the gap, down to the floor.
    pub fn lower_bounds(&self, viewport: Viewport) -> Bounds {
        Bounds::new(
            self.x,
            self.gap_bottom,
            self.width,
            (viewport.height - self.gap_bottom).max(0.0),
        )
    }
}

/// Session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// What ended a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Floor,
    Obstacle,
}

impl CrashCause {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Floor => "hit the ground",
            Self::Obstacle => "hit an obstacle",
        }
    }
}
