//! Icon Dodge - an arcade avoidance game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (clock, motion, collisions, session state)
//! - `scheduler`: Animation-frame loop driving one session
//! - `view`: One-way projection of simulation state onto element styles
//! - `settings`: Data-driven game tuning

pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod view;

pub use scheduler::{FrameOutcome, FrameScheduler, FrameToken, LoopPhase};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Container dimensions (square)
    pub const CONTAINER_SIZE: f32 = 600.0;

    /// Player icon defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Player start position, relative to the container (centered)
    pub const PLAYER_START: f32 = 275.0;
    /// Player may not move below this container-relative coordinate
    pub const PLAYER_MIN: f32 = 1.0;
    /// Container size minus icon size minus margin
    pub const PLAYER_MAX: f32 = 545.0;

    /// Enemy icon size
    pub const ENEMY_SIZE: f32 = 50.0;
    /// Number of enemies per session
    pub const ENEMY_COUNT: usize = 6;
    /// Enemies reflect when their next step reaches this far edge offset
    pub const ENEMY_FAR_EDGE: f32 = 575.0;
    /// Enemies reflect when their next step reaches this near edge offset
    pub const ENEMY_NEAR_EDGE: f32 = -25.0;

    /// Central dead-zone, relative to the container origin (inclusive)
    pub const DEAD_ZONE_MIN: f32 = 250.0;
    pub const DEAD_ZONE_MAX: f32 = 350.0;

    /// Frame progress (ms) is divided by this to get the player's movement delta
    pub const FRAME_DELTA_DIVISOR: f64 = 60.0;

    /// Explosion sprite shown on the player after a collision
    pub const EXPLOSION_SIZE: f32 = 150.0;
    pub const EXPLOSION_OFFSET: f32 = 50.0;
}

/// Axis-aligned rectangle in screen pixels (left/top origin)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(left, top),
            size: Vec2::new(width, height),
        }
    }

    /// The game container placed at `(left, top)`
    pub fn container_at(left: f32, top: f32) -> Self {
        Self::new(left, top, consts::CONTAINER_SIZE, consts::CONTAINER_SIZE)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Position relative to this rect's origin
    #[inline]
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        point - self.origin
    }
}

/// Check that `value` is within `[min, max]` on both axes
#[inline]
pub fn within(value: Vec2, min: f32, max: f32) -> bool {
    value.x >= min && value.x <= max && value.y >= min && value.y <= max
}
