//! Skateboarder - An endless side-scrolling skateboarding game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (terrain, skater, session loop)
//! - `tuning`: Data-driven game balance
//! - `snapshot`: Serializable per-frame view for renderers

pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use snapshot::Snapshot;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Expected frame duration the scroll speed is tuned for (60 Hz)
    pub const EXPECTED_FRAME_TIME: f64 = 1.0 / 60.0;

    /// Scroll speed at the start of every run
    pub const STARTING_SCROLL_SPEED: f32 = 5.0;
    /// Added to the scroll speed every frame (uncapped)
    pub const SCROLL_SPEED_INCREMENT: f32 = 0.01;

    /// World gravity in meters/s²
    pub const GRAVITY: f32 = -6.0;
    /// Points per physics meter (gravity scale)
    pub const POINTS_PER_METER: f32 = 150.0;

    /// Upward impulse applied on jump
    pub const JUMP_IMPULSE: f32 = 260.0;
    /// Skater body mass used by the built-in integrator
    pub const SKATER_MASS: f32 = 0.4;
    /// Vertical speed above which the skater is considered airborne
    pub const GROUNDED_VELOCITY_THRESHOLD: f32 = 100.0;
    /// Rotation (degrees) past which the skater has tipped over
    pub const TIP_OVER_DEGREES: f32 = 85.0;
    /// Skater reset height above its half-height
    pub const SKATER_RESET_OFFSET_Y: f32 = 64.0;

    /// Gap roll is a uniform draw in [0, GAP_ROLL_RANGE)
    pub const GAP_ROLL_RANGE: u32 = 99;
    /// Rolls below this insert a gap (~5%)
    pub const GAP_ROLL_THRESHOLD: u32 = 5;
    /// Gap width = GAP_SCALE × current scroll speed
    pub const GAP_SCALE: f32 = 20.0;
    /// Spacing between adjacent bricks
    pub const SEGMENT_SPACING: f32 = 1.0;

    /// Fixed physics substep
    pub const PHYSICS_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per physics step to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Sizes supplied by the rendering side: viewport and sprite assets
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Visible area (origin at bottom-left)
    pub viewport: Vec2,
    /// Skater sprite size
    pub skater_size: Vec2,
    /// Sidewalk brick sprite size
    pub segment_size: Vec2,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(1334.0, 750.0),
            skater_size: Vec2::new(90.0, 126.0),
            segment_size: Vec2::new(120.0, 64.0),
        }
    }
}

impl Scene {
    /// Horizontal middle of the viewport
    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.viewport.x / 2.0
    }
}
