//! Events emitted by the simulation for renderers and other observers

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEnded {
    /// Skater left the visible area (below the floor or off the left edge)
    FellOff,
    /// Skater rotated past the tip-over limit
    TippedOver,
}

/// Something the rendering side may want to mirror
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A brick entered the terrain; `gap` is the extra spacing inserted before it
    SegmentSpawned { id: u32, position: Vec2, gap: f32 },
    /// A brick left the terrain
    SegmentRemoved { id: u32 },
    /// Jump impulse applied
    Jumped,
    RunEnded(RunEnded),
    /// Session reset to its starting state
    Restarted,
}
