//! Serializable per-frame view of a session
//!
//! Copies what a renderer needs so it never holds on to the session itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{PhysicsWorld, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkaterView {
    pub pos: Vec2,
    pub rotation: f32,
    pub grounded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentView {
    pub id: u32,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub runs_ended: u32,
    pub scroll_speed: f32,
    pub skater: SkaterView,
    pub segment_size: Vec2,
    pub segments: Vec<SegmentView>,
}

impl Snapshot {
    pub fn capture<P: PhysicsWorld>(session: &Session<P>) -> Self {
        Self {
            frame: session.frame,
            runs_ended: session.runs_ended,
            scroll_speed: session.scroll_speed,
            skater: SkaterView {
                pos: session.skater.pos,
                rotation: session.skater.rotation,
                grounded: session.skater.grounded,
            },
            segment_size: session.terrain.segment_size,
            segments: session
                .terrain
                .segments
                .iter()
                .map(|s| SegmentView {
                    id: s.id,
                    pos: s.position,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
