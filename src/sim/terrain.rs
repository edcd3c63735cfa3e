//! Procedural sidewalk terrain
//!
//! Bricks scroll left every frame. Bricks that leave the screen are dropped
//! and new ones are appended on the right until the viewport is covered,
//! occasionally leaving a speed-scaled gap the skater has to jump.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::category::PhysicsCategory;
use super::events::GameEvent;
use super::physics::{BodyDesc, BodyHandle, PhysicsWorld};
use crate::Tuning;
use crate::consts::SEGMENT_SPACING;

/// One sidewalk brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: u32,
    /// Center position
    pub position: Vec2,
    #[serde(skip)]
    pub body: Option<BodyHandle>,
}

/// Collaborators the terrain needs while updating
pub struct TerrainContext<'a, P: PhysicsWorld> {
    pub viewport_width: f32,
    /// Scroll speed at the time of the update (scales gaps)
    pub scroll_speed: f32,
    pub tuning: &'a Tuning,
    pub rng: &'a mut Pcg32,
    pub physics: &'a mut P,
    pub events: &'a mut Vec<GameEvent>,
}

/// The live brick sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    /// Active bricks, in spawn order
    pub segments: Vec<Segment>,
    /// Shared brick size, zero until the first brick spawns
    pub segment_size: Vec2,
    /// Size of the brick sprite new bricks are built from
    asset_size: Vec2,
    next_id: u32,
}

impl Terrain {
    pub fn new(asset_size: Vec2) -> Self {
        Self {
            segments: Vec::new(),
            segment_size: Vec2::ZERO,
            asset_size,
            next_id: 1,
        }
    }

    /// Right edge of a brick
    #[inline]
    pub fn right_edge(&self, segment: &Segment) -> f32 {
        segment.position.x + self.segment_size.x / 2.0
    }

    /// Largest brick center x, or 0 when nothing is further right
    pub fn farthest_right_x(&self) -> f32 {
        self.segments
            .iter()
            .map(|s| s.position.x)
            .fold(0.0, f32::max)
    }

    /// Scroll every brick left by `scroll_delta`, drop off-screen bricks, and
    /// spawn new ones until the viewport width is covered.
    pub fn update<P: PhysicsWorld>(&mut self, scroll_delta: f32, ctx: &mut TerrainContext<'_, P>) {
        let half_width = self.segment_size.x / 2.0;

        self.segments.retain_mut(|segment| {
            let new_x = segment.position.x - scroll_delta;
            if new_x + half_width < 0.0 {
                if let Some(body) = segment.body {
                    ctx.physics.remove_body(body);
                }
                log::debug!("Brick {} scrolled off at x={:.1}", segment.id, new_x);
                ctx.events.push(GameEvent::SegmentRemoved { id: segment.id });
                false
            } else {
                segment.position.x = new_x;
                if let Some(body) = segment.body {
                    ctx.physics.set_position(body, segment.position);
                }
                true
            }
        });

        let mut farthest_right_x = self.farthest_right_x();

        while farthest_right_x < ctx.viewport_width {
            let mut x = farthest_right_x + self.segment_size.x + SEGMENT_SPACING;
            let y = self.asset_size.y / 2.0;

            let roll = ctx.rng.random_range(0..ctx.tuning.gap_roll_range);
            let gap = if roll < ctx.tuning.gap_roll_threshold {
                let gap = ctx.tuning.gap_scale * ctx.scroll_speed;
                log::debug!("Gap of {:.1} before brick at x={:.1}", gap, x);
                gap
            } else {
                0.0
            };
            x += gap;

            farthest_right_x = self.spawn(Vec2::new(x, y), gap, ctx);
        }
    }

    /// Add a brick at `position`, returning its x
    fn spawn<P: PhysicsWorld>(
        &mut self,
        position: Vec2,
        gap: f32,
        ctx: &mut TerrainContext<'_, P>,
    ) -> f32 {
        self.segment_size = self.asset_size;

        let id = self.next_id;
        self.next_id += 1;

        let body = ctx.physics.add_body(BodyDesc::fixed(
            PhysicsCategory::Brick,
            position,
            self.segment_size,
        ));

        self.segments.push(Segment {
            id,
            position,
            body: Some(body),
        });
        ctx.events.push(GameEvent::SegmentSpawned { id, position, gap });

        position.x
    }

    /// Remove every brick (and its body)
    pub fn clear<P: PhysicsWorld>(&mut self, physics: &mut P, events: &mut Vec<GameEvent>) {
        for segment in self.segments.drain(..) {
            if let Some(body) = segment.body {
                physics.remove_body(body);
            }
            events.push(GameEvent::SegmentRemoved { id: segment.id });
        }
    }
}
