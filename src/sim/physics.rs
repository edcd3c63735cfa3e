//! Physics world seam and a minimal built-in integrator
//!
//! The simulation only talks to physics through [`PhysicsWorld`]. Any 2D
//! engine can sit behind it; [`SimplePhysics`] is an axis-aligned box
//! integrator good enough for a skater riding flat bricks.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::PhysicsCategory;
use crate::consts::{MAX_SUBSTEPS, PHYSICS_DT, POINTS_PER_METER};

/// Opaque reference to a body registered with a physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Whether the world integrates a body or only uses it as an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Static,
    Dynamic,
}

/// Everything needed to register a body
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub category: PhysicsCategory,
    pub kind: BodyKind,
    /// Center position
    pub position: Vec2,
    /// Box extents
    pub size: Vec2,
    pub mass: f32,
    pub affected_by_gravity: bool,
    pub allows_rotation: bool,
}

impl BodyDesc {
    /// A gravity-affected body that does not rotate
    pub fn dynamic(category: PhysicsCategory, position: Vec2, size: Vec2, mass: f32) -> Self {
        Self {
            category,
            kind: BodyKind::Dynamic,
            position,
            size,
            mass,
            affected_by_gravity: true,
            allows_rotation: false,
        }
    }

    /// An immovable body ignoring gravity
    pub fn fixed(category: PhysicsCategory, position: Vec2, size: Vec2) -> Self {
        Self {
            category,
            kind: BodyKind::Static,
            position,
            size,
            mass: 0.0,
            affected_by_gravity: false,
            allows_rotation: false,
        }
    }
}

/// Two bodies began touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyHandle,
    pub a_category: PhysicsCategory,
    pub b: BodyHandle,
    pub b_category: PhysicsCategory,
}

impl Contact {
    /// True if the pair is {first, second} in either order
    pub fn is_between(&self, first: PhysicsCategory, second: PhysicsCategory) -> bool {
        (self.a_category == first && self.b_category == second)
            || (self.a_category == second && self.b_category == first)
    }

    /// The handle on the `category` side of the pair, if present
    pub fn handle_of(&self, category: PhysicsCategory) -> Option<BodyHandle> {
        if self.a_category == category {
            Some(self.a)
        } else if self.b_category == category {
            Some(self.b)
        } else {
            None
        }
    }
}

/// Rigid-body collaborator driving position, rotation and contacts.
///
/// Reads and writes on unknown handles are tolerated: reads return `None`,
/// writes do nothing.
pub trait PhysicsWorld {
    /// Set gravity in meters/s²
    fn set_gravity(&mut self, gravity: Vec2);
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle;
    fn remove_body(&mut self, handle: BodyHandle);
    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2);
    fn velocity(&self, handle: BodyHandle) -> Option<Vec2>;
    /// Radians/s, counter-clockwise
    fn angular_velocity(&self, handle: BodyHandle) -> Option<f32>;
    /// Center position and rotation (radians)
    fn transform(&self, handle: BodyHandle) -> Option<(Vec2, f32)>;
    fn set_position(&mut self, handle: BodyHandle, position: Vec2);
    fn set_transform(&mut self, handle: BodyHandle, position: Vec2, rotation: f32);
    fn set_velocity(&mut self, handle: BodyHandle, linear: Vec2, angular: f32);
    /// Advance by `dt` seconds
    fn step(&mut self, dt: f32);
    /// Contact-begin events raised since the last drain
    fn drain_contacts(&mut self) -> Vec<Contact>;
}

/// Overlap tolerance for considering two boxes in contact
const CONTACT_SLOP: f32 = 0.5;
/// Penetration below which a body still counts as resting on a surface
const RESOLVE_EPSILON: f32 = 0.01;

#[derive(Debug, Clone)]
struct Body {
    category: PhysicsCategory,
    kind: BodyKind,
    pos: Vec2,
    /// Position at the start of the current substep
    prev_pos: Vec2,
    half: Vec2,
    vel: Vec2,
    rotation: f32,
    angular_vel: f32,
    inv_mass: f32,
    affected_by_gravity: bool,
    allows_rotation: bool,
}

impl Body {
    /// Penetration depth per axis (positive on both axes means overlap)
    fn overlap(&self, other: &Body, slop: f32) -> Vec2 {
        let extent = self.half + other.half + Vec2::splat(slop);
        extent - (self.pos - other.pos).abs()
    }
}

/// Axis-aligned box integrator with contact-begin detection
#[derive(Debug, Clone)]
pub struct SimplePhysics {
    /// Gravity in points/s²
    gravity: Vec2,
    bodies: BTreeMap<BodyHandle, Body>,
    next_handle: u32,
    /// Pairs touching after the last substep (lower handle first)
    touching: BTreeSet<(BodyHandle, BodyHandle)>,
    contacts: Vec<Contact>,
}

impl Default for SimplePhysics {
    fn default() -> Self {
        Self::new()
    }
}

impl SimplePhysics {
    pub fn new() -> Self {
        Self {
            gravity: Vec2::ZERO,
            bodies: BTreeMap::new(),
            next_handle: 1,
            touching: BTreeSet::new(),
            contacts: Vec::new(),
        }
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn substep(&mut self, dt: f32) {
        // Integrate
        for body in self.bodies.values_mut() {
            if body.kind != BodyKind::Dynamic {
                continue;
            }
            body.prev_pos = body.pos;
            if body.affected_by_gravity {
                body.vel += self.gravity * dt;
            }
            body.pos += body.vel * dt;
            if body.allows_rotation {
                body.rotation += body.angular_vel * dt;
            }
        }

        self.resolve_collisions();
        self.detect_contacts();
    }

    /// Push dynamic bodies out of whatever they collide with
    fn resolve_collisions(&mut self) {
        let obstacles: Vec<(BodyHandle, Body)> =
            self.bodies.iter().map(|(h, b)| (*h, b.clone())).collect();

        for (handle, body) in self.bodies.iter_mut() {
            if body.kind != BodyKind::Dynamic {
                continue;
            }
            for (other_handle, other) in &obstacles {
                if other_handle == handle || !body.category.is_pushed_by(other.category) {
                    continue;
                }
                let overlap = body.overlap(other, 0.0);
                if overlap.x <= 0.0 || overlap.y <= 0.0 {
                    continue;
                }
                let delta = body.pos - other.pos;
                // Bodies arriving from above or below always resolve vertically
                let prev_overlap_y =
                    body.half.y + other.half.y - (body.prev_pos.y - other.pos.y).abs();
                if prev_overlap_y <= RESOLVE_EPSILON || overlap.y <= overlap.x {
                    let dir = if delta.y >= 0.0 { 1.0 } else { -1.0 };
                    body.pos.y += overlap.y * dir;
                    if body.vel.y * dir < 0.0 {
                        body.vel.y = 0.0;
                    }
                } else {
                    let dir = if delta.x >= 0.0 { 1.0 } else { -1.0 };
                    body.pos.x += overlap.x * dir;
                    if body.vel.x * dir < 0.0 {
                        body.vel.x = 0.0;
                    }
                }
            }
        }
    }

    fn detect_contacts(&mut self) {
        let mut now = BTreeSet::new();
        let bodies: Vec<(&BodyHandle, &Body)> = self.bodies.iter().collect();

        for (i, (ha, a)) in bodies.iter().enumerate() {
            for (hb, b) in bodies.iter().skip(i + 1) {
                if !a.category.reports_contact(b.category) {
                    continue;
                }
                let overlap = a.overlap(b, CONTACT_SLOP);
                if overlap.x > 0.0 && overlap.y > 0.0 {
                    let pair = (**ha, **hb);
                    if !self.touching.contains(&pair) {
                        self.contacts.push(Contact {
                            a: pair.0,
                            a_category: a.category,
                            b: pair.1,
                            b_category: b.category,
                        });
                    }
                    now.insert(pair);
                }
            }
        }

        self.touching = now;
    }
}

impl PhysicsWorld for SimplePhysics {
    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity * POINTS_PER_METER;
    }

    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        let inv_mass = if desc.kind == BodyKind::Dynamic && desc.mass > 0.0 {
            1.0 / desc.mass
        } else {
            0.0
        };
        self.bodies.insert(
            handle,
            Body {
                category: desc.category,
                kind: desc.kind,
                pos: desc.position,
                prev_pos: desc.position,
                half: desc.size / 2.0,
                vel: Vec2::ZERO,
                rotation: 0.0,
                angular_vel: 0.0,
                inv_mass,
                affected_by_gravity: desc.affected_by_gravity,
                allows_rotation: desc.allows_rotation,
            },
        );
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies.remove(&handle);
        self.touching.retain(|(a, b)| *a != handle && *b != handle);
    }

    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.vel += impulse * body.inv_mass;
        }
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(&handle).map(|b| b.vel)
    }

    fn angular_velocity(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies.get(&handle).map(|b| b.angular_vel)
    }

    fn transform(&self, handle: BodyHandle) -> Option<(Vec2, f32)> {
        self.bodies.get(&handle).map(|b| (b.pos, b.rotation))
    }

    fn set_position(&mut self, handle: BodyHandle, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.pos = position;
        }
    }

    fn set_transform(&mut self, handle: BodyHandle, position: Vec2, rotation: f32) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.pos = position;
            body.rotation = rotation;
        }
    }

    fn set_velocity(&mut self, handle: BodyHandle, linear: Vec2, angular: f32) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.vel = linear;
            body.angular_vel = angular;
        }
    }

    fn step(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        // Long frames (hitches, backgrounding) lose simulated time instead of
        // stretching substeps past PHYSICS_DT
        let dt = dt.min(PHYSICS_DT * MAX_SUBSTEPS as f32);
        let substeps = ((dt / PHYSICS_DT).ceil() as u32).clamp(1, MAX_SUBSTEPS);
        let sub_dt = dt / substeps as f32;
        for _ in 0..substeps {
            self.substep(sub_dt);
        }
    }

    fn drain_contacts(&mut self) -> Vec<Contact> {
        std::mem::take(&mut self.contacts)
    }
}
