//! The skater: grounded/airborne state, jumping, and run-ending checks

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::PhysicsCategory;
use super::events::RunEnded;
use super::physics::{BodyDesc, BodyHandle, PhysicsWorld};
use crate::{Scene, Tuning};

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skater {
    /// Center position, mirrored from physics every frame
    pub pos: Vec2,
    /// Rotation in radians (counter-clockwise)
    pub rotation: f32,
    /// Jumps are only accepted while grounded
    pub grounded: bool,
    /// Height the skater rests at on flat ground
    pub minimum_y: f32,
    pub size: Vec2,
    #[serde(skip)]
    pub body: Option<BodyHandle>,
}

impl Skater {
    /// A skater without a physics body yet
    pub fn new(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            rotation: 0.0,
            grounded: true,
            minimum_y: 0.0,
            size,
            body: None,
        }
    }

    /// Register the skater's body with the physics world
    pub fn attach_body<P: PhysicsWorld>(&mut self, physics: &mut P, tuning: &Tuning) {
        let desc = BodyDesc::dynamic(PhysicsCategory::Skater, self.pos, self.size, tuning.skater_mass);
        self.body = Some(physics.add_body(desc));
    }

    /// Spawn position for a fresh run
    pub fn reset_position(scene: &Scene, tuning: &Tuning) -> Vec2 {
        Vec2::new(
            scene.mid_x() / 2.0,
            scene.skater_size.y / 2.0 + tuning.reset_offset_y,
        )
    }

    /// Put the skater back at the start, upright and motionless
    pub fn reset<P: PhysicsWorld>(&mut self, scene: &Scene, tuning: &Tuning, physics: &mut P) {
        self.pos = Self::reset_position(scene, tuning);
        self.minimum_y = self.pos.y;
        self.rotation = 0.0;
        self.grounded = true;

        if let Some(body) = self.body {
            physics.set_transform(body, self.pos, 0.0);
            physics.set_velocity(body, Vec2::ZERO, 0.0);
        }
    }

    /// Apply the jump impulse if grounded. Returns whether an impulse was applied.
    ///
    /// Grounded is left alone here; it clears once vertical speed passes the
    /// airborne threshold in [`Skater::update_grounded`].
    pub fn on_jump_requested<P: PhysicsWorld>(&mut self, physics: &mut P, tuning: &Tuning) -> bool {
        if !self.grounded {
            return false;
        }
        match self.body {
            Some(body) => {
                physics.apply_impulse(body, Vec2::new(0.0, tuning.jump_impulse));
                true
            }
            None => false,
        }
    }

    /// Touched a brick
    pub fn on_ground_contact(&mut self) {
        self.grounded = true;
    }

    /// Leaving the ground (or jumping) shows up as vertical speed
    pub fn update_grounded(&mut self, velocity: Option<Vec2>, tuning: &Tuning) {
        if velocity.is_some_and(|v| v.y.abs() > tuning.grounded_velocity_threshold) {
            self.grounded = false;
        }
    }

    /// Copy position and rotation from the physics body
    pub fn sync_from_physics<P: PhysicsWorld>(&mut self, physics: &P) {
        if let Some((pos, rotation)) = self.body.and_then(|b| physics.transform(b)) {
            self.pos = pos;
            self.rotation = rotation;
        }
    }

    /// Current velocity, if the skater has a body
    pub fn velocity<P: PhysicsWorld>(&self, physics: &P) -> Option<Vec2> {
        self.body.and_then(|b| physics.velocity(b))
    }

    /// Check whether the run is over
    pub fn evaluate_failure_conditions(&self, tuning: &Tuning) -> Option<RunEnded> {
        if self.pos.y < 0.0 || self.pos.x < 0.0 {
            return Some(RunEnded::FellOff);
        }
        if self.rotation.abs() > tuning.tip_over_radians() {
            return Some(RunEnded::TippedOver);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::SimplePhysics;

    fn skater_at(x: f32, y: f32, degrees: f32) -> Skater {
        let mut skater = Skater::new(Vec2::new(90.0, 126.0));
        skater.pos = Vec2::new(x, y);
        skater.rotation = degrees.to_radians();
        skater
    }

    #[test]
    fn test_failure_scenarios() {
        let tuning = Tuning::default();
        assert_eq!(
            skater_at(-1.0, 50.0, 0.0).evaluate_failure_conditions(&tuning),
            Some(RunEnded::FellOff)
        );
        assert_eq!(
            skater_at(50.0, -1.0, 0.0).evaluate_failure_conditions(&tuning),
            Some(RunEnded::FellOff)
        );
        assert_eq!(
            skater_at(50.0, 50.0, 86.0).evaluate_failure_conditions(&tuning),
            Some(RunEnded::TippedOver)
        );
        assert_eq!(
            skater_at(50.0, 50.0, -86.0).evaluate_failure_conditions(&tuning),
            Some(RunEnded::TippedOver)
        );
        assert_eq!(skater_at(50.0, 50.0, 84.0).evaluate_failure_conditions(&tuning), None);
        assert_eq!(skater_at(0.0, 0.0, 0.0).evaluate_failure_conditions(&tuning), None);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let tuning = Tuning::default();
        let mut physics = SimplePhysics::new();
        let mut skater = Skater::new(Vec2::new(90.0, 126.0));
        skater.attach_body(&mut physics, &tuning);
        let body = skater.body.unwrap();

        skater.grounded = false;
        assert!(!skater.on_jump_requested(&mut physics, &tuning));
        assert_eq!(physics.velocity(body), Some(Vec2::ZERO));
        assert!(!skater.grounded);

        skater.grounded = true;
        assert!(skater.on_jump_requested(&mut physics, &tuning));
        let expected = tuning.jump_impulse / tuning.skater_mass;
        let vel = physics.velocity(body).unwrap();
        assert_eq!(vel.x, 0.0);
        assert!((vel.y - expected).abs() < 0.01);
        // Still grounded until the velocity rule runs
        assert!(skater.grounded);

        skater.update_grounded(physics.velocity(body), &tuning);
        assert!(!skater.grounded);
    }

    #[test]
    fn test_grounded_threshold_both_directions() {
        let tuning = Tuning::default();
        let mut skater = Skater::new(Vec2::ONE);

        skater.update_grounded(Some(Vec2::new(0.0, 100.0)), &tuning);
        assert!(skater.grounded);
        skater.update_grounded(Some(Vec2::new(500.0, -99.0)), &tuning);
        assert!(skater.grounded);
        skater.update_grounded(Some(Vec2::new(0.0, -101.0)), &tuning);
        assert!(!skater.grounded);

        skater.on_ground_contact();
        assert!(skater.grounded);
        skater.update_grounded(Some(Vec2::new(0.0, 101.0)), &tuning);
        assert!(!skater.grounded);
    }

    #[test]
    fn test_missing_body_is_tolerated() {
        let tuning = Tuning::default();
        let mut physics = SimplePhysics::new();
        let mut skater = Skater::new(Vec2::ONE);

        assert!(!skater.on_jump_requested(&mut physics, &tuning));
        assert_eq!(skater.velocity(&physics), None);
        skater.update_grounded(skater.velocity(&physics), &tuning);
        assert!(skater.grounded);

        skater.pos = Vec2::new(3.0, 4.0);
        skater.sync_from_physics(&physics);
        assert_eq!(skater.pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_reset() {
        let tuning = Tuning::default();
        let scene = Scene::default();
        let mut physics = SimplePhysics::new();
        let mut skater = Skater::new(scene.skater_size);
        skater.attach_body(&mut physics, &tuning);
        let body = skater.body.unwrap();
        physics.set_velocity(body, Vec2::new(3.0, -40.0), 1.5);
        skater.rotation = 1.0;
        skater.grounded = false;

        skater.reset(&scene, &tuning, &mut physics);

        let expected = Vec2::new(scene.viewport.x / 4.0, scene.skater_size.y / 2.0 + 64.0);
        assert_eq!(skater.pos, expected);
        assert_eq!(skater.minimum_y, expected.y);
        assert_eq!(skater.rotation, 0.0);
        assert!(skater.grounded);
        assert_eq!(physics.transform(body), Some((expected, 0.0)));
        assert_eq!(physics.velocity(body), Some(Vec2::ZERO));
    }
}
