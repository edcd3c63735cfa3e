//! Per-frame game loop and run lifecycle
//!
//! A session lives for the whole process. Every frame `advance` ramps the
//! scroll speed, scrolls the terrain, steps physics and checks whether the
//! run ended; a run end restarts the session in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::category::PhysicsCategory;
use super::events::{GameEvent, RunEnded};
use super::physics::{PhysicsWorld, SimplePhysics};
use super::skater::Skater;
use super::terrain::{Terrain, TerrainContext};
use crate::{Scene, Tuning, TuningError};

/// The single running game
#[derive(Debug)]
pub struct Session<P: PhysicsWorld = SimplePhysics> {
    /// World shift per normalized frame
    pub scroll_speed: f32,
    /// Timestamp of the previous `advance`, cleared on restart
    last_update_time: Option<f64>,
    pub terrain: Terrain,
    pub skater: Skater,
    pub physics: P,
    pub scene: Scene,
    pub tuning: Tuning,
    rng: Pcg32,
    events: Vec<GameEvent>,
    /// Frames advanced since the last restart
    pub frame: u64,
    /// Runs ended since the session was created
    pub runs_ended: u32,
}

impl Session<SimplePhysics> {
    /// Session backed by the built-in integrator
    pub fn with_simple_physics(
        scene: Scene,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, TuningError> {
        Self::new(SimplePhysics::new(), scene, tuning, seed)
    }
}

impl<P: PhysicsWorld> Session<P> {
    /// Fails if `tuning` does not validate
    pub fn new(
        mut physics: P,
        scene: Scene,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        physics.set_gravity(Vec2::new(0.0, tuning.gravity));

        let mut skater = Skater::new(scene.skater_size);
        skater.attach_body(&mut physics, &tuning);

        let mut session = Self {
            scroll_speed: tuning.starting_scroll_speed,
            last_update_time: None,
            terrain: Terrain::new(scene.segment_size),
            skater,
            physics,
            scene,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            frame: 0,
            runs_ended: 0,
        };
        session.reset();
        session.events.clear();

        log::info!(
            "Session started: viewport {}x{}, seed {}",
            scene.viewport.x,
            scene.viewport.y,
            seed
        );
        Ok(session)
    }

    /// Timestamp the next `advance` measures elapsed time from
    pub fn last_update_time(&self) -> Option<f64> {
        self.last_update_time
    }

    /// Advance one frame to `current_time` (seconds, monotonic).
    ///
    /// Returns the reason if this frame ended the run; the session has already
    /// restarted by then.
    pub fn advance(&mut self, current_time: f64) -> Option<RunEnded> {
        self.scroll_speed += self.tuning.scroll_speed_increment;

        let elapsed = self
            .last_update_time
            .map_or(0.0, |last| (current_time - last).max(0.0));
        self.last_update_time = Some(current_time);
        self.frame += 1;

        // Normalize against 60 Hz so scrolling is frame-rate independent
        let scroll_adjustment = (elapsed / self.tuning.expected_frame_time) as f32;
        let scroll_amount = self.scroll_speed * scroll_adjustment;

        let mut ctx = TerrainContext {
            viewport_width: self.scene.viewport.x,
            scroll_speed: self.scroll_speed,
            tuning: &self.tuning,
            rng: &mut self.rng,
            physics: &mut self.physics,
            events: &mut self.events,
        };
        self.terrain.update(scroll_amount, &mut ctx);

        self.physics.step(elapsed as f32);
        for contact in self.physics.drain_contacts() {
            let skater_hit = contact.handle_of(PhysicsCategory::Skater);
            if skater_hit.is_some()
                && skater_hit == self.skater.body
                && contact.is_between(PhysicsCategory::Skater, PhysicsCategory::Brick)
            {
                self.skater.on_ground_contact();
            }
        }

        self.skater.sync_from_physics(&self.physics);
        let velocity = self.skater.velocity(&self.physics);
        self.skater.update_grounded(velocity, &self.tuning);

        log::trace!(
            "frame {} dt={:.4} speed={:.2} scroll={:.2} skater=({:.1}, {:.1}) grounded={}",
            self.frame,
            elapsed,
            self.scroll_speed,
            scroll_amount,
            self.skater.pos.x,
            self.skater.pos.y,
            self.skater.grounded
        );

        let reason = self.skater.evaluate_failure_conditions(&self.tuning)?;
        self.runs_ended += 1;
        log::info!(
            "Run ended ({:?}) after {} frames at speed {:.2}",
            reason,
            self.frame,
            self.scroll_speed
        );
        self.events.push(GameEvent::RunEnded(reason));
        self.restart();
        Some(reason)
    }

    /// Reset everything to the start of a run
    pub fn restart(&mut self) {
        self.reset();
        self.events.push(GameEvent::Restarted);
        log::info!("Session restarted");
    }

    fn reset(&mut self) {
        self.skater.reset(&self.scene, &self.tuning, &mut self.physics);
        self.scroll_speed = self.tuning.starting_scroll_speed;
        self.last_update_time = None;
        self.frame = 0;
        self.terrain.clear(&mut self.physics, &mut self.events);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
