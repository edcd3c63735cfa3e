//! Player input mapped onto the session

use super::events::GameEvent;
use super::physics::PhysicsWorld;
use super::session::Session;

/// Discrete input delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Tap,
}

impl<P: PhysicsWorld> Session<P> {
    /// Dispatch a platform input event
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Tap => {
                self.on_tap();
            }
        }
    }

    /// A tap asks the skater to jump. Returns whether the jump happened.
    pub fn on_tap(&mut self) -> bool {
        let jumped = self.skater.on_jump_requested(&mut self.physics, &self.tuning);
        if jumped {
            log::debug!("Jump at ({:.1}, {:.1})", self.skater.pos.x, self.skater.pos.y);
            self.push_event(GameEvent::Jumped);
        }
        jumped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scene, Tuning};

    #[test]
    fn test_tap_jumps_when_grounded() {
        let mut session =
            Session::with_simple_physics(Scene::default(), Tuning::default(), 1).unwrap();
        let body = session.skater.body.unwrap();

        session.handle_input(InputEvent::Tap);

        assert!(session.physics.velocity(body).unwrap().y > 0.0);
        assert_eq!(session.drain_events(), vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_tap_ignored_midair() {
        let mut session =
            Session::with_simple_physics(Scene::default(), Tuning::default(), 1).unwrap();
        let body = session.skater.body.unwrap();
        session.skater.grounded = false;

        session.handle_input(InputEvent::Tap);

        assert_eq!(session.physics.velocity(body), Some(glam::Vec2::ZERO));
        assert!(session.drain_events().is_empty());
    }
}
