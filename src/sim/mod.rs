//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Terrain scrolling and brick spawning
//! - Skater grounded/airborne state and run-ending checks
//! - The session loop tying them together
//!
//! Physics is reached only through the `PhysicsWorld` trait. No rendering or
//! platform dependencies.

pub mod category;
pub mod events;
pub mod input;
pub mod physics;
pub mod session;
pub mod skater;
pub mod terrain;

pub use category::PhysicsCategory;
pub use events::{GameEvent, RunEnded};
pub use input::InputEvent;
pub use physics::{BodyDesc, BodyHandle, BodyKind, Contact, PhysicsWorld, SimplePhysics};
pub use session::Session;
pub use skater::Skater;
pub use terrain::{Segment, Terrain, TerrainContext};
