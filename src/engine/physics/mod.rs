// Kinematic physics
//
// The controller never integrates positions itself. It reads the grounded flag
// and the current velocity from a `KinematicBody`, writes back the new
// velocity and the target velocity, and leaves the rest to the body.
// `SimpleBody` is the stock body, simulated by rapier over a flat floor.

pub mod body;
pub mod world;

pub use body::{BodyBuilder, BodyConfig, SimpleBody};
pub use world::PhysicsWorld;

use glam::Vec2;

/// Default gravity (units/second²), pointing down the y axis
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

/// A body whose movement is resolved outside the character controller
pub trait KinematicBody {
    /// Whether the body touched a supporting surface during its last step
    fn is_grounded(&self) -> bool;

    /// Current velocity
    fn velocity(&self) -> Vec2;

    /// Overwrite the current velocity
    fn set_velocity(&mut self, velocity: Vec2);

    /// Velocity the body should move toward on its next step
    fn set_target_velocity(&mut self, target: Vec2);

    /// Move the body instantly and cancel its motion.
    ///
    /// Bodies that cannot be moved directly may ignore this.
    fn teleport(&mut self, _position: Vec2) {}
}
