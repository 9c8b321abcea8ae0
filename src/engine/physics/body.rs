use super::world::{PhysicsWorld, RigidBodyHandle};
use super::{KinematicBody, DEFAULT_GRAVITY};
use glam::Vec2;
use rapier2d::prelude::*;

/// Height above the feet the ground ray starts from
const GROUND_SKIN: f32 = 0.05;

/// Slack on the ground ray so a body resting on the floor keeps touching it
const GROUND_TOLERANCE: f32 = 1e-3;

const FLOOR_HALF_WIDTH: f32 = 1000.0;
const FLOOR_HALF_THICKNESS: f32 = 0.5;

/// Tunables for a `SimpleBody`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyConfig {
    /// World gravity
    pub gravity: Vec2,
    /// Extra gravity scale applied only while falling
    pub gravity_modifier: f32,
    /// Height of the floor's top surface
    pub ground_level: f32,
    /// Half size of the body's box collider
    pub half_extents: Vec2,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            gravity_modifier: 1.0,
            ground_level: 0.0,
            half_extents: Vec2::new(0.4, 0.9),
        }
    }
}

/// Builder for creating simple bodies
pub struct BodyBuilder {
    config: BodyConfig,
    position: Vec2,
    velocity: Vec2,
}

impl BodyBuilder {
    pub fn new() -> Self {
        Self {
            config: BodyConfig::default(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    /// Set the initial position of the body's feet
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set the initial velocity
    pub fn velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vec2::new(x, y);
        self
    }

    /// Set world gravity
    pub fn gravity(mut self, gravity: Vec2) -> Self {
        self.config.gravity = gravity;
        self
    }

    /// Set the falling gravity multiplier (1.0 = same as rising)
    pub fn gravity_modifier(mut self, modifier: f32) -> Self {
        self.config.gravity_modifier = modifier;
        self
    }

    /// Set the floor height
    pub fn ground_level(mut self, y: f32) -> Self {
        self.config.ground_level = y;
        self
    }

    /// Set the collider half size
    pub fn half_extents(mut self, half_width: f32, half_height: f32) -> Self {
        self.config.half_extents = Vec2::new(half_width, half_height);
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: BodyConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the body and its floor. A body starting at or below the floor
    /// is placed on it.
    pub fn build(self) -> SimpleBody {
        let config = self.config;
        let mut position = self.position;
        if position.y <= config.ground_level && self.velocity.y <= 0.0 {
            position.y = config.ground_level;
        }

        let mut world = PhysicsWorld::with_gravity(to_vector(config.gravity));

        let floor = world.add_rigid_body(
            RigidBodyBuilder::fixed()
                .translation(vector![0.0, config.ground_level - FLOOR_HALF_THICKNESS])
                .build(),
        );
        world.add_collider(
            ColliderBuilder::cuboid(FLOOR_HALF_WIDTH, FLOOR_HALF_THICKNESS).build(),
            floor,
        );

        let center = position + Vec2::new(0.0, config.half_extents.y);
        let handle = world.add_rigid_body(
            RigidBodyBuilder::kinematic_velocity_based()
                .translation(to_vector(center))
                .can_sleep(false)
                .lock_rotations()
                .build(),
        );
        world.add_collider(
            ColliderBuilder::cuboid(config.half_extents.x, config.half_extents.y).build(),
            handle,
        );

        // Nothing moves yet; the step fills the query pipeline for ground rays
        world.step();

        let mut body = SimpleBody {
            config,
            world,
            handle,
            position,
            velocity: self.velocity,
            target_velocity: Vec2::ZERO,
            grounded: false,
        };
        body.grounded = body.velocity.y <= 0.0 && body.ground_gap(GROUND_TOLERANCE).is_some();
        body
    }
}

impl Default for BodyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn to_vector(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

/// Box-shaped kinematic body over a flat floor, simulated by rapier.
///
/// Gravity and the target horizontal speed set its velocity; a downward ray
/// from the feet decides when it touches the floor.
pub struct SimpleBody {
    config: BodyConfig,
    world: PhysicsWorld,
    handle: RigidBodyHandle,
    /// Feet position, kept in sync with the rapier body
    position: Vec2,
    velocity: Vec2,
    target_velocity: Vec2,
    grounded: bool,
}

impl SimpleBody {
    pub fn builder() -> BodyBuilder {
        BodyBuilder::new()
    }

    /// Advance the body by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let gravity_scale = if self.velocity.y < 0.0 {
            self.config.gravity_modifier
        } else {
            1.0
        };
        self.velocity += self.config.gravity * gravity_scale * dt;

        // Horizontal speed is dictated by the controller, not accumulated
        self.velocity.x = self.target_velocity.x;

        let mut displacement = self.velocity * dt;
        self.grounded = false;
        if self.velocity.y <= 0.0 {
            if let Some(gap) = self.ground_gap(-displacement.y + GROUND_TOLERANCE) {
                displacement.y = -gap;
                self.velocity.y = 0.0;
                self.grounded = true;
            }
        }

        self.world.set_timestep(dt);
        if let Some(body) = self.world.get_rigid_body_mut(self.handle) {
            body.set_linvel(to_vector(displacement / dt), true);
        }
        self.world.step();
        self.sync_position();
    }

    /// Set vertical velocity directly (springs, stomps)
    pub fn bounce(&mut self, value: f32) {
        self.velocity.y = value;
    }

    /// Set both velocity components directly
    pub fn bounce_vec(&mut self, direction: Vec2) {
        self.velocity = direction;
    }

    /// Feet position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn target_velocity(&self) -> Vec2 {
        self.target_velocity
    }

    pub fn config(&self) -> &BodyConfig {
        &self.config
    }

    /// Distance from the feet down to the floor, if within `reach`.
    /// Negative when the feet sit slightly inside it.
    fn ground_gap(&self, reach: f32) -> Option<f32> {
        let origin = self.position + Vec2::new(0.0, GROUND_SKIN);
        self.world
            .raycast(
                to_vector(origin),
                vector![0.0, -1.0],
                GROUND_SKIN + reach.max(0.0),
                true,
                QueryFilter::default().exclude_rigid_body(self.handle),
            )
            .map(|(_, toi)| toi - GROUND_SKIN)
    }

    fn sync_position(&mut self) {
        if let Some(body) = self.world.get_rigid_body(self.handle) {
            let center = body.translation();
            self.position = Vec2::new(center.x, center.y - self.config.half_extents.y);
        }
    }
}

impl KinematicBody for SimpleBody {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn set_target_velocity(&mut self, target: Vec2) {
        self.target_velocity = target;
    }

    fn teleport(&mut self, position: Vec2) {
        let feet = Vec2::new(position.x, position.y.max(self.config.ground_level));
        let center = feet + Vec2::new(0.0, self.config.half_extents.y);
        if let Some(body) = self.world.get_rigid_body_mut(self.handle) {
            body.set_translation(to_vector(center), true);
            body.set_linvel(vector![0.0, 0.0], true);
        }
        self.position = feet;
        self.velocity = Vec2::ZERO;
        self.grounded = self.ground_gap(GROUND_TOLERANCE).is_some();
    }
}
