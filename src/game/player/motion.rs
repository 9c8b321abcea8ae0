// Velocity computation
//
// Runs once per frame after the jump state machine and before the body
// integrates. Vertical velocity is only touched on take-off and on an early
// release; gravity is the body's business.

use super::controller::ControllerState;
use super::model::{is_valid_jump_deceleration, is_valid_jump_modifier, ModelProvider};
use crate::core::math::sign_outside_dead_zone;
use glam::Vec2;

/// Horizontal input magnitude at or below which facing is left alone
pub const FACING_DEAD_ZONE: f32 = 0.01;

/// Values an animator needs to pick and blend player animations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimatorParams {
    pub grounded: bool,
    /// Horizontal speed as a fraction of max speed
    pub velocity_x: f32,
}

/// Result of one velocity step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Body velocity after take-off / short-hop adjustments
    pub velocity: Vec2,
    /// Velocity the body should steer toward
    pub target_velocity: Vec2,
    pub animator: AnimatorParams,
}

/// Compute this frame's velocity from the controller state and the body's
/// current `velocity`. Clears whichever jump request it consumes and updates
/// `facing_flipped`.
pub fn compute_velocity(
    state: &mut ControllerState,
    velocity: Vec2,
    grounded_now: bool,
    model: &dyn ModelProvider,
) -> Motion {
    let mut velocity = velocity;
    let stats = state.stats;

    if state.jump.jump_requested() && grounded_now {
        let jump_modifier = model.jump_modifier();
        velocity.y = if is_valid_jump_modifier(jump_modifier) {
            stats.jump_take_off_speed * jump_modifier
        } else {
            log::warn!(
                "Ignoring invalid jump_modifier {}, taking off at base speed",
                jump_modifier
            );
            stats.jump_take_off_speed
        };
        state.jump.clear_jump_request();
    } else if state.jump.stop_jump_requested() {
        state.jump.clear_stop_jump_request();
        // Never damp a fall
        if velocity.y > 0.0 {
            let jump_deceleration = model.jump_deceleration();
            if is_valid_jump_deceleration(jump_deceleration) {
                velocity.y *= jump_deceleration;
            } else {
                log::warn!(
                    "Ignoring invalid jump_deceleration {}, short hop skipped",
                    jump_deceleration
                );
            }
        }
    }

    if let Some(facing_right) = sign_outside_dead_zone(state.move_input.x, FACING_DEAD_ZONE) {
        state.facing_flipped = !facing_right;
    }

    Motion {
        velocity,
        target_velocity: state.move_input * stats.max_speed,
        animator: AnimatorParams {
            grounded: grounded_now,
            velocity_x: velocity.x.abs() / stats.max_speed,
        },
    }
}
